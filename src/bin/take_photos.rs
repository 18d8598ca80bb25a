use anyhow::Result;
use clap::Parser;
use image::imageops::FilterType;
use std::time::Duration;
use tracing::info;

use sortarm::camera::{CameraConfig, CameraSystem};

/// Side length of the saved training photos, matching the classifier input.
const PHOTO_SIZE: u32 = 224;

#[derive(Parser)]
#[command(name = "take-photos")]
#[command(about = "Capture labeled training photos from the camera")]
struct Args {
    /// Class name used as the output file prefix
    class_name: String,

    /// Camera device index
    #[arg(short = 'd', long, default_value = "0")]
    camera_device: u32,

    /// Seconds between captures
    #[arg(short, long, default_value = "2.0")]
    interval: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // The original tool printed usage and exited with status 1 on a missing
    // class name; keep that exit code.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter("sortarm=info,take_photos=info")
        .try_init();

    let mut camera = CameraSystem::new(CameraConfig {
        camera_id: args.camera_device,
        width: 640,
        height: 480,
        fps: 30,
    })?;
    camera.initialize().await?;

    info!("Capturing photos for class '{}'", args.class_name);

    let mut index: usize = 0;
    loop {
        let frame = camera.capture_frame().await?;
        let resized = image::imageops::resize(&frame, PHOTO_SIZE, PHOTO_SIZE, FilterType::Triangle);

        let filename = format!("{}{}.jpg", args.class_name, index);
        resized.save(&filename)?;
        index += 1;
        info!("Took photo {} ({})", index, filename);

        tokio::time::sleep(Duration::from_secs_f32(args.interval)).await;
    }
}
