use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use sortarm::config::SortArmConfig;
use sortarm::pipeline::SortPipeline;

#[derive(Parser)]
#[command(name = "sortarm")]
#[command(about = "Camera-Driven Waste Sorting Arm Controller")]
struct Args {
    /// File path of the ONNX classifier model
    #[arg(short, long)]
    model: String,

    /// File path of the labels file, one label per line
    #[arg(short, long)]
    labels: String,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Camera device index
    #[arg(short = 'd', long, default_value = "0")]
    camera_device: u32,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(format!("sortarm={}", log_level))
        .try_init(); // Use try_init to avoid panic if already initialized

    info!("Starting sortarm - Camera-Driven Waste Sorting Arm Controller");

    // Load configuration
    let config = SortArmConfig::load(&args.config).await?;
    info!("Configuration loaded successfully");

    let mut pipeline =
        SortPipeline::new(config, args.camera_device, &args.model, &args.labels).await?;

    match pipeline.run().await {
        Ok(_) => info!("Pipeline completed successfully"),
        Err(e) => {
            error!("Pipeline error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
