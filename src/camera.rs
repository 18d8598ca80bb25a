use anyhow::{anyhow, Result};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub camera_id: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

pub struct CameraSystem {
    config: CameraConfig,
    camera: Option<Camera>,
    is_initialized: bool,
}

impl CameraSystem {
    pub fn new(config: CameraConfig) -> Result<Self> {
        Ok(Self {
            config,
            camera: None,
            is_initialized: false,
        })
    }

    pub async fn initialize(&mut self) -> Result<()> {
        info!(
            "Initializing camera {} at {}x{}@{}fps",
            self.config.camera_id, self.config.width, self.config.height, self.config.fps
        );

        let camera_index = CameraIndex::Index(self.config.camera_id);
        let format = CameraFormat::new(
            Resolution::new(self.config.width, self.config.height),
            FrameFormat::MJPEG,
            self.config.fps,
        );
        let requested_format =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));

        let mut camera = Camera::new(camera_index, requested_format)
            .map_err(|e| anyhow!("Failed to open camera {}: {}", self.config.camera_id, e))?;

        camera.open_stream()?;

        // Test capture a frame to ensure the stream works
        let _test_frame = camera.frame()?;

        self.camera = Some(camera);
        self.is_initialized = true;

        // Let exposure and white balance settle before classifying anything
        tokio::time::sleep(Duration::from_secs(2)).await;

        info!("Camera system initialized successfully");
        Ok(())
    }

    pub async fn capture_frame(&mut self) -> Result<RgbImage> {
        let camera = self
            .camera
            .as_mut()
            .ok_or_else(|| anyhow!("Camera system not initialized"))?;

        let frame = camera.frame()?;
        let decoded = frame.decode_image::<RgbFormat>()?;
        debug!(
            "Captured camera frame: {}x{}",
            decoded.width(),
            decoded.height()
        );

        Ok(decoded)
    }

    #[allow(dead_code)]
    pub fn stop(&mut self) -> Result<()> {
        info!("Stopping camera system");

        if let Some(ref mut camera) = self.camera {
            match camera.stop_stream() {
                Ok(_) => info!("Camera stream stopped successfully"),
                Err(e) => warn!("Error stopping camera stream: {}", e),
            }
        }

        self.camera = None;
        self.is_initialized = false;

        Ok(())
    }
}

impl Drop for CameraSystem {
    fn drop(&mut self) {
        if self.is_initialized {
            debug!("CameraSystem being dropped, cleaning up");
            if let Some(ref mut camera) = self.camera {
                let _ = camera.stop_stream();
            }
        }
    }
}
