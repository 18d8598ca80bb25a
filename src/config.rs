use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortArmConfig {
    pub vision: VisionConfig,
    pub classifier: ClassifierConfig,
    pub vote: VoteConfig,
    pub serial: SerialConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Camera resolution width
    pub width: u32,
    /// Camera resolution height
    pub height: u32,
    /// Frames per second for video capture
    pub fps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Results below this confidence are coerced to the fallback label
    pub confidence_threshold: f32,
    /// Label recorded in place of a low-confidence result
    pub fallback_label_id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteConfig {
    /// Number of consecutive agreeing frames required to act
    pub window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial device the servo controller is attached to
    pub port: String,
    /// Baud rate, 8N1 framing
    pub baud: u32,
    /// Read timeout in milliseconds (the control path is write-only)
    pub read_timeout_ms: u64,
}

impl Default for SortArmConfig {
    fn default() -> Self {
        Self {
            vision: VisionConfig {
                width: 800,
                height: 480,
                fps: 30,
            },
            classifier: ClassifierConfig {
                confidence_threshold: 0.6,
                fallback_label_id: 1,
            },
            vote: VoteConfig { window: 10 },
            serial: SerialConfig {
                port: "/dev/ttyUSB0".to_string(),
                baud: 115_200,
                read_timeout_ms: 100,
            },
        }
    }
}

impl SortArmConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let default_config = Self::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            fs::write(path, toml_content).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path).await?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}
