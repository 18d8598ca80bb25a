use crate::config::SerialConfig;
use anyhow::{anyhow, Result};
use serialport::{DataBits, Parity, SerialPort, StopBits};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Write-only ASCII line link to the servo controller firmware. Each command
/// is a short token plus newline; the firmware sends no acknowledgments on
/// the control path.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialLink {
    pub fn open(config: &SerialConfig) -> Result<Self> {
        info!("Opening serial port {} at {} baud", config.port, config.baud);

        let mut port = serialport::new(&config.port, config.baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .open()
            .map_err(|e| anyhow!("Failed to open serial port {}: {}", config.port, e))?;

        port.write_data_terminal_ready(true)?;

        Ok(Self {
            port,
            name: config.port.clone(),
        })
    }

    /// Write one command line. A failure here propagates and is fatal to the
    /// control loop; there is no retry.
    pub fn send(&mut self, command: &str) -> Result<()> {
        debug!("serial {} <- {}", self.name, command);
        self.port.write_all(command.as_bytes())?;
        self.port.write_all(b"\n")?;
        self.port.flush()?;
        Ok(())
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &str {
        &self.name
    }
}
