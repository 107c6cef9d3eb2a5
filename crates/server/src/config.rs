//! HTTP server settings.
//!
//! Environment variables:
//!   HOST                        - bind address (default: 0.0.0.0)
//!   PORT                        - listening port (default: 3001)
//!   TRANSCRIPTION_TIMEOUT_SECS  - upper bound for one recognize call (default: 30)
//!   ARCHIVE_TIMEOUT_SECS        - upper bound for one archive upload (default: 60)
//!   MAX_UPLOAD_BYTES            - largest accepted audio upload (default: 25 MiB)

use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TRANSCRIPTION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_ARCHIVE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub transcription_timeout: Duration,
    pub archive_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match value("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT '{}' is not a valid port", port))?,
            None => DEFAULT_PORT,
        };

        let seconds = |key: &str, default: Duration| -> Result<Duration> {
            match value(key) {
                Some(secs) => {
                    let secs = secs
                        .parse::<u64>()
                        .with_context(|| format!("{} '{}' is not a number of seconds", key, secs))?;
                    anyhow::ensure!(secs > 0, "{} must be positive", key);
                    Ok(Duration::from_secs(secs))
                }
                None => Ok(default),
            }
        };
        let transcription_timeout =
            seconds("TRANSCRIPTION_TIMEOUT_SECS", DEFAULT_TRANSCRIPTION_TIMEOUT)?;
        let archive_timeout = seconds("ARCHIVE_TIMEOUT_SECS", DEFAULT_ARCHIVE_TIMEOUT)?;

        let max_upload_bytes = match value("MAX_UPLOAD_BYTES") {
            Some(bytes) => bytes
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES '{}' is not a byte count", bytes))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            host: value("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            transcription_timeout,
            archive_timeout,
            max_upload_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
