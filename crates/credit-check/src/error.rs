use std::path::PathBuf;

use crate::approval::MetricsImportError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Startup and process-level failures surfaced by the binaries.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to seed credit metrics from {}: {source}", path.display())]
    Seed {
        path: PathBuf,
        #[source]
        source: MetricsImportError,
    },
}

impl AppError {
    pub fn seed(path: impl Into<PathBuf>, source: MetricsImportError) -> Self {
        Self::Seed {
            path: path.into(),
            source,
        }
    }
}
