//! Configuration: managed-context selection and logging settings.
//!
//! Settings come from an optional TOML file merged with `JOBLINE_*`
//! environment variables; `JOBLINE_CONTEXT_ID` is the signal that selects
//! managed mode and supplies the queue context identifier.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::logging::LoggingConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Managed queue context identifier. Absent or empty selects interactive
    /// mode.
    #[serde(default)]
    pub context_id: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Effective context identifier; empty strings count as absent.
    pub fn context_id(&self) -> Option<&str> {
        self.context_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Load settings from an optional file plus the environment. Environment
    /// values override file values.
    pub fn load(file: Option<&Path>) -> Result<Self, ReportError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let cfg = builder
            .add_source(
                Environment::with_prefix("JOBLINE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}
