use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service: read from an optional `configuration`
/// file and `APP__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::load_with_fallback_port(None)
    }

    /// As [`Config::load`], with `fallback_port` used only when neither the
    /// file nor `APP__PORT` sets a port.
    pub fn load_with_fallback_port(fallback_port: Option<String>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let mut builder = Cfg::builder();
        if let Some(port) = fallback_port.filter(|p| !p.trim().is_empty()) {
            builder = builder.set_default("port", port.trim().to_string())?;
        }

        let config = builder
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
