use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// Gemini REST endpoint root.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model key used by `/chat` when the request does not name one.
const DEFAULT_CHAT_MODEL_KEY: &str = "flash";

/// Upload bodies above this size are rejected before reaching a handler.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful, friendly assistant. \
Answer clearly and concisely, and reply in the language the user writes in.";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub chat: ChatConfig,
    pub server: ServerConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Absent keys are allowed at startup; every provider call then fails.
    pub api_key: Option<Secret<String>>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub model_key: String,
    pub system_instruction: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        // `DEFAULT_PORT` is the older name for the listen port; `APP__PORT` wins.
        let common_config =
            core_config::Config::load_with_fallback_port(env::var("DEFAULT_PORT").ok())?;

        let api_key = get_env("GOOGLE_AI_STUDIO_KEY", None)
            .or_else(|_| get_env("GOOGLE_API_KEY", None))
            .ok()
            .filter(|key| !key.is_empty())
            .map(Secret::new);

        Ok(RelayConfig {
            common: common_config,
            google: GoogleConfig {
                api_key,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE))?,
            },
            chat: ChatConfig {
                model_key: get_env("CHAT_MODEL_KEY", Some(DEFAULT_CHAT_MODEL_KEY))?,
                system_instruction: get_env(
                    "CHAT_SYSTEM_INSTRUCTION",
                    Some(DEFAULT_SYSTEM_INSTRUCTION),
                )?,
            },
            server: ServerConfig {
                static_dir: PathBuf::from(get_env("STATIC_DIR", Some("public"))?),
                max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
        })
    }

    /// Defaults for everything except the listen port and key, for tests and
    /// embedding.
    pub fn with_port(port: u16, api_key: Option<String>) -> Self {
        RelayConfig {
            common: core_config::Config {
                port,
                log_level: "info".to_string(),
            },
            google: GoogleConfig {
                api_key: api_key.map(Secret::new),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            },
            chat: ChatConfig {
                model_key: DEFAULT_CHAT_MODEL_KEY.to_string(),
                system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            },
            server: ServerConfig {
                static_dir: PathBuf::from("public"),
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            otlp_endpoint: None,
        }
    }
}

/// Like [`get_env`], but a value that does not parse is a configuration error.
fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr + ToString,
    T::Err: Display,
{
    let raw = get_env(key, Some(&default.to_string()))?;
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value = parse_env("GENAI_RELAY_TEST_UNSET_LIMIT", 4096usize).unwrap();
        assert_eq!(value, 4096);
    }

    #[test]
    fn test_parse_env_reads_value() {
        env::set_var("GENAI_RELAY_TEST_GOOD_LIMIT", " 2048 ");
        let value = parse_env("GENAI_RELAY_TEST_GOOD_LIMIT", 4096usize).unwrap();
        assert_eq!(value, 2048);
    }

    #[test]
    fn test_parse_env_rejects_malformed_value() {
        env::set_var("GENAI_RELAY_TEST_BAD_LIMIT", "10MB");
        let err = parse_env("GENAI_RELAY_TEST_BAD_LIMIT", 4096usize).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GENAI_RELAY_TEST_BAD_LIMIT"));
    }
}
