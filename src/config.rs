use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

pub const DEFAULT_FIELD_ID_LENGTH: usize = 8;
pub const DEFAULT_MAX_CUSTOM_FIELDS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "compact" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Length of the random token appended to generated field ids.
    pub field_id_length: usize,
    pub max_custom_fields: usize,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_id_length: DEFAULT_FIELD_ID_LENGTH,
            max_custom_fields: DEFAULT_MAX_CUSTOM_FIELDS,
            log_level: "info".to_string(),
            log_format: LogFormat::Plain,
        }
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = Config::default();
        let field_id_length =
            get_env_parse_or("FORM_FIELD_ID_LENGTH", defaults.field_id_length)?;
        if !(4..=32).contains(&field_id_length) {
            return Err(Error::Config(format!(
                "FORM_FIELD_ID_LENGTH must be between 4 and 32, got {}",
                field_id_length
            )));
        }

        Ok(Self {
            field_id_length,
            max_custom_fields: get_env_parse_or(
                "FORM_MAX_CUSTOM_FIELDS",
                defaults.max_custom_fields,
            )?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: get_env_parse_or("LOG_FORMAT", defaults.log_format)?,
        })
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

/// Returns the process configuration, falling back to defaults when
/// `init_config` has not run (library callers and tests).
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
