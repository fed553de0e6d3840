use std::str::FromStr;

use thiserror::Error;

use crate::navigation::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Settings read once at startup and passed to whoever needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub seed_example_question: bool,
    pub default_role: Role,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: LogFormat::Json,
            seed_example_question: true,
            default_role: Role::Student,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse::<LogFormat>()?,
            None => defaults.log_format,
        };
        let seed_example_question = match lookup("SEED_EXAMPLE_QUESTION") {
            Some(value) => parse_bool("SEED_EXAMPLE_QUESTION", &value)?,
            None => defaults.seed_example_question,
        };
        let default_role = match lookup("DEFAULT_ROLE") {
            Some(value) => value.parse::<Role>().map_err(|_| ConfigError::Invalid {
                name: "DEFAULT_ROLE",
                value,
            })?,
            None => defaults.default_role,
        };

        Ok(Self {
            log_level,
            log_format,
            seed_example_question,
            default_role,
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_owned(),
        }),
    }
}
