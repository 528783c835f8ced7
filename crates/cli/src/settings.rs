use std::path::PathBuf;

use assistant::GeminiConfig;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/smartshop.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub timezone: String,
    pub log_level: String,
    pub assistant: GeminiConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            timezone: "Asia/Shanghai".to_string(),
            log_level: "info".to_string(),
            assistant: GeminiConfig::default(),
        }
    }
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub timezone: Option<String>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn load(overrides: Overrides) -> Result<Self> {
        let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SMARTSHOP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings.with_overrides(overrides))
    }

    fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        self
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Invalid(format!("invalid timezone {}: {err}", self.timezone)))
    }

    /// Current calendar date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }

    pub fn log_filter(&self) -> String {
        format!(
            "smartshop={level},engine={level},assistant={level}",
            level = self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_values() {
        let settings = Settings::default().with_overrides(Overrides {
            data_dir: Some(PathBuf::from("/tmp/shop")),
            ..Overrides::default()
        });
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(settings.timezone, "Asia/Shanghai");
        assert_eq!(settings.assistant.model, "gemini-3-flash-preview");
    }

    #[test]
    fn timezone_must_be_iana() {
        let mut settings = Settings::default();
        assert!(settings.tz().is_ok());
        settings.timezone = "Mars/Olympus".to_string();
        assert!(matches!(settings.tz(), Err(AppError::Invalid(_))));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load(Overrides {
            config: Some("does/not/exist.toml".to_string()),
            log_level: Some("debug".to_string()),
            ..Overrides::default()
        })
        .unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(
            settings.log_filter(),
            "smartshop=debug,engine=debug,assistant=debug"
        );
    }
}
