use std::path::PathBuf;

use assistant::GeminiConfig;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/smartshop.toml";
const LOG_FILE: &str = "smartshop_tui.log";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub timezone: String,
    pub log_level: String,
    pub assistant: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            timezone: "Asia/Shanghai".to_string(),
            log_level: "info".to_string(),
            assistant: GeminiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Invalid(format!("timezone {}: {err}", self.timezone)))
    }

    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub fn log_filter(&self) -> String {
        format!(
            "smartshop_tui={level},engine={level},assistant={level}",
            level = self.log_level
        )
    }
}

#[derive(Debug, Parser)]
#[command(name = "smartshop_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level.
    #[arg(long)]
    log_level: Option<String>,
    /// Override the Gemini model.
    #[arg(long)]
    model: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix("SMARTSHOP")
            .prefix_separator("_")
            .separator("__"),
    );
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(model) = args.model {
        settings.assistant.model = model;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert!(config.tz().is_ok());
        assert_eq!(config.log_path(), PathBuf::from("data/smartshop_tui.log"));
        assert_eq!(
            config.log_filter(),
            "smartshop_tui=info,engine=info,assistant=info"
        );
    }
}
