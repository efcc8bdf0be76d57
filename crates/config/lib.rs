use rental::Locale;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG: &str = ".bike-stat.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] io::Error),

    #[error("config yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn default_source() -> String {
    "main_data.csv".to_string()
}

fn default_report() -> String {
    "report.csv".to_string()
}

fn default_date_formats() -> Vec<String> {
    vec![
        "%Y-%m-%d".to_string(),
        "%Y/%m/%d".to_string(),
        "%m/%d/%Y".to_string(),
    ]
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    #[serde(default = "default_report")]
    pub report: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: default_source(),
            locale: Locale::default(),
            date_formats: default_date_formats(),
            report: default_report(),
        }
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(filename)?;
        Config::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Config, ConfigError> {
        // an empty document is a null value, treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Like [`Config::new`], but a file that does not exist yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
        match Config::new(filename) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                Ok(Config::default())
            }
            other => other,
        }
    }
}
