use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sd_core::core::LabelPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub game: GameConfig,
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults everywhere except the dataset path, for running without a
    /// config file.
    pub fn for_dataset(path: PathBuf) -> Self {
        Self {
            game: GameConfig::default(),
            dataset: DatasetConfig {
                path,
                review_column: default_review_column(),
                sentiment_column: default_sentiment_column(),
                delimiter: default_delimiter(),
            },
            classifier: ClassifierConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rounds: u32,
    pub time_limit_secs: Option<u64>,
    pub label_policy: LabelPolicy,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            time_limit_secs: None,
            label_policy: LabelPolicy::Lenient,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
    #[serde(default = "default_review_column")]
    pub review_column: String,
    #[serde(default = "default_sentiment_column")]
    pub sentiment_column: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_review_column() -> String {
    "review".to_owned()
}

fn default_sentiment_column() -> String {
    "sentiment".to_owned()
}

fn default_delimiter() -> String {
    ",".to_owned()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub lexicon: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests;
