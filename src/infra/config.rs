use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::SorterError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Folders remembered between sessions. Empty strings mean "not chosen yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub image_folder: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub target_folder: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        _ => String::new(),
    })
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to (and re-persisting) the empty
    /// default when the file is missing or unreadable as a JSON object.
    pub fn load_or_reset(&self) -> Result<AppConfig, SorterError> {
        let parsed = fs::read_to_string(&self.path)
            .map_err(|error| error.to_string())
            .and_then(|raw| parse_config(&raw));

        match parsed {
            Ok(config) => {
                log::info!("loaded config from {}", self.path.display());
                Ok(config)
            }
            Err(reason) => {
                log::info!(
                    "resetting config at {} ({reason})",
                    self.path.display()
                );
                let config = AppConfig::default();
                self.save(&config)?;
                Ok(config)
            }
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), SorterError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SorterError::WriteConfig {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, encode_config(config)?).map_err(|source| {
            SorterError::WriteConfig {
                path: self.path.clone(),
                source,
            }
        })
    }
}

fn parse_config(raw: &str) -> Result<AppConfig, String> {
    match serde_json::from_str::<Value>(raw).map_err(|error| error.to_string())? {
        document @ Value::Object(_) => {
            serde_json::from_value(document).map_err(|error| error.to_string())
        }
        _ => Err("config is not a JSON object".to_string()),
    }
}

fn encode_config(config: &AppConfig) -> Result<Vec<u8>, SorterError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    config.serialize(&mut serializer)?;
    Ok(out)
}
