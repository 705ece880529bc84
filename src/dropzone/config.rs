use crate::error::{DropzoneError, Result};
use crate::mimetype::{Accept, MimeAliases};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const ALIAS_PREFIX: &str = "alias.";

/// Configuration for dropzone, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DropzoneConfig {
    /// Directory uploads land in when the caller names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<PathBuf>,

    /// Default accepted mimetypes (or one alias). Empty accepts anything.
    #[serde(default)]
    pub accept: Vec<String>,

    /// Extra mimetype aliases on top of the built-in `image` and `text`
    #[serde(default)]
    pub mime_aliases: BTreeMap<String, Vec<String>>,
}

impl DropzoneConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DropzoneError::Io)?;
        let config: DropzoneConfig =
            serde_json::from_str(&content).map_err(DropzoneError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DropzoneError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DropzoneError::Serialization)?;
        fs::write(config_path, content).map_err(DropzoneError::Io)?;
        Ok(())
    }

    pub fn aliases(&self) -> MimeAliases {
        MimeAliases::with_extra(&self.mime_aliases)
    }

    pub fn default_accept(&self) -> Option<Accept> {
        Accept::from_values(&self.accept)
    }

    /// All keys with their display values, in a stable order.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("upload-dir".to_string(), self.get("upload-dir").unwrap_or_default()),
            ("accept".to_string(), self.get("accept").unwrap_or_default()),
        ];
        for (name, types) in &self.mime_aliases {
            entries.push((format!("{}{}", ALIAS_PREFIX, name), types.join(",")));
        }
        entries
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "upload-dir" => Some(
                self.upload_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "accept" => Some(self.accept.join(",")),
            other => other
                .strip_prefix(ALIAS_PREFIX)
                .and_then(|name| self.mime_aliases.get(name))
                .map(|types| types.join(",")),
        }
    }

    /// Set a key from its string form. An empty value clears the key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "upload-dir" => {
                self.upload_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value.trim()))
                };
            }
            "accept" => self.accept = split_list(value),
            other => match other.strip_prefix(ALIAS_PREFIX) {
                Some(name) if !name.is_empty() => {
                    let types = split_list(value);
                    if types.is_empty() {
                        self.mime_aliases.remove(name);
                    } else {
                        self.mime_aliases.insert(name.to_string(), types);
                    }
                }
                _ => {
                    return Err(DropzoneError::Config(format!(
                        "Unknown config key: {}",
                        key
                    )))
                }
            },
        }
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
