use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Global user configuration loaded from `~/.spindle/config.toml`.
///
/// Repositories named here are available to every workspace; credentials are
/// matched to repositories by name so secrets stay out of project manifests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub repositories: BTreeMap<String, String>,

    #[serde(default)]
    pub credentials: BTreeMap<String, CredentialEntry>,
}

/// Credential entry for a named repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialEntry {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Bearer token, used instead of basic auth when set.
    #[serde(default)]
    pub token: Option<String>,
}

impl GlobalConfig {
    /// Load the global configuration, or defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        let path = Self::default_path();
        if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                spindle_util::errors::SpindleError::Generic {
                    message: format!("Failed to read global config: {e}"),
                }
            })?;
            toml::from_str(&content).map_err(|e| {
                spindle_util::errors::SpindleError::Generic {
                    message: format!("Failed to parse global config: {e}"),
                }
                .into()
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the Spindle data directory (`~/.spindle/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".spindle")
}
