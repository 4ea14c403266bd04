use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DICTIONARY_KEY_ENV: &str = "MW_DICTIONARY_KEY";

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct MerriamWebsterKeys {
    pub dictionary: Option<String>,
}

/// Contents of `keys.json`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ApiKeys {
    pub merriam_webster: MerriamWebsterKeys,
}

impl ApiKeys {
    /// Read the keys file. A missing file is only an error if the
    /// environment does not provide the dictionary key either.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut keys = if path.exists() {
            let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::debug!("No keys file at {}", path.display());
            ApiKeys::default()
        };

        if let Ok(key) = env::var(DICTIONARY_KEY_ENV) {
            keys.merriam_webster.dictionary = Some(key);
        }

        Ok(keys)
    }

    /// Collegiate dictionary key, required for any remote lookup
    pub fn dictionary_key(&self, path: &Path) -> Result<&str, ConfigError> {
        self.merriam_webster
            .dictionary
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingKey {
                name: "merriam_webster.dictionary".to_string(),
                path: path.to_path_buf(),
            })
    }
}
