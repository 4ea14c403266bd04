use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::dictionary::DictionaryConfig;
use self::history::HistoryConfig;

pub mod cache;
pub mod dictionary;
pub mod history;
pub mod keys;

pub use keys::ApiKeys;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub dictionary: DictionaryConfig,
    pub history: HistoryConfig,
}

impl Config {
    /// Defaults, with environment overrides applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `config.json` from the cache directory, if any
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::new();
        let settings = defaults.cache.settings_path();

        if !settings.exists() {
            return Ok(defaults);
        }

        let mut config = Self::from_file(&settings)?;
        // The file lives inside the root, so it cannot move it
        config.cache.root = defaults.cache.root;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn api_keys(&self) -> Result<ApiKeys, ConfigError> {
        ApiKeys::load(&self.cache.keys_path())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("API key {name} is missing, add it to {path}")]
    MissingKey { name: String, path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "history": { "target_lang": "de" } }"#).unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.history.target_lang, "de");
        assert_eq!(config.history.firefox_profile, Config::new().history.firefox_profile);
        assert!(config.dictionary.api_url.starts_with("https://"));
    }

    #[test]
    fn cache_layout_is_rooted() {
        let cache = CacheConfig::at("/tmp/pdict");

        assert_eq!(cache.index_path(), PathBuf::from("/tmp/pdict/meta.db"));
        assert_eq!(cache.entries_dir(), PathBuf::from("/tmp/pdict/entries"));
        assert_eq!(cache.keys_path(), PathBuf::from("/tmp/pdict/keys.json"));
    }

    #[test]
    fn keys_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        fs::write(
            &path,
            r#"{ "merriam_webster": { "dictionary": "abc", "thesaurus": "def" } }"#,
        )
        .unwrap();

        let keys = ApiKeys::load(&path).unwrap();

        // Keys for services pdict does not use are tolerated
        assert!(keys.merriam_webster.dictionary.is_some());
    }

    #[test]
    fn blank_dictionary_key_is_missing() {
        let keys = ApiKeys {
            merriam_webster: keys::MerriamWebsterKeys {
                dictionary: Some("  ".to_string()),
            },
        };

        let err = keys.dictionary_key(Path::new("keys.json")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { .. }));
    }
}
