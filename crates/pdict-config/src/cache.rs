use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const INDEX_FILE: &str = "meta.db";
const KEYS_FILE: &str = "keys.json";
const SETTINGS_FILE: &str = "config.json";
const CHECKPOINT_FILE: &str = "last_check";
const ENTRIES_DIR: &str = "entries";

fn default_root() -> PathBuf {
    if let Ok(home) = env::var("PDICT_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".personaldictionary")
}

/// Layout of the cache directory
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl CacheConfig {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// SQLite index file
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn keys_path(&self) -> PathBuf {
        self.root.join(KEYS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// Time of the last history scan
    pub fn checkpoint_path(&self) -> PathBuf {
        self.root.join(CHECKPOINT_FILE)
    }

    /// One `<entry id>.json` blob per stored entry
    pub fn entries_dir(&self) -> PathBuf {
        self.root.join(ENTRIES_DIR)
    }
}
