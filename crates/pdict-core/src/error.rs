use std::path::PathBuf;

use pdict_lookup::LookupError;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cannot open cache index {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Cannot prepare cache directory {path}: {source}")]
    Layout {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Index and blob storage disagree
    #[error("Cache corrupted at entry {entry_id}: {reason}")]
    Corrupted { entry_id: String, reason: String },
}

impl CacheError {
    pub fn corrupted(entry_id: &str, reason: impl Into<String>) -> Self {
        Self::Corrupted {
            entry_id: entry_id.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Remote lookup failed: {0}")]
    Remote(#[from] LookupError),
}
