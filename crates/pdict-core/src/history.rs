use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// A browser history store that can be searched for translated phrases
pub trait HistorySource {
    /// Human readable source name, used in logs and reports
    fn name(&self) -> &str;

    /// Phrases submitted to an online translator since `since`
    fn extract(&self, since: DateTime<Utc>) -> Result<Vec<String>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History database not found: {0}")]
    NotFound(PathBuf),

    #[error("Browser profile error: {0}")]
    Profile(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
