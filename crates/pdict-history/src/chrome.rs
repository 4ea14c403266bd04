use std::path::PathBuf;

use chrono::{DateTime, Utc};
use pdict_config::history::HistoryConfig;
use pdict_core::history::{HistoryError, HistorySource};

use crate::snapshot::HistorySnapshot;
use crate::translators::extract_phrase;

const QUERY: &str = "SELECT url FROM urls
     WHERE (url LIKE ?1 OR url LIKE ?2) AND last_visit_time > ?3";

/// Microseconds between 1601-01-01 and 1970-01-01
const WEBKIT_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// Chrome `History` database
pub struct ChromeHistory {
    database: PathBuf,
    target_lang: String,
}

impl ChromeHistory {
    pub fn new(database: impl Into<PathBuf>, target_lang: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.chrome_history.clone(), config.target_lang.clone())
    }
}

pub(crate) fn to_webkit_micros(at: DateTime<Utc>) -> i64 {
    at.timestamp_micros() + WEBKIT_EPOCH_OFFSET_MICROS
}

impl HistorySource for ChromeHistory {
    fn name(&self) -> &str {
        "Chrome"
    }

    fn extract(&self, since: DateTime<Utc>) -> Result<Vec<String>, HistoryError> {
        let snapshot = HistorySnapshot::open(&self.database)?;
        let urls = snapshot.translator_urls(QUERY, to_webkit_micros(since))?;
        tracing::debug!("Chrome: {} translator visits since {}", urls.len(), since);

        Ok(urls
            .iter()
            .filter_map(|url| extract_phrase(url, &self.target_lang))
            .collect())
    }
}
