use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use pdict_core::history::HistoryError;

/// Time of the last finished history scan, kept as microseconds since
/// the Unix epoch in a one-line file.
pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `None` if no scan has finished yet
    pub fn load(&self) -> Result<Option<DateTime<Utc>>, HistoryError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let parsed = data
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_micros);

        if parsed.is_none() {
            tracing::warn!(
                "Ignoring unreadable scan checkpoint in {}",
                self.path.display()
            );
        }

        Ok(parsed)
    }

    pub fn store(&self, at: DateTime<Utc>) -> Result<(), HistoryError> {
        fs::write(&self.path, at.timestamp_micros().to_string())?;
        Ok(())
    }
}
