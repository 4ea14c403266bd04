use std::fs;
use std::path::{Path, PathBuf};

use pdict_core::history::HistoryError;
use rusqlite::{Connection, OpenFlags, params};
use tempfile::TempDir;

use crate::translators::LIKE_PATTERNS;

/// Private copy of a browser history database.
///
/// Browsers keep their history file locked while running, so queries go
/// against a copy (including the write-ahead log, if there is one).
pub(crate) struct HistorySnapshot {
    conn: Connection,
    _dir: TempDir,
}

impl HistorySnapshot {
    pub(crate) fn open(database: &Path) -> Result<Self, HistoryError> {
        if !database.is_file() {
            return Err(HistoryError::NotFound(database.to_path_buf()));
        }

        let dir = tempfile::tempdir()?;
        let copy = dir.path().join("history.sqlite");
        fs::copy(database, &copy)?;

        let wal = sidecar(database, "-wal");
        if wal.is_file() {
            fs::copy(&wal, sidecar(&copy, "-wal"))?;
        }

        let conn = Connection::open_with_flags(
            &copy,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn, _dir: dir })
    }

    /// URLs matching a translator pattern, visited after `since`.
    ///
    /// `sql` must bind the two patterns as `?1`, `?2` and the time as `?3`.
    pub(crate) fn translator_urls(&self, sql: &str, since: i64) -> Result<Vec<String>, HistoryError> {
        let mut stmt = self.conn.prepare(sql)?;
        let urls = stmt
            .query_map(params![LIKE_PATTERNS[0], LIKE_PATTERNS[1], since], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(urls)
    }
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
