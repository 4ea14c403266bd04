//! Entry cache
//!
//! Two-table SQLite index plus one JSON blob per dictionary entry:
//!
//! - `words (word, entry_id)`: every word an entry can be reached by. An
//!   entry is indexed under all of its stems and under the word that was
//!   originally queried, so one blob serves many words.
//! - `word_entries (entry_id, file)`: the blob backing each entry.
//!
//! Removing a word only drops its `words` rows. Blobs that lose their last
//! referencing word stay on disk until [`EntryCache::garbage_collect`] runs,
//! which reclaims them in one pass.
//!
//! The cache assumes a single writer. Nothing beyond SQLite's own locking
//! guards the index, so two processes sharing a cache directory can lose
//! updates or collect blobs the other one still needs.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use pdict_config::cache::CacheConfig;
use pdict_types::{DictionaryEntry, EntryId};
use rusqlite::{Connection, params};
use serde_json::Value;
use tempfile::Builder;

use crate::error::CacheError;

/// Prefix of blobs being written; one left behind means a write was cut short
const PENDING_PREFIX: &str = ".pending-";

/// Outcome of a garbage collection pass
#[derive(Debug, Default)]
pub struct GcReport {
    /// Orphaned entries whose index row and blob were deleted
    pub removed: Vec<EntryId>,
    /// Blob files no index row pointed to
    pub stray_files: usize,
}

pub struct EntryCache {
    conn: Connection,
    entries_dir: PathBuf,
}

impl EntryCache {
    /// Open (or create) the cache described by `config`.
    pub fn open(config: &CacheConfig) -> Result<Self, CacheError> {
        let entries_dir = config.entries_dir();
        fs::create_dir_all(&entries_dir).map_err(|source| CacheError::Layout {
            path: entries_dir.clone(),
            source,
        })?;

        let index_path = config.index_path();
        let conn = Connection::open(&index_path).map_err(|source| CacheError::Open {
            path: index_path.clone(),
            source,
        })?;

        let cache = Self { conn, entries_dir };
        cache.init_schema().map_err(|source| CacheError::Open {
            path: index_path,
            source,
        })?;

        tracing::debug!("Opened entry cache at {}", config.root.display());
        Ok(cache)
    }

    fn init_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS words (
                id INTEGER PRIMARY KEY,
                word TEXT NOT NULL,
                entry_id TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_words_word ON words(word);
            CREATE INDEX IF NOT EXISTS idx_words_entry ON words(entry_id);
            CREATE TABLE IF NOT EXISTS word_entries (
                entry_id TEXT PRIMARY KEY,
                file TEXT NOT NULL
            );",
        )
    }

    /// Entries indexed under exactly `word`. Empty means a cache miss.
    pub fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, CacheError> {
        let mut stmt = self.conn.prepare(
            "SELECT words.entry_id, word_entries.file
             FROM words
             LEFT JOIN word_entries ON words.entry_id = word_entries.entry_id
             WHERE words.word = ?1
             ORDER BY words.id",
        )?;

        let rows = stmt
            .query_map(params![word], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(entry_id, file)| self.read_entry(&entry_id, file))
            .collect()
    }

    fn read_entry(&self, entry_id: &str, file: Option<String>) -> Result<DictionaryEntry, CacheError> {
        let file = file.ok_or_else(|| CacheError::corrupted(entry_id, "no blob registered"))?;
        let path = self.entries_dir.join(file);

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CacheError::corrupted(
                    entry_id,
                    format!("blob {} is missing", path.display()),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_str(&data).map_err(|e| {
            CacheError::corrupted(entry_id, format!("blob {} is unreadable: {e}", path.display()))
        })?;

        DictionaryEntry::from_value(value)
            .ok_or_else(|| CacheError::corrupted(entry_id, "blob is not a dictionary entry"))
    }

    /// Store `entries` as the result of looking up `word`.
    ///
    /// Each entry is written in its own transaction: stale rows for the
    /// entry are replaced and the blob is written before the commit, so an
    /// interrupted save never leaves index rows without their blob.
    pub fn save(&mut self, word: &str, entries: &[DictionaryEntry]) -> Result<(), CacheError> {
        for entry in entries {
            self.save_entry(word, entry)?;
        }

        Ok(())
    }

    fn save_entry(&mut self, word: &str, entry: &DictionaryEntry) -> Result<(), CacheError> {
        let id = entry.id();
        let file = id.file_name();
        let words: BTreeSet<&str> = entry
            .stems
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(word))
            .filter(|w| !w.is_empty())
            .collect();

        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM word_entries WHERE entry_id = ?1",
            params![id.as_str()],
        )?;

        for stem in &words {
            tx.execute(
                "DELETE FROM words WHERE word = ?1 AND entry_id = ?2",
                params![stem, id.as_str()],
            )?;
            tx.execute(
                "INSERT INTO words (word, entry_id) VALUES (?1, ?2)",
                params![stem, id.as_str()],
            )?;
        }

        tx.execute(
            "INSERT INTO word_entries (entry_id, file) VALUES (?1, ?2)",
            params![id.as_str(), file],
        )?;

        write_blob(&self.entries_dir, &file, entry.raw())?;
        tx.commit()?;

        tracing::debug!("Saved entry {} under {} words", id, words.len());
        Ok(())
    }

    /// Drop every index row for `word`. Returns how many were removed.
    pub fn remove(&mut self, word: &str) -> Result<usize, CacheError> {
        let removed = self
            .conn
            .execute("DELETE FROM words WHERE word = ?1", params![word])?;

        if removed == 0 {
            tracing::debug!("Nothing to remove for '{}'", word);
        }

        Ok(removed)
    }

    /// Delete entries no word refers to anymore, along with their blobs.
    pub fn garbage_collect(&mut self) -> Result<GcReport, CacheError> {
        let tx = self.conn.transaction()?;

        let orphans = {
            let mut stmt = tx.prepare(
                "SELECT word_entries.entry_id, word_entries.file
                 FROM word_entries
                 LEFT JOIN words ON word_entries.entry_id = words.entry_id
                 WHERE words.entry_id IS NULL",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        tx.execute(
            "DELETE FROM word_entries
             WHERE entry_id NOT IN (SELECT entry_id FROM words)",
            [],
        )?;
        tx.commit()?;

        let mut report = GcReport::default();

        for (entry_id, file) in orphans {
            match fs::remove_file(self.entries_dir.join(&file)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!("Blob {} for orphaned entry {} was already gone", file, entry_id);
                }
                Err(e) => return Err(e.into()),
            }
            report.removed.push(EntryId::normalize(&entry_id));
        }

        report.stray_files = self.sweep_stray_files()?;

        tracing::info!(
            "Garbage collection removed {} entries and {} stray files",
            report.removed.len(),
            report.stray_files
        );
        Ok(report)
    }

    /// Remove `*.json` blobs that no index row points to, and leftovers of
    /// interrupted writes
    fn sweep_stray_files(&self) -> Result<usize, CacheError> {
        let known: HashSet<String> = {
            let mut stmt = self.conn.prepare("SELECT file FROM word_entries")?;
            let files = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<HashSet<_>, _>>()?;
            files
        };

        let mut swept = 0;
        for dir_entry in fs::read_dir(&self.entries_dir)? {
            let path = dir_entry?.path();
            let is_blob = path.extension().is_some_and(|ext| ext == "json");
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let is_pending = name.starts_with(PENDING_PREFIX);

            if is_pending || (is_blob && !known.contains(name)) {
                tracing::debug!("Removing stray blob {}", path.display());
                fs::remove_file(&path)?;
                swept += 1;
            }
        }

        Ok(swept)
    }

    /// Reset the cache: all index rows and all blobs are deleted.
    pub fn purge(&mut self) -> Result<(), CacheError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM words", [])?;
        tx.execute("DELETE FROM word_entries", [])?;
        tx.commit()?;

        match fs::remove_dir_all(&self.entries_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&self.entries_dir)?;

        tracing::info!("Purged entry cache");
        Ok(())
    }

    /// Number of word → entry associations
    pub fn count(&self) -> Result<u64, CacheError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of distinct stored entries
    pub fn entry_count(&self) -> Result<u64, CacheError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM word_entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Up to `n` indexed words, in no particular order
    pub fn list_sample(&self, n: usize) -> Result<Vec<String>, CacheError> {
        let mut stmt = self.conn.prepare("SELECT word FROM words LIMIT ?1")?;
        let words = stmt
            .query_map(params![n as i64], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words)
    }

    pub fn entry_path(&self, id: &EntryId) -> PathBuf {
        self.entries_dir.join(id.file_name())
    }
}

fn write_blob(dir: &Path, file: &str, value: &Value) -> Result<(), CacheError> {
    let temp_file = Builder::new().prefix(PENDING_PREFIX).tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
    }
    temp_file.persist(dir.join(file)).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn create_test_cache() -> (TempDir, EntryCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = EntryCache::open(&CacheConfig::at(dir.path())).unwrap();
        (dir, cache)
    }

    fn entry(id: &str, stems: &[&str]) -> DictionaryEntry {
        DictionaryEntry::from_value(json!({
            "meta": { "id": id, "stems": stems },
            "fl": "verb",
            "shortdef": [format!("definition of {id}")]
        }))
        .unwrap()
    }

    fn ids(entries: &[DictionaryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id().as_str()).collect()
    }

    fn blob_files(dir: &TempDir) -> BTreeSet<String> {
        fs::read_dir(dir.path().join("entries"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_lookup_miss_is_empty() {
        let (_dir, cache) = create_test_cache();
        assert!(cache.lookup("run").unwrap().is_empty());
        assert_eq!(cache.count().unwrap(), 0);
    }

    #[test]
    fn test_save_indexes_every_stem() {
        let (_dir, mut cache) = create_test_cache();
        let run = entry("run:1", &["run", "ran", "running"]);

        cache.save("run", &[run.clone()]).unwrap();

        assert_eq!(cache.lookup("ran").unwrap(), vec![run.clone()]);
        assert_eq!(cache.lookup("running").unwrap(), vec![run]);
        assert_eq!(cache.count().unwrap(), 3);
        assert_eq!(cache.entry_count().unwrap(), 1);
    }

    #[test]
    fn test_queried_word_is_indexed_too() {
        let (_dir, mut cache) = create_test_cache();

        cache.save("sprinting", &[entry("sprint", &["sprint"])]).unwrap();

        assert_eq!(ids(&cache.lookup("sprinting").unwrap()), vec!["sprint"]);
        assert_eq!(cache.count().unwrap(), 2);
    }

    #[test]
    fn test_save_is_idempotent() {
        let (_dir, mut cache) = create_test_cache();
        let entries = vec![entry("run:1", &["run", "ran"]), entry("run:2", &["run"])];

        cache.save("run", &entries).unwrap();
        let first = cache.lookup("run").unwrap();
        let count = cache.count().unwrap();

        cache.save("run", &entries).unwrap();

        assert_eq!(cache.lookup("run").unwrap(), first);
        assert_eq!(cache.count().unwrap(), count);
        assert_eq!(cache.entry_count().unwrap(), 2);
    }

    #[test]
    fn test_resave_keeps_other_trigger_words() {
        let (_dir, mut cache) = create_test_cache();
        let run = entry("run:1", &["run", "ran"]);

        cache.save("runs", &[run.clone()]).unwrap();
        cache.save("run", &[run]).unwrap();

        assert_eq!(ids(&cache.lookup("runs").unwrap()), vec!["run:1"]);
        assert_eq!(cache.count().unwrap(), 3);
    }

    #[test]
    fn test_blob_is_stored_verbatim() {
        let (_dir, mut cache) = create_test_cache();
        let run = entry("run:1", &["run"]);

        cache.save("run", &[run.clone()]).unwrap();

        let data = fs::read_to_string(cache.entry_path(run.id())).unwrap();
        let stored: Value = serde_json::from_str(&data).unwrap();
        assert_eq!(&stored, run.raw());
    }

    #[test]
    fn test_remove_absent_word_is_noop() {
        let (_dir, mut cache) = create_test_cache();
        assert_eq!(cache.remove("ghost").unwrap(), 0);
    }

    #[test]
    fn test_remove_keeps_blobs_until_gc() {
        let (dir, mut cache) = create_test_cache();
        cache.save("zeal", &[entry("zeal", &["zeal"])]).unwrap();

        assert_eq!(cache.remove("zeal").unwrap(), 1);

        assert!(cache.lookup("zeal").unwrap().is_empty());
        assert_eq!(blob_files(&dir).len(), 1);
    }

    #[test]
    fn test_gc_after_remove_keeps_shared_entries() {
        let (dir, mut cache) = create_test_cache();
        let shared = entry("run:1", &["run", "ran"]);
        let only_run = entry("run:2", &["run"]);
        cache.save("run", &[shared.clone(), only_run.clone()]).unwrap();

        cache.remove("run").unwrap();
        let report = cache.garbage_collect().unwrap();

        assert_eq!(report.removed, vec![only_run.id().clone()]);
        assert!(!cache.entry_path(only_run.id()).exists());
        assert!(cache.entry_path(shared.id()).exists());
        assert_eq!(cache.lookup("ran").unwrap(), vec![shared]);
        assert_eq!(blob_files(&dir).len(), 1);
    }

    #[test]
    fn test_gc_leaves_only_referenced_blobs() {
        let (dir, mut cache) = create_test_cache();
        cache.save("run", &[entry("run:1", &["run", "ran"])]).unwrap();
        cache.save("walk", &[entry("walk:1", &["walk"])]).unwrap();
        cache.save("zeal", &[entry("zeal", &["zeal"])]).unwrap();
        cache.remove("walk").unwrap();
        cache.remove("zeal").unwrap();

        cache.garbage_collect().unwrap();

        assert_eq!(blob_files(&dir), BTreeSet::from(["run:1.json".to_string()]));
        assert_eq!(cache.entry_count().unwrap(), 1);
    }

    #[test]
    fn test_gc_sweeps_stray_blobs() {
        let (dir, mut cache) = create_test_cache();
        cache.save("run", &[entry("run:1", &["run"])]).unwrap();
        fs::write(dir.path().join("entries").join("leftover.json"), "{}").unwrap();

        let report = cache.garbage_collect().unwrap();

        assert!(report.removed.is_empty());
        assert_eq!(report.stray_files, 1);
        assert_eq!(blob_files(&dir), BTreeSet::from(["run:1.json".to_string()]));
    }

    #[test]
    fn test_gc_sweeps_interrupted_writes() {
        let (dir, mut cache) = create_test_cache();
        cache.save("run", &[entry("run:1", &["run"])]).unwrap();
        let pending = Builder::new()
            .prefix(PENDING_PREFIX)
            .tempfile_in(dir.path().join("entries"))
            .unwrap();
        let (_, pending_path) = pending.keep().unwrap();

        let report = cache.garbage_collect().unwrap();

        assert_eq!(report.stray_files, 1);
        assert!(!pending_path.exists());
        assert_eq!(blob_files(&dir), BTreeSet::from(["run:1.json".to_string()]));
    }

    #[test]
    fn test_failed_blob_write_rolls_back_entry() {
        let (dir, mut cache) = create_test_cache();
        cache.save("a", &[entry("a:1", &["a"])]).unwrap();
        let entries = dir.path().join("entries");
        fs::remove_dir_all(&entries).unwrap();
        fs::write(&entries, "").unwrap();

        let result = cache.save("b", &[entry("b:1", &["b", "bee"])]);

        assert!(result.is_err());
        assert_eq!(cache.count().unwrap(), 1);
        assert_eq!(cache.entry_count().unwrap(), 1);
        assert!(cache.lookup("bee").unwrap().is_empty());
    }

    #[test]
    fn test_missing_blob_is_corruption() {
        let (_dir, mut cache) = create_test_cache();
        let run = entry("run:1", &["run"]);
        cache.save("run", &[run.clone()]).unwrap();
        fs::remove_file(cache.entry_path(run.id())).unwrap();

        let err = cache.lookup("run").unwrap_err();

        assert!(err.is_corruption());
    }

    #[test]
    fn test_unreadable_blob_is_corruption() {
        let (_dir, mut cache) = create_test_cache();
        let run = entry("run:1", &["run"]);
        cache.save("run", &[run.clone()]).unwrap();
        fs::write(cache.entry_path(run.id()), "not json").unwrap();

        let err = cache.lookup("run").unwrap_err();

        assert!(matches!(err, CacheError::Corrupted { ref entry_id, .. } if entry_id == "run:1"));
    }

    #[test]
    fn test_purge_resets_cache() {
        let (dir, mut cache) = create_test_cache();
        cache.save("run", &[entry("run:1", &["run", "ran"])]).unwrap();

        cache.purge().unwrap();

        assert_eq!(cache.count().unwrap(), 0);
        assert!(blob_files(&dir).is_empty());

        cache.save("walk", &[entry("walk:1", &["walk"])]).unwrap();
        assert_eq!(cache.count().unwrap(), 1);
    }

    #[test]
    fn test_list_sample_respects_limit() {
        let (_dir, mut cache) = create_test_cache();
        cache.save("run", &[entry("run:1", &["run", "ran", "running"])]).unwrap();

        let sample = cache.list_sample(2).unwrap();

        assert_eq!(sample.len(), 2);
        assert!(sample.iter().all(|w| ["run", "ran", "running"].contains(&w.as_str())));
        assert_eq!(cache.list_sample(10).unwrap().len(), 3);
    }

    #[test]
    fn test_index_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::at(dir.path());
        {
            let mut cache = EntryCache::open(&config).unwrap();
            cache.save("run", &[entry("run:1", &["run"])]).unwrap();
        }

        let cache = EntryCache::open(&config).unwrap();

        assert_eq!(ids(&cache.lookup("run").unwrap()), vec!["run:1"]);
    }

    #[test]
    fn test_open_rejects_foreign_index_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("meta.db"), vec![b'x'; 1024]).unwrap();

        let result = EntryCache::open(&CacheConfig::at(dir.path()));

        assert!(matches!(result, Err(CacheError::Open { .. })));
    }
}
