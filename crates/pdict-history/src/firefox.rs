use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pdict_config::history::HistoryConfig;
use pdict_core::history::{HistoryError, HistorySource};

use crate::snapshot::HistorySnapshot;
use crate::translators::extract_phrase;

const QUERY: &str = "SELECT url FROM moz_places
     WHERE (url LIKE ?1 OR url LIKE ?2) AND last_visit_date > ?3";

/// Firefox `places.sqlite` history
pub struct FirefoxHistory {
    profile_dir: PathBuf,
    target_lang: String,
}

impl FirefoxHistory {
    pub fn new(profile_dir: impl Into<PathBuf>, target_lang: impl Into<String>) -> Self {
        Self {
            profile_dir: profile_dir.into(),
            target_lang: target_lang.into(),
        }
    }

    /// Resolve the configured profile through `profiles.ini`
    pub fn from_config(config: &HistoryConfig) -> Result<Self, HistoryError> {
        let ini_path = config.firefox_root.join("profiles.ini");
        let ini = fs::read_to_string(&ini_path)
            .map_err(|_| HistoryError::NotFound(ini_path.clone()))?;

        let profile_dir = profile_path(&ini, &config.firefox_profile, &config.firefox_root)
            .ok_or_else(|| {
                HistoryError::Profile(format!(
                    "profile {} not found or incomplete in {}",
                    config.firefox_profile,
                    ini_path.display()
                ))
            })?;

        Ok(Self::new(profile_dir, config.target_lang.clone()))
    }

    fn database(&self) -> PathBuf {
        self.profile_dir.join("places.sqlite")
    }
}

impl HistorySource for FirefoxHistory {
    fn name(&self) -> &str {
        "Firefox"
    }

    fn extract(&self, since: DateTime<Utc>) -> Result<Vec<String>, HistoryError> {
        let snapshot = HistorySnapshot::open(&self.database())?;
        // moz_places stores microseconds since the Unix epoch
        let urls = snapshot.translator_urls(QUERY, since.timestamp_micros())?;
        tracing::debug!("Firefox: {} translator visits since {}", urls.len(), since);

        Ok(urls
            .iter()
            .filter_map(|url| extract_phrase(url, &self.target_lang))
            .collect())
    }
}

/// `Path` of `[section]` in a `profiles.ini`, resolved against `root`
/// unless the section says `IsRelative=0`.
fn profile_path(ini: &str, section: &str, root: &Path) -> Option<PathBuf> {
    let mut in_section = false;
    let mut path = None;
    let mut relative = true;

    for line in ini.lines().map(str::trim) {
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if in_section {
                break;
            }
            in_section = name == section;
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "Path" => path = Some(value.trim().to_string()),
                "IsRelative" => relative = value.trim() != "0",
                _ => {}
            }
        }
    }

    let path = path?;
    Some(if relative { root.join(path) } else { PathBuf::from(path) })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rusqlite::{Connection, params};

    use super::*;

    const PROFILES: &str = "[General]
StartWithLastProfile=1

[Profile1]
Name=work
IsRelative=0
Path=/opt/firefox/work

[Profile0]
Name=default
IsRelative=1
Path=abcd1234.default
Default=1
";

    #[test]
    fn relative_profile_is_joined_to_root() {
        let path = profile_path(PROFILES, "Profile0", Path::new("/home/u/.mozilla/firefox"));
        assert_eq!(path, Some(PathBuf::from("/home/u/.mozilla/firefox/abcd1234.default")));
    }

    #[test]
    fn absolute_profile_is_kept() {
        let path = profile_path(PROFILES, "Profile1", Path::new("/home/u/.mozilla/firefox"));
        assert_eq!(path, Some(PathBuf::from("/opt/firefox/work")));
    }

    #[test]
    fn unknown_profile_is_none() {
        assert_eq!(profile_path(PROFILES, "Profile7", Path::new("/")), None);
    }

    #[test]
    fn extracts_phrases_visited_after_since() {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join("places.sqlite")).unwrap();
        conn.execute_batch(
            "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url TEXT, last_visit_date INTEGER);",
        )
        .unwrap();

        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let before = since.timestamp_micros() - 1;
        let after = since.timestamp_micros() + 1;
        let rows = [
            ("https://translate.google.pl/?sl=en&tl=pl&text=old+news", before),
            ("https://translate.google.pl/?sl=en&tl=pl&text=fresh+bread", after),
            ("https://www.deepl.com/translator#en/pl/bright%20idea", after),
            ("https://example.com/", after),
        ];
        for (url, visited) in rows {
            conn.execute(
                "INSERT INTO moz_places (url, last_visit_date) VALUES (?1, ?2)",
                params![url, visited],
            )
            .unwrap();
        }
        drop(conn);

        let firefox = FirefoxHistory::new(dir.path(), "pl");
        let mut phrases = firefox.extract(since).unwrap();
        phrases.sort();

        assert_eq!(phrases, vec!["bright idea", "fresh bread"]);
    }

    #[test]
    fn missing_database_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let firefox = FirefoxHistory::new(dir.path(), "pl");

        let err = firefox.extract(Utc::now()).unwrap_err();

        assert!(matches!(err, HistoryError::NotFound(_)));
    }
}
