use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Characters that never make it into an entry file name
const DISALLOWED_ID_CHARS: [char; 8] = [',', '.', '!', '?', '/', '~', '\\', '\0'];

/// Where a checked word was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Cache,
    Remote,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Cache => f.write_str("cache"),
            Source::Remote => f.write_str("remote"),
        }
    }
}

/// Normalized entry identifier, safe to use as a file stem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    /// Build an id from the API's own `meta.id`
    pub fn normalize(raw: &str) -> Self {
        Self(raw.chars().filter(|c| !DISALLOWED_ID_CHARS.contains(c)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blob file name for this entry
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Alternate run-on form of a headword (e.g. "runner" under "run")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryForm {
    pub form: String,
    pub part_of_speech: String,
}

/// One lexical record returned by the dictionary API.
///
/// The typed fields are a view over `raw`, which is kept verbatim so the
/// stored blob is exactly what the API returned.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    id: EntryId,
    pub stems: Vec<String>,
    pub part_of_speech: String,
    pub definitions: Vec<String>,
    pub secondary: Vec<SecondaryForm>,
    raw: Value,
}

impl DictionaryEntry {
    /// Parse an API record. Returns `None` unless the value is an object
    /// with a `meta` object carrying a string `id`.
    pub fn from_value(raw: Value) -> Option<Self> {
        let meta = raw.get("meta")?.as_object()?;
        let id = EntryId::normalize(meta.get("id")?.as_str()?);

        let stems = meta
            .get("stems")
            .and_then(Value::as_array)
            .map(|stems| strings(stems))
            .unwrap_or_default();

        let part_of_speech = raw
            .get("fl")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let definitions = raw
            .get("shortdef")
            .and_then(Value::as_array)
            .map(|defs| strings(defs))
            .unwrap_or_default();

        let secondary = raw
            .get("uros")
            .and_then(Value::as_array)
            .map(|uros| {
                uros.iter()
                    .map(|uro| SecondaryForm {
                        form: field(uro, "ure"),
                        part_of_speech: field(uro, "fl"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            id,
            stems,
            part_of_speech,
            definitions,
            secondary,
            raw,
        })
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// First stem, falling back to the id without its homograph suffix
    pub fn headword(&self) -> &str {
        match self.stems.first() {
            Some(stem) => stem,
            None => self.id.as_str().split(':').next().unwrap_or_default(),
        }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

fn strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
