use std::sync::Arc;

use pdict_lookup::{LookupError, RemoteLookup};
use pdict_types::{DictionaryEntry, Source};
use serde_json::Value;

use crate::cache::EntryCache;
use crate::error::ServiceError;

#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Skip the cache and always ask the remote dictionary
    pub force_online: bool,
    /// Store remote results in the cache
    pub persist: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            force_online: false,
            persist: true,
        }
    }
}

#[derive(Debug)]
pub enum CheckOutcome {
    Found {
        entries: Vec<DictionaryEntry>,
        source: Source,
        /// Whether the entries were written to the cache by this check
        saved: bool,
    },
    /// The dictionary has no entry for the word. `suggestions` holds the
    /// spellings it proposed instead, if any.
    NotFound {
        word: String,
        suggestions: Vec<String>,
    },
}

/// Resolves single words, cache first
pub struct WordService {
    cache: EntryCache,
    remote: Arc<dyn RemoteLookup>,
}

impl WordService {
    pub fn new(cache: EntryCache, remote: Arc<dyn RemoteLookup>) -> Self {
        Self { cache, remote }
    }

    pub fn cache(&self) -> &EntryCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut EntryCache {
        &mut self.cache
    }

    pub async fn check(
        &mut self,
        word: &str,
        options: CheckOptions,
    ) -> Result<CheckOutcome, ServiceError> {
        if !options.force_online {
            let cached = self.cache.lookup(word)?;
            if !cached.is_empty() {
                tracing::debug!("Cache hit for '{}': {} entries", word, cached.len());
                return Ok(CheckOutcome::Found {
                    entries: cached,
                    source: Source::Cache,
                    saved: false,
                });
            }
        }

        tracing::debug!("Asking {} for '{}'", self.remote.metadata().name, word);
        let payload = match self.remote.fetch(word).await {
            Ok(payload) => payload,
            Err(LookupError::MalformedResponse(reason)) => {
                tracing::warn!("Unusable response for '{}': {}", word, reason);
                return Ok(not_found(word, Vec::new()));
            }
            Err(e) => return Err(e.into()),
        };

        let entries = match parse_entries(payload) {
            Ok(entries) => entries,
            Err(suggestions) => return Ok(not_found(word, suggestions)),
        };

        let saved = if options.persist {
            self.cache.save(word, &entries)?;
            true
        } else {
            false
        };

        Ok(CheckOutcome::Found {
            entries,
            source: Source::Remote,
            saved,
        })
    }
}

fn not_found(word: &str, suggestions: Vec<String>) -> CheckOutcome {
    CheckOutcome::NotFound {
        word: word.to_string(),
        suggestions,
    }
}

/// Entries of a usable payload: a non-empty array in which every element
/// is an entry object. Anything else yields the string elements, which the
/// dictionary sends as spelling suggestions.
fn parse_entries(payload: Value) -> Result<Vec<DictionaryEntry>, Vec<String>> {
    let Value::Array(items) = payload else {
        return Err(Vec::new());
    };

    let suggestions: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(suggestions);
    }

    items
        .into_iter()
        .map(DictionaryEntry::from_value)
        .collect::<Option<Vec<_>>>()
        .ok_or(suggestions)
}
