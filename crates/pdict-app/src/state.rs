use std::sync::Arc;

use anyhow::Context;
use pdict_config::Config;
use pdict_core::{EntryCache, WordService};
use pdict_lang_english::MerriamWebster;

/// Configuration plus constructors for what commands need
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Open the local dictionary. Failing here is fatal for every command.
    pub fn open_cache(&self) -> anyhow::Result<EntryCache> {
        EntryCache::open(&self.config.cache).with_context(|| {
            format!(
                "Cannot connect to local dictionary in {}",
                self.config.cache.root.display()
            )
        })
    }

    /// Cache plus remote dictionary; requires the API key
    pub fn word_service(&self) -> anyhow::Result<WordService> {
        let keys_path = self.config.cache.keys_path();
        let keys = self.config.api_keys()?;
        let api_key = keys.dictionary_key(&keys_path)?.to_string();

        let remote = MerriamWebster::new(api_key, self.config.dictionary.api_url.clone());
        Ok(WordService::new(self.open_cache()?, Arc::new(remote)))
    }
}
