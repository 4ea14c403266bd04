pub mod checkpoint;
pub mod chrome;
pub mod firefox;
mod snapshot;
pub mod translators;

pub use checkpoint::Checkpoint;
pub use chrome::ChromeHistory;
pub use firefox::FirefoxHistory;

use pdict_config::history::HistoryConfig;
use pdict_core::history::HistorySource;

/// Every enabled browser whose history can be located
pub fn configured_sources(config: &HistoryConfig) -> Vec<Box<dyn HistorySource>> {
    let mut sources: Vec<Box<dyn HistorySource>> = Vec::new();

    if config.firefox_enabled {
        match FirefoxHistory::from_config(config) {
            Ok(firefox) => sources.push(Box::new(firefox)),
            Err(e) => tracing::warn!("Skipping Firefox history: {}", e),
        }
    }

    if config.chrome_enabled {
        sources.push(Box::new(ChromeHistory::from_config(config)));
    }

    sources
}
