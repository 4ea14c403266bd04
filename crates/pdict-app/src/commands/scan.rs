use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Utc};
use pdict_core::history::HistorySource;
use pdict_core::language::LanguageProcessor;
use pdict_core::{CheckOptions, CheckOutcome, WordService};
use pdict_history::Checkpoint;
use pdict_lang_english::EnglishProcessor;
use pdict_types::{DictionaryEntry, Source};

use crate::commands::ScanArgs;
use crate::render;
use crate::state::AppState;

/// Per-word results of a scan
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Words resolved by the online dictionary
    pub fetched: Vec<(String, Vec<DictionaryEntry>)>,
    /// Words already in the local dictionary
    pub cached: usize,
    pub not_found: Vec<(String, Vec<String>)>,
    pub failed: Vec<(String, String)>,
}

/// Phrases gathered from history, plus the sources that could not be read
#[derive(Debug, Default)]
pub struct Harvest {
    pub phrases: Vec<String>,
    pub unreadable: Vec<String>,
}

/// Whether the next scan may start after this one. Anything unread,
/// unsaved or failed has to be seen again.
pub fn may_advance_checkpoint(harvest: &Harvest, report: &ScanReport, saved: bool) -> bool {
    saved && harvest.unreadable.is_empty() && report.failed.is_empty()
}

pub async fn handle_scan(state: &AppState, args: ScanArgs) -> anyhow::Result<()> {
    let checkpoint = Checkpoint::new(state.config.cache.checkpoint_path());
    let since = match args.from {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => checkpoint.load()?.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    };
    let started = Utc::now();

    let mut service = state.word_service()?;

    let sources = pdict_history::configured_sources(&state.config.history);
    if sources.is_empty() {
        tracing::warn!("No browser history to scan");
    }

    let harvest = collect_phrases(&sources, since);
    let words = EnglishProcessor::new().candidate_words(&harvest.phrases);
    println!(
        "{} candidate words in {} phrases since {}",
        words.len(),
        harvest.phrases.len(),
        since.format("%Y-%m-%d %H:%M")
    );

    let options = CheckOptions {
        force_online: false,
        persist: !args.no_save,
    };
    let report = check_words(&mut service, &words, options).await;

    for (_, entries) in &report.fetched {
        for entry in entries {
            println!("\n{}", render::render_entry(entry));
        }
    }
    for (word, suggestions) in &report.not_found {
        println!("{}", render::not_found(word, suggestions));
    }
    for (word, error) in &report.failed {
        eprintln!("{}: {}", word, error);
    }

    println!(
        "\n{} new, {} already known, {} not found, {} failed",
        report.fetched.len(),
        report.cached,
        report.not_found.len(),
        report.failed.len()
    );

    for name in &harvest.unreadable {
        eprintln!("{} history could not be read", name);
    }

    if may_advance_checkpoint(&harvest, &report, !args.no_save) {
        checkpoint.store(started)?;
    } else {
        tracing::warn!(
            "Keeping the previous checkpoint ({} unreadable sources, {} failed words, saving: {})",
            harvest.unreadable.len(),
            report.failed.len(),
            !args.no_save
        );
    }

    Ok(())
}

/// Phrases from every source; a source that cannot be read is skipped
/// and named in the harvest
pub fn collect_phrases(sources: &[Box<dyn HistorySource>], since: DateTime<Utc>) -> Harvest {
    let mut harvest = Harvest::default();

    for source in sources {
        match source.extract(since) {
            Ok(found) => {
                tracing::info!("{}: {} translated phrases", source.name(), found.len());
                harvest.phrases.extend(found);
            }
            Err(e) => {
                tracing::warn!("Skipping {} history: {}", source.name(), e);
                harvest.unreadable.push(source.name().to_string());
            }
        }
    }

    harvest
}

/// Check every word; a failing word is recorded and the scan goes on
pub async fn check_words(
    service: &mut WordService,
    words: &BTreeSet<String>,
    options: CheckOptions,
) -> ScanReport {
    let mut report = ScanReport::default();

    for word in words {
        match service.check(word, options).await {
            Ok(CheckOutcome::Found {
                source: Source::Cache,
                ..
            }) => report.cached += 1,
            Ok(CheckOutcome::Found { entries, .. }) => {
                report.fetched.push((word.clone(), entries));
            }
            Ok(CheckOutcome::NotFound { suggestions, .. }) => {
                report.not_found.push((word.clone(), suggestions));
            }
            Err(e) => {
                tracing::error!("Checking '{}' failed: {}", word, e);
                report.failed.push((word.clone(), e.to_string()));
            }
        }
    }

    report
}
