use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::state::AppState;

pub mod check;
pub mod maintenance;
pub mod scan;
pub mod words;

use check::handle_check;
use maintenance::{handle_clean, handle_purge, handle_remove};
use scan::handle_scan;
use words::{handle_count_words, handle_list_words};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the English word in online dictionary
    Check(CheckArgs),

    /// Count word associations in the local dictionary
    CountWords,

    /// Show n words from the local dictionary
    ListWords {
        #[arg(default_value_t = 5)]
        n: usize,
    },

    /// Scan browser history for English words checked in online translators
    Scan(ScanArgs),

    /// Forget a word (its entries are reclaimed by `clean`)
    Remove { word: String },

    /// Delete stored entries no word refers to anymore
    Clean,

    /// Delete the whole local dictionary
    Purge {
        /// Confirm the purge
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    pub word: String,

    /// Skip the local dictionary and ask the online one
    #[arg(long = "force-online")]
    pub force_online: bool,

    /// Do not print the entries
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,

    /// Do not store the result in the local dictionary
    #[arg(long = "no-save")]
    pub no_save: bool,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// When to start scanning browser history from (YYYY-MM-DD).
    /// Defaults to the end of the previous scan.
    #[arg(short, long = "from", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Do not store results in the local dictionary
    #[arg(long = "no-save")]
    pub no_save: bool,
}

/// Form words are looked up and stored under
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

pub async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    tracing::debug!("Running {:?}", command);

    match command {
        Command::Check(args) => handle_check(state, args).await,
        Command::CountWords => handle_count_words(state),
        Command::ListWords { n } => handle_list_words(state, n),
        Command::Scan(args) => handle_scan(state, args).await,
        Command::Remove { word } => handle_remove(state, &word),
        Command::Clean => handle_clean(state),
        Command::Purge { yes } => handle_purge(state, yes),
    }
}
