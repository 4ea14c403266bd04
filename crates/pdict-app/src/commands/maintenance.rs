use crate::commands::normalize_word;
use crate::state::AppState;

pub fn handle_remove(state: &AppState, word: &str) -> anyhow::Result<()> {
    let mut cache = state.open_cache()?;
    let word = normalize_word(word);
    let removed = cache.remove(&word)?;

    if removed == 0 {
        println!("{} is not in the local dictionary", word);
    } else {
        println!("Removed {} ({} associations)", word, removed);
    }
    Ok(())
}

pub fn handle_clean(state: &AppState) -> anyhow::Result<()> {
    let mut cache = state.open_cache()?;
    let report = cache.garbage_collect()?;

    println!(
        "Deleted {} orphaned entries, {} stray files",
        report.removed.len(),
        report.stray_files
    );
    Ok(())
}

pub fn handle_purge(state: &AppState, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        anyhow::bail!("Refusing to purge the local dictionary without --yes");
    }

    let mut cache = state.open_cache()?;
    cache.purge()?;
    println!("Local dictionary purged");
    Ok(())
}
