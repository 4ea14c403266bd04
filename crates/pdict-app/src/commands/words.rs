use crate::state::AppState;

pub fn handle_count_words(state: &AppState) -> anyhow::Result<()> {
    let cache = state.open_cache()?;
    println!("{}", cache.count()?);
    Ok(())
}

pub fn handle_list_words(state: &AppState, n: usize) -> anyhow::Result<()> {
    let cache = state.open_cache()?;
    for word in cache.list_sample(n)? {
        println!("{}", word);
    }
    Ok(())
}
