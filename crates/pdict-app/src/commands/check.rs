use pdict_core::{CheckOptions, CheckOutcome};

use crate::commands::{CheckArgs, normalize_word};
use crate::render;
use crate::state::AppState;

pub async fn handle_check(state: &AppState, args: CheckArgs) -> anyhow::Result<()> {
    let word = normalize_word(&args.word);
    let options = CheckOptions {
        force_online: args.force_online,
        persist: !args.no_save,
    };

    let mut service = state.word_service()?;
    let outcome = service.check(&word, options).await?;

    if let CheckOutcome::Found { source, saved, .. } = &outcome {
        tracing::info!("'{}' resolved from {} (saved: {})", word, source, saved);
    }

    match &outcome {
        CheckOutcome::NotFound { word, suggestions } if args.no_prompt => {
            println!("{}", render::not_found(word, suggestions));
        }
        _ if args.no_prompt => {}
        _ => println!("\n{}\n", render::render_outcome(&outcome)),
    }

    Ok(())
}
