use colored::Colorize;
use pdict_core::CheckOutcome;
use pdict_types::{DictionaryEntry, Source};

/// `headword, part of speech`
pub fn headline(entry: &DictionaryEntry) -> String {
    if entry.part_of_speech.is_empty() {
        return entry.headword().bold().to_string();
    }

    format!(
        "{}, {}",
        entry.headword().bold(),
        entry.part_of_speech.italic()
    )
}

/// Run-on forms as `form, pos; form, pos`
pub fn secondary_line(entry: &DictionaryEntry) -> Option<String> {
    if entry.secondary.is_empty() {
        return None;
    }

    let forms: Vec<String> = entry
        .secondary
        .iter()
        .map(|uro| {
            // Syllable breaks come marked with '*'
            let form = uro.form.replace('*', "");
            if uro.part_of_speech.is_empty() {
                form
            } else {
                format!("{}, {}", form, uro.part_of_speech.italic())
            }
        })
        .collect();

    Some(forms.join("; "))
}

pub fn definition_lines(entry: &DictionaryEntry) -> Vec<String> {
    entry
        .definitions
        .iter()
        .enumerate()
        .map(|(i, def)| format!("{}. {}", i + 1, capitalize(def)))
        .collect()
}

pub fn render_entry(entry: &DictionaryEntry) -> String {
    let mut lines = vec![headline(entry)];
    lines.extend(secondary_line(entry));
    lines.extend(definition_lines(entry));
    lines.join("\n")
}

pub fn render_outcome(outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::Found {
            entries, source, ..
        } => {
            let mut blocks: Vec<String> = entries.iter().map(render_entry).collect();
            blocks.push(source_note(*source).dimmed().to_string());
            blocks.join("\n\n")
        }
        CheckOutcome::NotFound { word, suggestions } => not_found(word, suggestions),
    }
}

pub fn not_found(word: &str, suggestions: &[String]) -> String {
    let mut line = format!("{} not found", word.bold());
    if !suggestions.is_empty() {
        line.push_str(&format!(". Did you mean: {}?", suggestions.join(", ")));
    }
    line
}

fn source_note(source: Source) -> &'static str {
    match source {
        Source::Cache => "(from local dictionary)",
        Source::Remote => "(from Merriam-Webster)",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
