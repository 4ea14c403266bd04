use std::collections::BTreeSet;

/// Text processing interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Normalize text (Unicode normalization, case, whitespace)
    fn normalize(&self, text: &str) -> String;

    /// Break text into normalized words
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Whether a word is worth a dictionary lookup
    fn is_candidate(&self, word: &str) -> bool;

    /// Unique lookup candidates found in a batch of phrases
    fn candidate_words(&self, phrases: &[String]) -> BTreeSet<String> {
        phrases
            .iter()
            .flat_map(|phrase| self.tokenize(phrase))
            .filter(|word| self.is_candidate(word))
            .collect()
    }
}
