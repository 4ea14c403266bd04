use pdict_core::language::LanguageProcessor;
use pdict_core::preprocess::Preprocessor;

use crate::stop_words::is_stop_word;

/// English tokenizer for phrases typed into translators
#[derive(Default)]
pub struct EnglishProcessor;

impl EnglishProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Preprocessor for EnglishProcessor {}

impl LanguageProcessor for EnglishProcessor {
    fn normalize(&self, text: &str) -> String {
        self.process(text)
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(|c: char| !c.is_alphanumeric())
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn is_candidate(&self, word: &str) -> bool {
        word.chars().all(char::is_alphanumeric)
            && !word.chars().all(|c| c.is_numeric())
            && !is_stop_word(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_punctuation() {
        let processor = EnglishProcessor::new();

        let tokens = processor.tokenize("Well-known, isn't it?");

        assert_eq!(tokens, vec!["well", "known", "isn", "t", "it"]);
    }

    #[test]
    fn candidates_skip_stop_words_and_numbers() {
        let processor = EnglishProcessor::new();
        let phrases = vec![
            "The quick brown fox".to_string(),
            "a QUICK glance at 42 foxes\\n".to_string(),
        ];

        let words: Vec<String> = processor.candidate_words(&phrases).into_iter().collect();

        assert_eq!(words, vec!["brown", "fox", "foxes", "glance", "quick"]);
    }

    #[test]
    fn empty_phrase_has_no_tokens() {
        assert!(EnglishProcessor::new().tokenize("   ").is_empty());
    }
}
