//! English function words that are never worth a dictionary lookup.

use std::collections::HashSet;
use std::sync::OnceLock;

const STOP_WORDS: &[&str] = &[
    // articles & determiners
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each",
    "every", "all", "both", "few", "more", "most", "other", "such", "no", "own",
    "same",
    // pronouns
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
    "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom",
    // be, have, do
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing",
    // modals
    "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // prepositions
    "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "of",
    // conjunctions & adverbs
    "and", "but", "if", "or", "because", "as", "until", "while", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "nor", "not", "only", "so", "than", "too", "very", "just", "now",
    // contraction fragments left after splitting on apostrophes
    "s", "t", "d", "ll", "m", "o", "re", "ve", "y", "don", "isn", "aren",
    "wasn", "weren", "hasn", "haven", "hadn", "doesn", "didn", "won", "wouldn",
    "shan", "shouldn", "couldn", "mustn", "mightn", "needn", "ain",
];

pub fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

pub fn is_stop_word(word: &str) -> bool {
    stop_words().contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_contain_basics() {
        for word in ["the", "and", "of", "is", "don"] {
            assert!(is_stop_word(word), "missing {word}");
        }
        assert!(!is_stop_word("serendipity"));
    }
}
