use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default preprocessor for phrases pulled out of URLs
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFKC)
        text = text.nfkc().collect();

        // Escaped newlines survive URL decoding as a literal backslash-n
        text = text.replace("\\n", " ").replace(['\n', '\r'], " ");

        text.trim().to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
