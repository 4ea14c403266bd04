pub mod merriam_webster;
pub mod processor;
pub mod stop_words;

pub use merriam_webster::MerriamWebster;
pub use processor::EnglishProcessor;
