pub mod types;

pub use types::{DictionaryEntry, EntryId, SecondaryForm, Source};
