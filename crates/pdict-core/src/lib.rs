pub mod cache;
pub mod error;
pub mod history;
pub mod language;
pub mod preprocess;
pub mod service;

pub use cache::{EntryCache, GcReport};
pub use error::{CacheError, ServiceError};
pub use service::{CheckOptions, CheckOutcome, WordService};
