/// Remote dictionary provider interface
#[async_trait::async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Fetch the raw JSON the provider returns for a word.
    ///
    /// Interpreting the payload (found vs. not found) is left to the caller.
    async fn fetch(&self, word: &str) -> Result<serde_json::Value, LookupError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
