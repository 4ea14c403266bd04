use async_trait::async_trait;
use pdict_lookup::{LookupError, ProviderMetadata, RemoteLookup};
use serde_json::Value;
use url::Url;

/// Merriam-Webster answers a bad key with a plain-text 200
const INVALID_KEY_MARKER: &str = "Invalid API key";

#[derive(Clone)]
pub struct MerriamWebster {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl MerriamWebster {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    /// `<api_url>/<word>?key=<api_key>`, with the word as one path segment
    fn request_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| LookupError::ApiError(format!("Invalid API URL {}: {}", self.api_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| LookupError::ApiError(format!("API URL {} cannot take a path", self.api_url)))?
            .pop_if_empty()
            .push(word);
        url.query_pairs_mut().append_pair("key", &self.api_key);

        Ok(url)
    }
}

#[async_trait]
impl RemoteLookup for MerriamWebster {
    async fn fetch(&self, word: &str) -> Result<Value, LookupError> {
        if self.api_key.is_empty() {
            return Err(LookupError::AuthenticationError);
        }

        let url = self.request_url(word)?;
        tracing::debug!("GET {}{}", self.api_url, word);

        let response = self.client.get(url).send().await?;

        if response.status() == 429 {
            return Err(LookupError::RateLimitExceeded);
        }

        if response.status() == 401 || response.status() == 403 {
            return Err(LookupError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(LookupError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        parse_body(&body)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Merriam-Webster".to_string(),
        }
    }
}

fn parse_body(body: &str) -> Result<Value, LookupError> {
    serde_json::from_str(body).map_err(|e| {
        if body.contains(INVALID_KEY_MARKER) {
            LookupError::AuthenticationError
        } else {
            LookupError::MalformedResponse(format!("Failed to parse response: {}", e))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MerriamWebster {
        MerriamWebster::new(
            "secret".to_string(),
            "https://www.dictionaryapi.com/api/v3/references/collegiate/json/".to_string(),
        )
    }

    #[test]
    fn word_becomes_last_path_segment() {
        let url = client().request_url("ice cream").unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.dictionaryapi.com/api/v3/references/collegiate/json/ice%20cream?key=secret"
        );
    }

    #[test]
    fn base_without_trailing_slash_works() {
        let mw = MerriamWebster::new("k".to_string(), "http://localhost:9000/json".to_string());

        let url = mw.request_url("run").unwrap();

        assert_eq!(url.as_str(), "http://localhost:9000/json/run?key=k");
    }

    #[test]
    fn slash_in_word_is_escaped() {
        let url = client().request_url("and/or").unwrap();
        assert!(url.path().ends_with("/json/and%2For"));
    }

    #[test]
    fn invalid_base_url_is_an_api_error() {
        let mw = MerriamWebster::new("k".to_string(), "not a url".to_string());
        assert!(matches!(mw.request_url("run"), Err(LookupError::ApiError(_))));
    }

    #[test]
    fn json_body_is_returned_as_is() {
        let value = parse_body(r#"[{"meta":{"id":"run:1"}}]"#).unwrap();
        assert_eq!(value[0]["meta"]["id"], "run:1");
    }

    #[test]
    fn plain_text_key_error_is_authentication() {
        let err = parse_body("Invalid API key. Not subscribed for this reference.").unwrap_err();
        assert!(matches!(err, LookupError::AuthenticationError));
    }

    #[test]
    fn garbage_body_is_malformed() {
        let err = parse_body("<html>oops</html>").unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn empty_key_fails_before_any_request() {
        let mw = MerriamWebster::new(String::new(), "http://localhost:9/json/".to_string());

        let err = mw.fetch("run").await.unwrap_err();

        assert!(matches!(err, LookupError::AuthenticationError));
    }
}
