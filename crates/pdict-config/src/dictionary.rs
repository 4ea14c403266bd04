use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    env::var("PDICT_API_URL").unwrap_or_else(|_| {
        "https://www.dictionaryapi.com/api/v3/references/collegiate/json/".to_string()
    })
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Base URL, the queried word is appended as the last path segment
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}
