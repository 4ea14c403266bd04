use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_target_lang() -> String {
    env::var("PDICT_TARGET_LANG").unwrap_or_else(|_| "pl".to_string())
}

fn default_firefox_root() -> PathBuf {
    home().join(".mozilla").join("firefox")
}

fn default_firefox_profile() -> String {
    env::var("PDICT_FIREFOX_PROFILE").unwrap_or_else(|_| "Profile0".to_string())
}

fn default_chrome_history() -> PathBuf {
    home()
        .join(".config")
        .join("google-chrome")
        .join("Default")
        .join("History")
}

fn default_enabled() -> bool {
    true
}

/// Where to find browser history and which translations count
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct HistoryConfig {
    /// Language English phrases were translated into
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_enabled")]
    pub firefox_enabled: bool,
    /// Directory holding `profiles.ini`
    #[serde(default = "default_firefox_root")]
    pub firefox_root: PathBuf,
    /// Section name in `profiles.ini`
    #[serde(default = "default_firefox_profile")]
    pub firefox_profile: String,
    #[serde(default = "default_enabled")]
    pub chrome_enabled: bool,
    #[serde(default = "default_chrome_history")]
    pub chrome_history: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            target_lang: default_target_lang(),
            firefox_enabled: default_enabled(),
            firefox_root: default_firefox_root(),
            firefox_profile: default_firefox_profile(),
            chrome_enabled: default_enabled(),
            chrome_history: default_chrome_history(),
        }
    }
}
