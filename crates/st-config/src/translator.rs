use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://simplytranslate.org/".to_string()
}

fn default_engine() -> String {
    "google".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("st-translate/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Request timeout, exceeding it counts as a network error
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let base_url = env::var("ST_BASE_URL").unwrap_or_else(|_| default_base_url());
        let engine = env::var("ST_ENGINE").unwrap_or_else(|_| default_engine());
        let timeout_seconds = env::var("ST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);
        let user_agent = env::var("ST_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        Self {
            base_url,
            engine,
            timeout_seconds,
            user_agent,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            engine: default_engine(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}
