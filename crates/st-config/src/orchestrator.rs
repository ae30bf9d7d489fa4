use std::env;

use serde::{Deserialize, Serialize};

/// What to do with a result whose query no longer matches the screen
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StaleResultPolicy {
    #[default]
    Discard,
    Overwrite,
}

fn default_share_auto_retranslate() -> bool {
    true
}

fn default_swap_fallback() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Main screen re-translates on language change
    #[serde(default)]
    pub main_auto_retranslate: bool,
    /// Share overlay re-translates on language change
    #[serde(default = "default_share_auto_retranslate")]
    pub share_auto_retranslate: bool,
    #[serde(default)]
    pub stale_results: StaleResultPolicy,
    /// Target used when swapping away from auto-detect
    #[serde(default = "default_swap_fallback")]
    pub swap_fallback: String,
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        let main_auto_retranslate = env::var("ST_AUTO_RETRANSLATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            main_auto_retranslate,
            ..Self::default()
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            main_auto_retranslate: false,
            share_auto_retranslate: default_share_auto_retranslate(),
            stale_results: StaleResultPolicy::default(),
            swap_fallback: default_swap_fallback(),
        }
    }
}
