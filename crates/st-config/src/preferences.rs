use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Preference file location, platform config dir when unset
    pub path: Option<PathBuf>,
}

impl PreferencesConfig {
    pub fn new() -> Self {
        let path = env::var("ST_PREFS_PATH").ok().map(PathBuf::from);

        Self { path }
    }
}
