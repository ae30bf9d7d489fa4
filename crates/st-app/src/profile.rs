use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use st_config::Config;

/// Load the config file when given, environment defaults otherwise
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No config file, using environment defaults");
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"translator":{"base_url":"http://localhost:5000"}}"#).unwrap();

        let config = load_config(Some(path.as_path())).unwrap();

        assert_eq!(config.translator.base_url, "http://localhost:5000");
        assert_eq!(config.translator.engine, "google");
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_config(Some(tmp.path().join("absent.json").as_path())).is_err());
    }
}
