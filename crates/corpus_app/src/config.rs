use std::fs;
use std::path::{Path, PathBuf};

use corpus_logging::{stage_error, stage_info, stage_warn};
use corpus_stages::AtomicWriter;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "corpus_mill.ron";

/// Optional per-directory defaults for the CLI. Every field can be
/// overridden on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Default document mode: "single" or "per-line".
    pub document_mode: Option<String>,
    /// Default stop-word file for the filter stage.
    pub stop_words: Option<PathBuf>,
    /// Directory that relative report paths are resolved against.
    pub output_dir: Option<PathBuf>,
}

/// Loads `corpus_mill.ron` from `dir`. A missing, unreadable, or malformed
/// file falls back to defaults; the toolkit never refuses to run because a
/// config file went bad.
pub fn load(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            stage_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            stage_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            stage_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

/// Writes `config` to `dir/corpus_mill.ron` atomically.
pub fn save(dir: &Path, config: &AppConfig) -> anyhow::Result<PathBuf> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(config, pretty) {
        Ok(text) => text,
        Err(err) => {
            stage_error!("Failed to serialize config: {}", err);
            return Err(err.into());
        }
    };
    let writer = AtomicWriter::new(dir);
    let path = writer.write(CONFIG_FILENAME, &content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{load, save, AppConfig};
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load(temp.path()), AppConfig::default());
    }

    #[test]
    fn malformed_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(super::CONFIG_FILENAME), "(not ron").unwrap();
        assert_eq!(load(temp.path()), AppConfig::default());
    }

    #[test]
    fn saved_config_round_trips() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            document_mode: Some("single".to_string()),
            stop_words: Some("stop.txt".into()),
            output_dir: Some("reports".into()),
        };
        save(temp.path(), &config).unwrap();
        assert_eq!(load(temp.path()), config);
    }
}
