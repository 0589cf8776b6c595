//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// CCT configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the catalog database
    pub database: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/cct/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Local config (./.cct/config.yaml)
        let local_path = PathBuf::from(".cct/config.yaml");
        if local_path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&local_path) {
                if let Ok(local) = serde_yml::from_str::<Config>(&contents) {
                    config.merge(local);
                }
            }
        }

        // 4. Environment variables
        if let Ok(db) = std::env::var("CCT_DB") {
            config.database = Some(PathBuf::from(db));
        }
        if let Ok(format) = std::env::var("CCT_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cct")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Resolve the database path, defaulting to `catalog.db` in the
    /// current directory
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from("catalog.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_path() {
        let config = Config::default();
        assert_eq!(config.database_path(), PathBuf::from("catalog.db"));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            database: Some(PathBuf::from("a.db")),
            default_format: None,
        };
        base.merge(Config {
            database: Some(PathBuf::from("b.db")),
            default_format: Some("json".to_string()),
        });
        assert_eq!(base.database_path(), PathBuf::from("b.db"));
        assert_eq!(base.default_format.as_deref(), Some("json"));
    }
}
