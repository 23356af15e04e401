//! YAML load/save for any serde configuration type

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load configuration from a YAML file
///
/// A missing file yields `T::default()`. So does an unreadable or unparsable
/// one, after a warning: a broken config never prevents startup.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: No config file, using defaults");
        return T::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("load_config: Failed to read {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(config) => {
            log::info!("load_config: Loaded {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: Failed to parse {:?}: {}, using defaults", path, e);
            T::default()
        }
    }
}

/// Write configuration as YAML, creating parent directories as needed
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriftwallConfig;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config: DriftwallConfig = load_config(Path::new("/nonexistent/driftwall/config.yaml"));
        assert_eq!(config, DriftwallConfig::default());
    }

    #[test]
    fn test_garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "coordinator: [this is not a map").unwrap();

        let config: DriftwallConfig = load_config(&path);
        assert_eq!(config, DriftwallConfig::default());
    }

    #[test]
    fn test_save_creates_directories_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("driftwall").join("config.yaml");

        let mut config = DriftwallConfig::default();
        config.coordinator.seed = Some(99);
        config.pool.max_workers = 3;
        config.display.title = "wall".to_string();

        save_config(&config, &path).unwrap();
        let loaded: DriftwallConfig = load_config(&path);
        assert_eq!(loaded, config);
    }
}
