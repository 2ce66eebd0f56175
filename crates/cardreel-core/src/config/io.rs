//! YAML configuration I/O
//!
//! Two loaders: [`load_config`] never fails and falls back to defaults (used
//! for the implicit config location), [`try_load_config`] reports every
//! problem (used when the caller named a file explicitly).

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load a config file, falling back to `T::default()`
///
/// A missing file is normal (first run) and logged at info level. An
/// unreadable or unparsable file is logged as a warning.
///
/// # Type Parameters
/// * `T` - Configuration type that implements `DeserializeOwned` and `Default`
///
/// # Arguments
/// * `path` - Path to the YAML configuration file
///
/// # Example
///
/// ```ignore
/// let config: CompilationConfig = load_config(&default_config_path(CONFIG_FILENAME));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("load_config: {:?} not found, using defaults", path);
        return T::default();
    }

    match try_load_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Load and parse a config file, failing on any error
///
/// Used when the caller named the file, so a typo in the path or an unknown
/// strategy name is reported instead of silently replaced by defaults.
///
/// # Type Parameters
/// * `T` - Configuration type that implements `DeserializeOwned`
///
/// # Arguments
/// * `path` - Path to the YAML configuration file
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse as `T`.
///
/// # Example
///
/// ```ignore
/// let config: CompilationConfig = try_load_config(Path::new("reel.yaml"))?;
/// ```
pub fn try_load_config<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    log::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save a config file as YAML
///
/// Creates parent directories if they don't exist.
///
/// # Type Parameters
/// * `T` - Configuration type that implements `Serialize`
///
/// # Arguments
/// * `config` - Configuration to save
/// * `path` - Path to the YAML configuration file
///
/// # Example
///
/// ```ignore
/// save_config(&config, &default_config_path(CONFIG_FILENAME))?;
/// ```
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config);
    let yaml = yaml.context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("Saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{CompilationConfig, LoudnessConfig};
    use crate::{LoudnessStrategy, OrderMode};

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/nonexistent/cardreel/config.yaml");
        let config: CompilationConfig = load_config(path);
        assert_eq!(config, CompilationConfig::default());
        assert!(try_load_config::<CompilationConfig>(path).is_err());
    }

    #[test]
    fn test_roundtrip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = CompilationConfig::default();
        config.sequence.mode = OrderMode::BiasedRandom;
        config.sequence.distribute_by_category = true;
        config.loudness.strategy = LoudnessStrategy::Median;
        config.loudness.limits_enabled = true;

        save_config(&config, &path).unwrap();
        let loaded: CompilationConfig = try_load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "loudness:\n  strategy: loudest\n").unwrap();

        assert!(try_load_config::<CompilationConfig>(&path).is_err());
        let loaded: CompilationConfig = load_config(&path);
        assert_eq!(loaded, CompilationConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "sequence:\n  mode: shuffle\n").unwrap();

        let loaded: CompilationConfig = try_load_config(&path).unwrap();
        assert_eq!(loaded.sequence.mode, OrderMode::Shuffle);
        assert!(!loaded.sequence.distribute_by_category);
        assert_eq!(loaded.loudness, LoudnessConfig::default());
    }
}
