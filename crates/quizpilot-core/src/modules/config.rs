use std::fs;
use std::path::Path;

use quizpilot_types::AppConfig;

use super::paths::get_data_dir;
use crate::error::{AppError, AppResult};

const CONFIG_FILE: &str = "config.json";

/// Load the application config from `dir`.
///
/// A missing file yields defaults; missing sections are filled with defaults.
pub fn load_config_from(dir: &Path) -> AppResult<AppConfig> {
    let config_path = dir.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(AppConfig::new());
    }

    let content = fs::read_to_string(&config_path)?;
    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
    config.validate()?;
    Ok(config)
}

/// Validate and atomically save the application config into `dir`.
pub fn save_config_to(dir: &Path, config: &AppConfig) -> AppResult<()> {
    config.validate()?;

    let config_path = dir.join(CONFIG_FILE);
    let temp_path = dir.join(format!("{}.tmp", CONFIG_FILE));
    let content = serde_json::to_string_pretty(config)?;

    // Atomic write
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, &config_path)?;
    Ok(())
}

/// Load the application config from the data directory.
pub fn load_config() -> AppResult<AppConfig> {
    load_config_from(&get_data_dir()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.retry.max_retries = 3;
        config.gemini.models = vec!["gemini-2.0-flash".to_string()];

        save_config_to(dir.path(), &config).unwrap();
        assert!(!dir.path().join("config.json.tmp").exists());

        let loaded = load_config_from(dir.path()).unwrap();
        assert_eq!(loaded.retry.max_retries, 3);
        assert_eq!(loaded.gemini.models, vec!["gemini-2.0-flash".to_string()]);
    }

    #[test]
    fn test_invalid_config_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.gemini.models.clear();

        assert!(save_config_to(dir.path(), &config).is_err());
        assert!(!dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        assert!(matches!(load_config_from(dir.path()), Err(AppError::Config(_))));
    }
}
