use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const DATA_DIR: &str = ".quizpilot";

/// Environment variable that relocates the data directory.
pub const DATA_DIR_ENV: &str = "QUIZPILOT_DATA_DIR";

/// Get the data directory path, creating it if needed.
pub fn get_data_dir() -> AppResult<PathBuf> {
    let data_dir = match std::env::var(DATA_DIR_ENV) {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
        _ => dirs::home_dir()
            .ok_or_else(|| AppError::Config("Cannot get home directory".to_string()))?
            .join(DATA_DIR),
    };

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

/// Get the log directory path, creating it if needed.
pub fn get_log_dir() -> AppResult<PathBuf> {
    let log_dir = get_data_dir()?.join("logs");
    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }
    Ok(log_dir)
}
