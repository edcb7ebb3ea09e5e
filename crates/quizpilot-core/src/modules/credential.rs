//! Durable storage for the single active API credential.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Storage key of the credential, shared with the settings surface.
pub const CREDENTIAL_KEY: &str = "geminiApiKey";

const CREDENTIAL_FILE: &str = "credentials.json";

/// Get/set access to the active credential.
///
/// Blank values read back as `None`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self) -> AppResult<Option<String>>;

    async fn set(&self, credential: &str) -> AppResult<()>;
}

/// Credential kept in `credentials.json` next to the config.
///
/// Writes are serialized and land through a temp-file rename, so readers
/// never observe a half-written file and concurrent writers never interleave.
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(data_dir: &Path) -> Self {
        Self { path: data_dir.join(CREDENTIAL_FILE), write_lock: tokio::sync::Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> AppResult<Map<String, Value>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => Ok(map),
                _ => Err(AppError::Credential(format!(
                    "{} is not a JSON object",
                    self.path.display()
                ))),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> AppResult<Option<String>> {
        let map = self.read_map().await?;
        Ok(map
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string))
    }

    async fn set(&self, credential: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(CREDENTIAL_KEY.to_string(), Value::String(credential.trim().to_string()));
        atomic_write_json(&self.path, &Value::Object(map)).await?;
        tracing::info!("Credential saved ({})", mask_credential(credential.trim()));
        Ok(())
    }
}

/// In-process credential, for tests and embedders without a data dir.
#[derive(Default)]
pub struct MemoryCredentialStore {
    value: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new(initial: Option<&str>) -> Self {
        Self { value: RwLock::new(initial.map(str::to_string)) }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> AppResult<Option<String>> {
        Ok(self.value.read().clone().filter(|s| !s.trim().is_empty()))
    }

    async fn set(&self, credential: &str) -> AppResult<()> {
        *self.value.write() = Some(credential.trim().to_string());
        Ok(())
    }
}

pub async fn atomic_write_json(path: &Path, content: &Value) -> AppResult<()> {
    let temp_path = path.with_extension("json.tmp");
    let json_str = serde_json::to_string_pretty(content)?;

    tokio::fs::write(&temp_path, &json_str).await?;
    tokio::fs::rename(&temp_path, path).await?;

    Ok(())
}

/// Short form safe for logs and the settings surface.
pub fn mask_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
