use crate::constants::{ACCOUNT_LIST_KEY, APP_SETTING_KEY};
use crate::error::{AppError, AppResult};
use crate::models::{Account, AppSetting};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::sync::Mutex;

const STORE_FILE: &str = "store.json";

/// Durable key/value store the controller persists its two records into.
/// The store engine itself is a collaborator; the core only reads and writes
/// the `app_setting` and `account_list` keys through this boundary.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;
}

pub fn get_data_dir() -> AppResult<PathBuf> {
    let dir = match std::env::var("QUESTBOT_DATA_DIR") {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => dirs::data_dir()
            .ok_or_else(|| AppError::Config("no platform data directory".to_string()))?
            .join("questbot"),
    };
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Flat JSON-object file, one property per store key, pretty-printed so the
/// record stays hand-inspectable. Writers serialize through one lock.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn open_default() -> AppResult<Self> {
        Ok(Self::new(get_data_dir()?.join(STORE_FILE)))
    }

    async fn read_all(&self) -> AppResult<Map<String, Value>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let value: Value = serde_json::from_str(&content)
                    .map_err(|e| AppError::Store(format!("corrupt store file: {}", e)))?;
                match value {
                    Value::Object(map) => Ok(map),
                    _ => Err(AppError::Store(
                        "store file root must be an object".to_string(),
                    )),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let mut map = self.read_all().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_all().await?;
        map.insert(key.to_string(), value);
        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

pub async fn read_setting(store: &dyn StateStore) -> AppResult<Option<AppSetting>> {
    match store.get(APP_SETTING_KEY).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn write_setting(store: &dyn StateStore, setting: &AppSetting) -> AppResult<()> {
    store
        .set(APP_SETTING_KEY, serde_json::to_value(setting)?)
        .await
}

pub async fn read_accounts(store: &dyn StateStore) -> AppResult<Option<Vec<Account>>> {
    match store.get(ACCOUNT_LIST_KEY).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn write_accounts(store: &dyn StateStore, accounts: &[Account]) -> AppResult<()> {
    store
        .set(ACCOUNT_LIST_KEY, serde_json::to_value(accounts)?)
        .await
}
