//! 本地缓存
//!
//! 以完整快照的方式把商品目录镜像到一个键值存储中，不做增量更新。

use crate::app::catalog::model::Product;
use crate::core::error::CacheError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// 默认缓存键
pub const DEFAULT_CACHE_KEY: &str = "products";

/// 键值存储后端
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// 基于目录的存储：每个键一个 JSON 文件
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 键只能由 `[A-Za-z0-9._-]` 组成且不能以 `.` 开头，保证落在缓存目录内
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.')
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        if !Self::is_valid_key(key) {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // 先写临时文件再改名，避免留下写了一半的快照
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 内存存储，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// 商品目录的本地缓存
#[derive(Debug, Clone)]
pub struct LocalCache<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LocalCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CACHE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// 序列化整个目录并覆盖之前的快照
    pub fn save(&self, products: &[Product]) -> Result<(), CacheError> {
        let json = serde_json::to_string(products)?;
        self.store.set(&self.key, &json)?;
        debug!("已缓存 {} 个商品", products.len());
        Ok(())
    }

    /// 读取快照；没有快照或快照无法解析时返回 None
    pub fn try_load(&self) -> Option<Vec<Product>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("读取本地缓存失败: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => Some(products),
            Err(e) => {
                warn!("本地缓存已损坏，忽略: {}", e);
                None
            }
        }
    }

    /// 读取快照；没有可用数据时返回空目录
    pub fn load(&self) -> Vec<Product> {
        self.try_load().unwrap_or_default()
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(&self.key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
