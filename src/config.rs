use crate::core::notice::DEFAULT_CLEAR_AFTER;
use crate::infrastructure::api_client::DEFAULT_BASE_URL;
use crate::infrastructure::cache::{FileStore, DEFAULT_CACHE_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// 编辑器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 商品 API 配置
    pub api: ApiConfig,
    /// 本地缓存配置
    pub cache: CacheConfig,
    /// 提示消息配置
    pub notice: NoticeConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 商品 API 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// 商品资源地址
    pub base_url: String,
}

/// 本地缓存配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// 缓存目录
    pub dir: PathBuf,
    /// 缓存键
    pub key: String,
}

/// 提示消息配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// 提示自动清除间隔（毫秒）
    pub clear_after_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".catalog-cache"),
            key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            clear_after_ms: DEFAULT_CLEAR_AFTER.as_millis() as u64,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl NoticeConfig {
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        // 确保目录存在
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::Validation(format!("无效的 API 地址 {}: {}", self.api.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "API 地址必须是 http 或 https: {}",
                self.api.base_url
            )));
        }

        if !FileStore::is_valid_key(&self.cache.key) {
            return Err(ConfigError::Validation(format!(
                "无效的缓存键: {:?}，只能包含字母、数字、'.'、'-'、'_'，且不能以 '.' 开头",
                self.cache.key
            )));
        }
        if self.cache.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("缓存目录不能为空".to_string()));
        }

        if self.notice.clear_after_ms == 0 {
            return Err(ConfigError::Validation("提示清除间隔必须大于0".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 默认搜索的配置文件位置
pub const CONFIG_PATHS: [&str; 2] = ["catalog.toml", "./config/catalog.toml"];

/// 加载配置：指定路径优先，否则依次搜索默认位置，都没有时使用默认配置
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        info!("从配置文件加载: {}", path.display());
        return Config::load_from_file(path);
    }

    for path in CONFIG_PATHS {
        if Path::new(path).exists() {
            info!("从配置文件加载: {}", path);
            return Config::load_from_file(path);
        }
    }

    info!("未找到配置文件，使用默认配置");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::LocalCache;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3000/products");
        assert_eq!(config.cache.key, "products");
        assert_eq!(config.notice.clear_after(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com/products".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.notice.clear_after_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_key_must_be_usable_by_file_store() {
        let dir = tempdir().unwrap();
        for key in ["productos v2", "", ".hidden", "../products", "a/b"] {
            let mut config = Config::default();
            config.cache.key = key.to_string();
            assert!(config.validate().is_err(), "{key:?}");
        }

        // 能通过校验的键一定能被文件存储写入
        let mut config = Config::default();
        config.cache.key = "productos_v2.bak".to_string();
        assert!(config.validate().is_ok());
        let cache = LocalCache::with_key(FileStore::new(dir.path()), config.cache.key.clone());
        assert!(cache.save(&[]).is_ok());
        assert_eq!(cache.try_load(), Some(Vec::new()));
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("conf").join("catalog.toml");

        let mut config = Config::default();
        config.api.base_url = "http://127.0.0.1:8080/products".to_string();
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("catalog.toml");
        fs::write(&config_path, "[cache]\nkey = \"catalogo\"\n").unwrap();

        let loaded = load_config(Some(&config_path)).unwrap();
        assert_eq!(loaded.cache.key, "catalogo");
        assert_eq!(loaded.cache.dir, PathBuf::from(".catalog-cache"));
        assert_eq!(loaded.api, ApiConfig::default());
    }
}
