//! 核心错误处理模块

use thiserror::Error;

/// 用户输入校验错误，在任何网络请求之前检测
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("请填写所有字段")]
    EmptyField,
    #[error("价格必须是正数")]
    PriceNotPositive,
    #[error("名称至少需要 3 个字符")]
    NameTooShort,
    #[error("该商品尚未保存，没有可用的 ID")]
    MissingId,
}

/// 网络错误：传输失败、非成功状态码或无法解析的响应体
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("无效的 API 地址: {0}")]
    InvalidUrl(String),
    #[error("{method} {url} 返回状态 {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },
    #[error("传输失败: {0}")]
    Transport(String),
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NetworkError::Decode(err.to_string())
        } else {
            NetworkError::Transport(err.to_string())
        }
    }
}

/// 本地缓存读写错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("缓存读写失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("缓存序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("无效的缓存键: {0}")]
    InvalidKey(String),
}

/// 目录操作在编排层被恢复的错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("本地缓存中没有可用数据")]
    CacheMiss,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
