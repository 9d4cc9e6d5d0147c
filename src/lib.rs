//! # 商品目录编辑器
//!
//! 表单录入商品，列表展示当前目录，增删改查通过 REST API 同步，
//! API 不可用时回退到本地缓存：
//! - `infrastructure::api_client`：商品资源的 HTTP 客户端
//! - `infrastructure::cache`：目录快照的本地缓存
//! - `app::catalog`：目录状态、渲染、表单和编排层
//! - `core`：错误类型和临时提示

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::catalog::{Orchestrator, Product, ProductDraft, ProductId};
pub use config::{Config, ConfigError};
pub use crate::core::error::{CacheError, CatalogError, NetworkError, Result, ValidationError};
pub use crate::core::notice::{Notice, NoticeBoard, Severity};
