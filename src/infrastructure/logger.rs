//! 日志基础设施

use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// 初始化日志，`RUST_LOG` 优先于配置中的级别
    ///
    /// 日志写到 stderr，避免和终端里渲染的商品列表混在一起。
    ///
    /// 和 `tracing_subscriber` 的 `init` 一样，重复初始化会 panic；只应在 `main` 中调用一次。
    pub fn init(level: &str) {
        tracing_subscriber::fmt()
            .with_env_filter(Self::filter(level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    fn filter(level: &str) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}
