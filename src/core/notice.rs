//! 临时提示消息

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// 默认的自动清除间隔
pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_secs(3);

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Info => "info",
        }
    }
}

/// 一条提示：文本加样式类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub severity: Severity,
}

impl Notice {
    pub fn class(&self) -> String {
        format!("alert alert-{} mt-2", self.severity.as_str())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str(), self.text)
    }
}

/// 提示栏
///
/// 每次 `show` 都会覆盖当前提示，并启动一个独立的定时任务在间隔后清空提示栏。
/// 定时任务不检查提示是否已被替换，因此可能清除之后显示的提示。
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Arc<Mutex<Option<Notice>>>,
    clear_after: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_AFTER)
    }
}

impl NoticeBoard {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            clear_after,
        }
    }

    pub fn show(&self, severity: Severity, text: impl Into<String>) {
        let notice = Notice {
            text: text.into(),
            severity,
        };
        debug!("显示提示: {}", notice);
        *self.current.lock() = Some(notice);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let current = Arc::clone(&self.current);
                let delay = self.clear_after;
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    *current.lock() = None;
                });
            }
            // 没有运行时就无法定时，提示保留到下一次 show/clear
            Err(_) => debug!("没有 tokio 运行时，提示不会自动清除"),
        }
    }

    pub fn current(&self) -> Option<Notice> {
        self.current.lock().clone()
    }

    pub fn clear(&self) {
        *self.current.lock() = None;
    }

    pub fn clear_after(&self) -> Duration {
        self.clear_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_class() {
        let notice = Notice {
            text: "ok".to_string(),
            severity: Severity::Warning,
        };
        assert_eq!(notice.class(), "alert alert-warning mt-2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_clears_after_interval() {
        let board = NoticeBoard::default();
        board.show(Severity::Success, "已保存");
        assert_eq!(board.current().unwrap().severity, Severity::Success);

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert!(board.current().is_some());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(board.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_timer_clears_later_notice() {
        let board = NoticeBoard::default();
        board.show(Severity::Info, "第一条");
        tokio::time::sleep(Duration::from_secs(2)).await;
        board.show(Severity::Danger, "第二条");

        // 第一条的定时器到期时，第二条也被清除
        tokio::time::sleep(Duration::from_millis(1_100)).await;
        assert!(board.current().is_none());
    }

    #[test]
    fn test_show_without_runtime_keeps_notice() {
        let board = NoticeBoard::new(Duration::from_millis(1));
        board.show(Severity::Info, "离线");
        assert_eq!(board.current().unwrap().text, "离线");
        board.clear();
        assert!(board.current().is_none());
    }
}
