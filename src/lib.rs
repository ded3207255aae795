//! URL Sentinel - URL可达性监控工具
//!
//! 对一组URL执行一次检测，并为每个不可达的URL发送邮件告警：
//! - HTTP/HTTPS 可达性检测（只有 200 视为可达）
//! - 通过 STARTTLS 加密的 SMTP 发送纯文本告警
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod health;
pub mod logging;
pub mod notification;

// 重新导出主要类型
pub use config::{HttpConfig, MonitorConfig, SmtpConfig};
pub use crate::core::{Monitor, RunReport};
pub use error::MonitorError;
pub use health::{CheckOutcome, CheckResult, HttpReachabilityChecker, ReachabilityChecker};
pub use notification::{AlertMessage, DeliveryOutcome, EmailNotifier, Notifier};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
