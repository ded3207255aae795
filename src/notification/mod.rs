//! 通知模块
//!
//! 提供SMTP邮件通知和告警消息模板功能

pub mod email;
pub mod sender;
pub mod template;

// 重新导出主要类型
pub use email::EmailNotifier;
pub use sender::{AlertMessage, DeliveryOutcome, NoOpNotifier, Notifier};
pub use template::AlertTemplate;
