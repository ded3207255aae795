//! 配置管理模块
//!
//! 提供运行配置的数据结构和验证功能

pub mod types;

// 重新导出主要类型
pub use types::{validate_config, HttpConfig, MonitorConfig, SmtpConfig};
