//! 核心模块
//!
//! 包含监控驱动和应用程序装配逻辑

pub mod app;
pub mod monitor;

// 重新导出主要类型
pub use app::{build_monitor, run};
pub use monitor::{AlertReport, Monitor, RunReport, RunSummary, UrlReport};
