//! 可达性检测模块
//!
//! 提供HTTP可达性检测和结果类型

pub mod checker;
pub mod result;

// 重新导出主要类型
pub use checker::{HttpReachabilityChecker, ReachabilityChecker};
pub use result::{CheckOutcome, CheckResult};
