//! 可达性检测结果数据结构
//!
//! 定义单次检测的结果类型和状态枚举

use crate::error::CheckError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 检测结论
#[derive(Debug)]
pub enum CheckOutcome {
    /// 返回了 200
    Reachable { status_code: u16 },
    /// 非 200 状态码或传输层错误
    Unreachable { cause: CheckError },
}

impl CheckOutcome {
    /// 判断是否可达
    pub fn is_reachable(&self) -> bool {
        matches!(self, CheckOutcome::Reachable { .. })
    }
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckOutcome::Reachable { status_code } => write!(f, "可达 (HTTP {status_code})"),
            CheckOutcome::Unreachable { cause } => write!(f, "不可达 ({cause})"),
        }
    }
}

/// 单个URL的检测结果
#[derive(Debug)]
pub struct CheckResult {
    /// 被检测的URL
    pub url: String,
    /// 检测时间戳
    pub timestamp: DateTime<Utc>,
    /// 响应时间
    pub response_time: Duration,
    /// 检测结论
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// 创建新的检测结果
    ///
    /// # 参数
    /// * `url` - 被检测的URL
    /// * `outcome` - 检测结论
    ///
    /// # 返回
    /// * `Self` - 检测结果实例
    pub fn new(url: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            url: url.into(),
            timestamp: Utc::now(),
            response_time: Duration::from_millis(0),
            outcome,
        }
    }

    /// 设置响应时间
    pub fn with_response_time(mut self, response_time: Duration) -> Self {
        self.response_time = response_time;
        self
    }

    /// 是否可达
    pub fn is_reachable(&self) -> bool {
        self.outcome.is_reachable()
    }

    /// HTTP状态码（如果收到了响应）
    pub fn status_code(&self) -> Option<u16> {
        match &self.outcome {
            CheckOutcome::Reachable { status_code } => Some(*status_code),
            CheckOutcome::Unreachable {
                cause: CheckError::UnexpectedStatus { status, .. },
            } => Some(*status),
            CheckOutcome::Unreachable { .. } => None,
        }
    }

    /// 获取响应时间（毫秒）
    pub fn response_time_ms(&self) -> u64 {
        self.response_time.as_millis() as u64
    }
}
