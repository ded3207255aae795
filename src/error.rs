//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// URL Sentinel 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum MonitorError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 检测器初始化错误
    #[error("检测器初始化失败: {0}")]
    HealthCheck(#[from] CheckError),

    /// JSON序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// 必填项为空
    #[error("配置项不能为空: {field}")]
    MissingValue { field: &'static str },

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),
}

/// URL 不可达的原因
#[derive(Error, Debug)]
pub enum CheckError {
    /// 状态码不是 200
    #[error("HTTP {status} {reason}")]
    UnexpectedStatus { status: u16, reason: String },

    /// 超时错误
    #[error("请求超时")]
    Timeout,

    /// 连接错误（包括 DNS 解析失败和连接被拒绝）
    #[error("连接失败: {0}")]
    Connection(String),

    /// 其他 HTTP 请求错误（TLS、URL 格式等）
    #[error("HTTP请求失败: {0}")]
    Request(#[from] reqwest::Error),
}

/// 邮件发送失败的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 认证失败
    Authentication,
    /// 无法连接 SMTP 服务器
    Connection,
    /// 其他错误
    Generic,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Authentication => write!(f, "认证错误"),
            FailureKind::Connection => write!(f, "连接错误"),
            FailureKind::Generic => write!(f, "一般错误"),
        }
    }
}

/// 通知错误类型
#[derive(Error, Debug)]
pub enum NotifyError {
    /// SMTP 认证失败
    #[error("认证失败: {0}")]
    Authentication(String),

    /// SMTP 连接失败
    #[error("连接失败: {0}")]
    Connection(String),

    /// 邮件地址格式错误
    #[error("无效的邮件地址: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// 邮件构建错误
    #[error("邮件构建失败: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP 会话中的其他错误
    #[error("SMTP错误: {0}")]
    Smtp(String),
}

impl NotifyError {
    /// 获取错误分类
    pub fn kind(&self) -> FailureKind {
        match self {
            NotifyError::Authentication(_) => FailureKind::Authentication,
            NotifyError::Connection(_) => FailureKind::Connection,
            NotifyError::Address(_) | NotifyError::Message(_) | NotifyError::Smtp(_) => {
                FailureKind::Generic
            }
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, MonitorError>;

/// 拼接错误链，顶层信息通常不包含根因（DNS、拒绝连接等）
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_error_kind() {
        assert_eq!(
            NotifyError::Authentication("535".to_string()).kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            NotifyError::Connection("refused".to_string()).kind(),
            FailureKind::Connection
        );
        assert_eq!(
            NotifyError::Smtp("550 mailbox unavailable".to_string()).kind(),
            FailureKind::Generic
        );
    }

    #[test]
    fn test_check_error_display() {
        let err = CheckError::UnexpectedStatus {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 Service Unavailable");
        assert_eq!(CheckError::Timeout.to_string(), "请求超时");
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = NotifyError::Connection(error_chain(&io));
        assert!(err.to_string().contains("refused"));

        #[derive(Debug, Error)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let chained = error_chain(&Outer(io));
        assert_eq!(chained, "outer: refused");
    }

    #[test]
    fn test_config_error_converts_into_monitor_error() {
        let err: MonitorError = ConfigError::MissingValue { field: "urls" }.into();
        assert!(matches!(err, MonitorError::Config(_)));
        assert!(err.to_string().contains("urls"));
    }
}
