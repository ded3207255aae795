//! 配置数据结构定义
//!
//! 定义一次监控运行所需的配置结构体和验证逻辑

use crate::error::ConfigError;
use std::time::Duration;

/// 默认 HTTP 超时时间（秒）
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// 默认 SMTP 端口（submission）
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// 主配置结构
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// 待检测的URL列表，按输入顺序
    pub urls: Vec<String>,
    /// HTTP检测配置
    pub http: HttpConfig,
    /// SMTP配置
    pub smtp: SmtpConfig,
    /// 只检测不发送邮件
    pub dry_run: bool,
}

/// HTTP检测配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// 请求超时时间
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// SMTP连接参数
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// SMTP服务器地址
    pub host: String,
    /// SMTP服务器端口
    pub port: u16,
    /// 用户名，同时作为发件人地址
    pub username: String,
    /// 密码
    pub password: String,
    /// 收件人地址
    pub recipient: String,
    /// 是否输出SMTP协议级调试日志
    pub protocol_trace: bool,
    /// SMTP会话超时，`None` 表示不限时
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("recipient", &self.recipient)
            .field("protocol_trace", &self.protocol_trace)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), ConfigError>` - 验证结果
pub fn validate_config(config: &MonitorConfig) -> Result<(), ConfigError> {
    if config.urls.is_empty() {
        return Err(ConfigError::MissingValue { field: "urls" });
    }

    if config.http.timeout.is_zero() {
        return Err(ConfigError::ValidationError("HTTP超时时间不能为0".to_string()));
    }

    let smtp = &config.smtp;
    if smtp.host.trim().is_empty() {
        return Err(ConfigError::MissingValue {
            field: "smtp_server",
        });
    }

    if smtp.port == 0 {
        return Err(ConfigError::ValidationError(
            "无效的SMTP端口: 0，端口不能为0".to_string(),
        ));
    }

    if smtp.username.trim().is_empty() {
        return Err(ConfigError::MissingValue { field: "smtp_user" });
    }

    if smtp.recipient.trim().is_empty() {
        return Err(ConfigError::MissingValue { field: "to_address" });
    }

    if matches!(smtp.timeout, Some(timeout) if timeout.is_zero()) {
        return Err(ConfigError::ValidationError("SMTP超时时间不能为0".to_string()));
    }

    Ok(())
}
