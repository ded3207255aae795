//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::config::types::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SMTP_PORT};
use crate::config::{HttpConfig, MonitorConfig, SmtpConfig};
use crate::logging::LogConfig;
use clap::{ArgAction, Parser, ValueEnum};
use std::time::Duration;

/// URL Sentinel - 检测URL可达性并在不可达时发送邮件告警
#[derive(Parser, Debug, Clone)]
#[command(
    name = "url-sentinel",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 需要检测的URL列表
    #[arg(long = "urls", value_name = "URL", num_args = 1.., required = true)]
    pub urls: Vec<String>,

    /// SMTP服务器地址
    #[arg(long = "smtp_server", value_name = "HOST")]
    pub smtp_server: String,

    /// SMTP服务器端口
    #[arg(long = "smtp_port", value_name = "PORT", default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    /// SMTP用户名，同时作为发件人地址
    #[arg(long = "smtp_user", value_name = "USER")]
    pub smtp_user: String,

    /// SMTP密码
    #[arg(long = "smtp_password", value_name = "PASSWORD")]
    pub smtp_password: String,

    /// 告警收件人地址
    #[arg(long = "to_address", value_name = "ADDRESS")]
    pub to_address: String,

    /// HTTP请求超时时间（秒）
    #[arg(long = "http_timeout", value_name = "SECONDS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub http_timeout: u64,

    /// SMTP会话超时时间（秒），不设置则不限时
    #[arg(long = "smtp_timeout", value_name = "SECONDS")]
    pub smtp_timeout: Option<u64>,

    /// 是否输出SMTP协议级调试日志
    #[arg(long = "smtp_debug", value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub smtp_debug: bool,

    /// 只检测，不发送邮件
    #[arg(long = "dry_run")]
    pub dry_run: bool,

    /// 日志级别
    #[arg(long = "log_level", value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// 使用JSON格式输出日志
    #[arg(long = "json_logs")]
    pub json_logs: bool,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl Args {
    /// 构建运行配置
    pub fn to_config(&self) -> MonitorConfig {
        MonitorConfig {
            urls: self.urls.clone(),
            http: HttpConfig {
                timeout: Duration::from_secs(self.http_timeout),
            },
            smtp: SmtpConfig {
                host: self.smtp_server.clone(),
                port: self.smtp_port,
                username: self.smtp_user.clone(),
                password: self.smtp_password.clone(),
                recipient: self.to_address.clone(),
                protocol_trace: self.smtp_debug,
                timeout: self.smtp_timeout.map(Duration::from_secs),
            },
            dry_run: self.dry_run,
        }
    }

    /// 构建日志配置
    pub fn to_log_config(&self) -> LogConfig {
        let config = LogConfig {
            level: self.log_level.clone().into(),
            json_format: self.json_logs,
            ..Default::default()
        };

        if self.smtp_debug && !self.dry_run {
            config.with_smtp_protocol_trace()
        } else {
            config
        }
    }
}
