//! 应用程序核心逻辑
//!
//! 负责把命令行参数装配成检测器、通知器和监控驱动，并执行一次检测

use crate::cli::Args;
use crate::config::{validate_config, MonitorConfig};
use crate::core::monitor::{Monitor, RunReport};
use crate::error::Result;
use crate::health::HttpReachabilityChecker;
use crate::logging::LoggingSystem;
use crate::notification::{EmailNotifier, NoOpNotifier, Notifier};
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

/// 根据配置装配监控驱动
///
/// # 参数
/// * `config` - 已验证的运行配置
///
/// # 返回
/// * `Result<Monitor>` - 监控驱动
pub fn build_monitor(config: &MonitorConfig) -> Result<Monitor> {
    let checker = HttpReachabilityChecker::new(&config.http)?;

    let notifier: Arc<dyn Notifier> = if config.dry_run {
        Arc::new(NoOpNotifier)
    } else {
        Arc::new(EmailNotifier::new(config.smtp.clone()))
    };

    Ok(Monitor::new(
        Arc::new(checker),
        notifier,
        config.smtp.username.clone(),
        config.smtp.recipient.clone(),
    ))
}

/// 执行一次完整的检测运行
///
/// 只有启动阶段的错误（日志初始化、配置验证）会返回 `Err`，
/// URL不可达和邮件发送失败都只体现在返回的报告和日志中
pub async fn run(args: &Args) -> Result<RunReport> {
    let log_config = args.to_log_config();
    let json_summary = log_config.json_format;
    let _logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!("{} v{} 启动", crate::APP_NAME, crate::VERSION);

    let config = args.to_config();
    validate_config(&config)?;
    debug!("运行配置: {:?}", config);

    let monitor = build_monitor(&config)?;
    let report = monitor.run(&config.urls).await;

    if json_summary {
        let summary = serde_json::to_string(&report.summary())?;
        info!(summary = %summary, "运行统计");
    }

    Ok(report)
}
