//! 监控驱动
//!
//! 按输入顺序逐个检测URL，为每个不可达的URL发送一封告警

use crate::health::{CheckResult, ReachabilityChecker};
use crate::notification::{AlertMessage, AlertTemplate, DeliveryOutcome, Notifier};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// 一次告警及其发送结果
#[derive(Debug)]
pub struct AlertReport {
    /// 告警消息
    pub message: AlertMessage,
    /// 发送结果
    pub delivery: DeliveryOutcome,
}

/// 单个URL的处理记录
#[derive(Debug)]
pub struct UrlReport {
    /// 检测结果
    pub check: CheckResult,
    /// 告警（仅在不可达时存在）
    pub alert: Option<AlertReport>,
}

/// 一次运行的完整记录，顺序与输入一致
#[derive(Debug, Default)]
pub struct RunReport {
    pub urls: Vec<UrlReport>,
}

/// 运行统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub reachable: usize,
    pub unreachable: usize,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
    pub alerts_skipped: usize,
}

impl RunReport {
    /// 所有构建过的告警消息
    pub fn alerts(&self) -> impl Iterator<Item = &AlertMessage> {
        self.urls
            .iter()
            .filter_map(|report| report.alert.as_ref().map(|alert| &alert.message))
    }

    /// 不可达的URL数量
    pub fn unreachable_count(&self) -> usize {
        self.urls.iter().filter(|r| !r.check.is_reachable()).count()
    }

    /// 成功发送的告警数量
    pub fn alerts_sent(&self) -> usize {
        self.urls
            .iter()
            .filter_map(|r| r.alert.as_ref())
            .filter(|alert| alert.delivery.is_sent())
            .count()
    }

    /// 汇总统计
    pub fn summary(&self) -> RunSummary {
        let deliveries: Vec<&DeliveryOutcome> = self
            .urls
            .iter()
            .filter_map(|r| r.alert.as_ref().map(|alert| &alert.delivery))
            .collect();
        let unreachable = self.unreachable_count();

        RunSummary {
            total: self.urls.len(),
            reachable: self.urls.len() - unreachable,
            unreachable,
            alerts_sent: deliveries.iter().filter(|d| d.is_sent()).count(),
            alerts_failed: deliveries
                .iter()
                .filter(|d| matches!(d, DeliveryOutcome::Failed { .. }))
                .count(),
            alerts_skipped: deliveries
                .iter()
                .filter(|d| matches!(d, DeliveryOutcome::Skipped))
                .count(),
        }
    }
}

/// 监控驱动，串行执行检测和通知
pub struct Monitor {
    /// 可达性检测器
    checker: Arc<dyn ReachabilityChecker>,
    /// 通知发送器
    notifier: Arc<dyn Notifier>,
    /// 告警模板
    template: AlertTemplate,
    /// 发件人地址
    from: String,
    /// 收件人地址
    to: String,
}

impl Monitor {
    /// 创建新的监控驱动
    ///
    /// # 参数
    /// * `checker` - 可达性检测器
    /// * `notifier` - 通知发送器
    /// * `from` - 告警发件人，通常是SMTP用户名
    /// * `to` - 告警收件人
    pub fn new(
        checker: Arc<dyn ReachabilityChecker>,
        notifier: Arc<dyn Notifier>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            checker,
            notifier,
            template: AlertTemplate::default(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// 替换告警模板
    pub fn with_template(mut self, template: AlertTemplate) -> Self {
        self.template = template;
        self
    }

    /// 对所有URL执行一次检测
    ///
    /// 不做去重，重复的URL会被重复检测和告警。发送失败不会中断后续URL
    pub async fn run(&self, urls: &[String]) -> RunReport {
        let mut report = RunReport::default();

        for url in urls {
            let check = self.checker.check(url).await;

            let alert = if check.is_reachable() {
                None
            } else {
                let message = self.template.render(url, &self.from, &self.to);
                let delivery = self.notifier.notify(&message).await;
                Some(AlertReport { message, delivery })
            };

            report.urls.push(UrlReport { check, alert });
        }

        let summary = report.summary();
        info!(
            "检测完成: 共 {} 个URL, {} 个不可达, 告警发送成功 {} 封, 失败 {} 封",
            summary.total, summary.unreachable, summary.alerts_sent, summary.alerts_failed
        );

        report
    }
}
