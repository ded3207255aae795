//! 通知发送器模块
//!
//! 定义告警消息、发送结果和通知发送的trait

use crate::error::{FailureKind, NotifyError};
use async_trait::async_trait;
use tracing::info;

/// 告警消息，只在URL不可达时构建，发送后即丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    /// 发件人地址
    pub from: String,
    /// 收件人地址
    pub to: String,
    /// 邮件主题
    pub subject: String,
    /// 纯文本正文
    pub body: String,
}

/// 发送结果
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// 已交给SMTP服务器
    Sent,
    /// 未发送（仅检测模式）
    Skipped,
    /// 发送失败
    Failed { cause: NotifyError },
}

impl DeliveryOutcome {
    /// 是否已发送
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent)
    }

    /// 失败分类（如果失败）
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            DeliveryOutcome::Failed { cause } => Some(cause.kind()),
            _ => None,
        }
    }
}

/// 通知发送器trait
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 发送一条告警
    ///
    /// 所有错误都在内部记录日志并以 `DeliveryOutcome::Failed` 返回
    ///
    /// # 参数
    /// * `message` - 告警消息
    ///
    /// # 返回
    /// * `DeliveryOutcome` - 发送结果
    async fn notify(&self, message: &AlertMessage) -> DeliveryOutcome;
}

/// 空的通知发送器实现（仅检测模式）
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, message: &AlertMessage) -> DeliveryOutcome {
        info!("仅检测模式，跳过发送: {}", message.subject);
        DeliveryOutcome::Skipped
    }
}
