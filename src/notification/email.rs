//! SMTP邮件通知发送器模块
//!
//! 通过 STARTTLS 加密的 SMTP 会话发送纯文本告警邮件，每封邮件一个会话。
//! 会话按 连接 → STARTTLS → 认证 → 投递 → QUIT 的顺序执行，
//! 失败分类取决于出错的阶段。

use crate::config::SmtpConfig;
use crate::error::{error_chain, NotifyError};
use crate::notification::sender::{AlertMessage, DeliveryOutcome, Notifier};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::{Credentials, DEFAULT_MECHANISMS};
use lettre::transport::smtp::client::{AsyncSmtpConnection, TlsParameters};
use lettre::transport::smtp::extension::ClientId;
use lettre::transport::smtp::response::Code;
use lettre::{Address, Message};
use std::fmt;
use tracing::{debug, error, info, Instrument};

/// SMTP会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    /// 建立TCP连接、读取问候并发送 EHLO
    Connect,
    /// 升级为 TLS
    StartTls,
    /// 用户名密码认证
    Authenticate,
    /// 构建邮件并投递
    Send,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Connect => write!(f, "连接"),
            SessionPhase::StartTls => write!(f, "STARTTLS"),
            SessionPhase::Authenticate => write!(f, "认证"),
            SessionPhase::Send => write!(f, "投递"),
        }
    }
}

/// SMTP邮件发送器
pub struct EmailNotifier {
    /// SMTP连接参数
    config: SmtpConfig,
}

impl EmailNotifier {
    /// 创建新的邮件发送器
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// 构建 multipart 邮件，只包含一个纯文本部分
    ///
    /// 发件人不是完整邮件地址时（例如用户名 `monitor`），
    /// 以 `用户名@SMTP服务器` 作为发件地址。
    fn build_message(&self, alert: &AlertMessage) -> Result<Message, NotifyError> {
        let from = sender_mailbox(&alert.from, &self.config.host)?;
        let to: Mailbox = alert.to.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(alert.subject.as_str())
            .multipart(
                MultiPart::mixed().singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(alert.body.clone()),
                ),
            )?;

        Ok(message)
    }

    fn trace_phase(&self, phase: SessionPhase) {
        if self.config.protocol_trace {
            debug!(
                "SMTP {}:{} 进入{}阶段",
                self.config.host, self.config.port, phase
            );
        }
    }

    /// 执行一次完整的SMTP会话，配置了超时则整个会话受其约束
    async fn deliver(&self, alert: &AlertMessage) -> Result<(), NotifyError> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.session(alert))
                .await
                .map_err(|_| {
                    NotifyError::Connection(format!("SMTP会话超时 ({}ms)", limit.as_millis()))
                })?,
            None => self.session(alert).await,
        }
    }

    async fn session(&self, alert: &AlertMessage) -> Result<(), NotifyError> {
        let hello = ClientId::default();

        self.trace_phase(SessionPhase::Connect);
        let mut connection = AsyncSmtpConnection::connect_tokio1(
            (self.config.host.as_str(), self.config.port),
            self.config.timeout,
            &hello,
            None,
            None,
        )
        .await
        .map_err(|e| classify_smtp_error(SessionPhase::Connect, &e))?;

        match self.exchange(&mut connection, &hello, alert).await {
            Ok(()) => {
                if let Err(e) = connection.quit().await {
                    // 邮件已被服务器接受，QUIT 失败不影响结果
                    debug!("关闭SMTP会话失败: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                connection.abort().await;
                Err(e)
            }
        }
    }

    /// 在已建立的连接上完成 STARTTLS、认证和投递
    async fn exchange(
        &self,
        connection: &mut AsyncSmtpConnection,
        hello: &ClientId,
        alert: &AlertMessage,
    ) -> Result<(), NotifyError> {
        self.trace_phase(SessionPhase::StartTls);
        let tls = TlsParameters::new(self.config.host.clone())
            .map_err(|e| classify_smtp_error(SessionPhase::StartTls, &e))?;
        connection
            .starttls(tls, hello)
            .await
            .map_err(|e| classify_smtp_error(SessionPhase::StartTls, &e))?;

        self.trace_phase(SessionPhase::Authenticate);
        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );
        connection
            .auth(DEFAULT_MECHANISMS, &credentials)
            .await
            .map_err(|e| classify_smtp_error(SessionPhase::Authenticate, &e))?;

        self.trace_phase(SessionPhase::Send);
        let message = self.build_message(alert)?;
        let response = connection
            .send(message.envelope(), &message.formatted())
            .await
            .map_err(|e| classify_smtp_error(SessionPhase::Send, &e))?;

        if self.config.protocol_trace {
            debug!("SMTP服务器响应: {:?}", response);
        }

        Ok(())
    }
}

/// 解析发件人，不是完整地址时补上服务器域名
fn sender_mailbox(from: &str, host: &str) -> Result<Mailbox, NotifyError> {
    if let Ok(mailbox) = from.parse::<Mailbox>() {
        return Ok(mailbox);
    }
    let address = Address::new(from, host)?;
    Ok(Mailbox::new(None, address))
}

/// SMTP回复码的数值形式
fn reply_code(code: Code) -> u16 {
    u16::from(code)
}

fn classify_smtp_error(phase: SessionPhase, error: &lettre::transport::smtp::Error) -> NotifyError {
    classify(phase, error.status().map(reply_code), error_chain(error))
}

/// 连接阶段的任何失败都是连接错误；认证阶段被服务器拒绝是认证错误；其余为一般错误
fn classify(phase: SessionPhase, code: Option<u16>, description: String) -> NotifyError {
    match (phase, code) {
        (SessionPhase::Connect, _) => NotifyError::Connection(description),
        (SessionPhase::Authenticate, Some(_)) => NotifyError::Authentication(description),
        _ => NotifyError::Smtp(description),
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, message: &AlertMessage) -> DeliveryOutcome {
        let span = tracing::info_span!(
            "smtp_session",
            host = %self.config.host,
            port = self.config.port,
            recipient = %message.to
        );

        match self.deliver(message).instrument(span).await {
            Ok(()) => {
                info!("告警邮件已发送至 {}", message.to);
                DeliveryOutcome::Sent
            }
            Err(cause) => {
                error!("发送告警邮件失败（{}）: {}", cause.kind(), cause);
                DeliveryOutcome::Failed { cause }
            }
        }
    }
}
