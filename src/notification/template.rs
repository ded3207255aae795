//! 消息模板模块
//!
//! 把不可达的URL渲染成告警邮件的主题和正文

use crate::notification::sender::AlertMessage;

/// 默认主题模板
pub const DEFAULT_SUBJECT_TEMPLATE: &str = "[ALERT] URL unreachable: {{url}}";

/// 默认正文模板
pub const DEFAULT_BODY_TEMPLATE: &str =
    "The URL {{url}} is unreachable. Please check the service.";

/// 告警模板，支持 `{{url}}` 占位符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertTemplate {
    /// 主题模板
    subject: String,
    /// 正文模板
    body: String,
}

impl Default for AlertTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SUBJECT_TEMPLATE, DEFAULT_BODY_TEMPLATE)
    }
}

impl AlertTemplate {
    /// 创建新的告警模板
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    fn replace_variables(template: &str, url: &str) -> String {
        template.replace("{{url}}", url)
    }

    /// 为不可达的URL构建告警消息
    ///
    /// # 参数
    /// * `url` - 不可达的URL
    /// * `from` - 发件人地址
    /// * `to` - 收件人地址
    ///
    /// # 返回
    /// * `AlertMessage` - 告警消息
    pub fn render(&self, url: &str, from: &str, to: &str) -> AlertMessage {
        AlertMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: Self::replace_variables(&self.subject, url),
            body: Self::replace_variables(&self.body, url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let message =
            AlertTemplate::default().render("https://example.com", "a@b.com", "x@y.com");

        assert_eq!(message.subject, "[ALERT] URL unreachable: https://example.com");
        assert_eq!(
            message.body,
            "The URL https://example.com is unreachable. Please check the service."
        );
        assert_eq!(message.from, "a@b.com");
        assert_eq!(message.to, "x@y.com");
    }

    #[test]
    fn test_url_is_inserted_literally() {
        let url = "https://example.com/path?q={{url}}&x=1";
        let message = AlertTemplate::new("down: {{url}}", "{{url}}").render(url, "a", "b");

        assert!(message.subject.starts_with("down: https://example.com/path?q="));
        assert!(message.body.starts_with(url));
    }
}
