//! HTTP可达性检测器实现
//!
//! 对单个URL执行一次GET请求，并把结果归类为可达或不可达

use crate::config::HttpConfig;
use crate::error::{error_chain, CheckError};
use crate::health::result::{CheckOutcome, CheckResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// 可达性检测器trait，定义检测接口
#[async_trait]
pub trait ReachabilityChecker: Send + Sync {
    /// 执行一次检测
    ///
    /// 不会返回错误：所有失败都被归类为 `CheckOutcome::Unreachable`
    async fn check(&self, url: &str) -> CheckResult;
}

/// HTTP可达性检测器实现
pub struct HttpReachabilityChecker {
    /// HTTP客户端
    client: Client,
    /// 请求超时时间
    timeout: Duration,
}

impl HttpReachabilityChecker {
    /// 创建新的HTTP检测器
    ///
    /// # 参数
    /// * `config` - HTTP检测配置
    ///
    /// # 返回
    /// * `Result<Self, CheckError>` - 检测器实例
    pub fn new(config: &HttpConfig) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// 请求超时时间
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 根据状态码得出结论，只有 200 视为可达
    fn classify_status(status: StatusCode) -> CheckOutcome {
        if status == StatusCode::OK {
            CheckOutcome::Reachable {
                status_code: status.as_u16(),
            }
        } else {
            CheckOutcome::Unreachable {
                cause: CheckError::UnexpectedStatus {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                },
            }
        }
    }

    /// 把请求错误归类
    fn classify_error(error: reqwest::Error) -> CheckError {
        if error.is_timeout() {
            CheckError::Timeout
        } else if error.is_connect() {
            CheckError::Connection(error_chain(&error))
        } else {
            CheckError::Request(error)
        }
    }
}

#[async_trait]
impl ReachabilityChecker for HttpReachabilityChecker {
    async fn check(&self, url: &str) -> CheckResult {
        let start_time = Instant::now();

        let outcome = match self.client.get(url).send().await {
            Ok(response) => Self::classify_status(response.status()),
            Err(e) => CheckOutcome::Unreachable {
                cause: Self::classify_error(e),
            },
        };

        let result = CheckResult::new(url, outcome).with_response_time(start_time.elapsed());

        match &result.outcome {
            CheckOutcome::Reachable { .. } => {
                info!("URL {} 访问成功 ({}ms)", url, result.response_time_ms());
            }
            CheckOutcome::Unreachable { cause } => {
                warn!("URL {} 不可达: {}", url, cause);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn create_test_checker(timeout: Duration) -> HttpReachabilityChecker {
        HttpReachabilityChecker::new(&HttpConfig { timeout }).unwrap()
    }

    #[test]
    fn test_checker_creation() {
        let checker = HttpReachabilityChecker::new(&HttpConfig::default());
        assert!(checker.is_ok());
        assert_eq!(checker.unwrap().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_classify_status() {
        assert!(HttpReachabilityChecker::classify_status(StatusCode::OK).is_reachable());
        assert!(!HttpReachabilityChecker::classify_status(StatusCode::NO_CONTENT).is_reachable());
        assert!(!HttpReachabilityChecker::classify_status(StatusCode::FOUND).is_reachable());
        assert!(!HttpReachabilityChecker::classify_status(StatusCode::NOT_FOUND).is_reachable());
        assert!(
            !HttpReachabilityChecker::classify_status(StatusCode::SERVICE_UNAVAILABLE)
                .is_reachable()
        );
    }

    #[tokio::test]
    async fn test_status_200_is_reachable() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;

        let checker = create_test_checker(Duration::from_secs(10));
        let result = checker.check(&format!("{}/health", server.url())).await;

        mock.assert_async().await;
        assert!(result.is_reachable());
        assert_eq!(result.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_non_200_is_unreachable() {
        let mut server = mockito::Server::new_async().await;
        let _down = server
            .mock("GET", "/down")
            .with_status(503)
            .create_async()
            .await;
        let _created = server
            .mock("GET", "/created")
            .with_status(201)
            .create_async()
            .await;

        let checker = create_test_checker(Duration::from_secs(10));

        let result = checker.check(&format!("{}/down", server.url())).await;
        assert!(!result.is_reachable());
        assert_eq!(result.status_code(), Some(503));
        assert!(result.outcome.to_string().contains("HTTP 503"));

        // 2xx 但不是 200 同样视为不可达
        let result = checker.check(&format!("{}/created", server.url())).await;
        assert!(!result.is_reachable());
        assert_eq!(result.status_code(), Some(201));
    }

    #[tokio::test]
    async fn test_redirect_is_followed() {
        let mut server = mockito::Server::new_async().await;
        let _moved = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create_async()
            .await;
        let _target = server
            .mock("GET", "/new")
            .with_status(200)
            .create_async()
            .await;

        let checker = create_test_checker(Duration::from_secs(10));
        let result = checker.check(&format!("{}/old", server.url())).await;

        assert!(result.is_reachable());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let checker = create_test_checker(Duration::from_secs(5));
        let result = checker.check(&format!("http://{addr}/")).await;

        assert!(!result.is_reachable());
        assert!(matches!(
            result.outcome,
            CheckOutcome::Unreachable {
                cause: CheckError::Connection(_)
            }
        ));
    }

    #[tokio::test]
    async fn test_timeout_handling() {
        // 接受连接但从不响应
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let checker = create_test_checker(Duration::from_millis(200));
        let result = checker.check(&format!("http://{addr}/")).await;

        assert!(!result.is_reachable());
        assert!(matches!(
            result.outcome,
            CheckOutcome::Unreachable {
                cause: CheckError::Timeout
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_is_unreachable() {
        let checker = create_test_checker(Duration::from_secs(1));
        let result = checker.check("not a url").await;

        assert!(!result.is_reachable());
        assert_eq!(result.status_code(), None);
    }
}
