//! URL Sentinel 主程序入口
//!
//! 检测一次URL可达性，不可达时发送邮件告警

use clap::Parser;
use url_sentinel::cli::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 不可达的URL和发送失败的邮件不影响退出码，只有启动失败才返回非0
    if let Err(e) = url_sentinel::core::run(&args).await {
        if url_sentinel::logging::LoggingSystem::is_initialized() {
            tracing::error!("运行失败: {}", e);
        } else {
            eprintln!("运行失败: {e}");
        }
        std::process::exit(1);
    }
}
