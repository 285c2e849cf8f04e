// tests/common/mod.rs
//! 集成测试公共设施：在本地随机端口拉起 axum 后端桩服务，
//! 并构造指向它的客户端配置。

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use secrecy::SecretString;
use wardrobe_client::core::config::Config;

/// 启动桩后端并返回其监听地址。服务随测试进程结束一起销毁。
pub async fn spawn_backend(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// 指向桩后端的测试配置。
pub fn test_config(addr: SocketAddr, session_file: &Path, debounce_ms: u64) -> Config {
    Config {
        backend_url: format!("http://{addr}"),
        api_key: SecretString::from("dev-api-key-12345".to_string()),
        debounce_ms,
        session_file: session_file.to_string_lossy().into_owned(),
        rust_log: "info".to_string(),
    }
}
