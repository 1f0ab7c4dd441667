//! Server lifecycle: bind, serve, shut down.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use civic_issues::config::AppConfig;
use civic_issues::server::{ServerHandle, ServerOptions};
use civic_issues::DatabaseConfig;

fn test_options() -> ServerOptions {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.shutdown_timeout = 5;
    config.database = DatabaseConfig::in_memory();
    ServerOptions {
        config,
        auto_migrate: true,
    }
}

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_until_shutdown_is_triggered() {
    let handle = ServerHandle::start(test_options()).await.unwrap();
    assert_ne!(handle.local_addr.port(), 0);
    assert!(handle.is_running());

    let response = get(handle.local_addr, "/health").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    assert!(response.contains("\"database\""));

    handle.trigger_shutdown();
    tokio::time::timeout(Duration::from_secs(5), async {
        while handle.is_running() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    handle.wait().await;
}

#[tokio::test]
async fn shutdown_stops_the_listener() {
    let handle = ServerHandle::start(test_options()).await.unwrap();
    let addr = handle.local_addr;
    assert!(!handle.shutdown_signal().is_triggered());

    tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
        .await
        .unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
