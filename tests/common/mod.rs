//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use states_gateway::config::GatewayConfig;
use states_gateway::http::HttpServer;
use states_gateway::lifecycle::Shutdown;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Request targets (path + query) seen by a mock upstream, in arrival order.
pub type Seen = Arc<Mutex<Vec<String>>>;

/// Start a programmable mock upstream.
///
/// `f` receives the request target (e.g. `/api/v1/cities?state_id=3`) and
/// returns the status and body to answer with.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> (SocketAddr, Seen)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorder = seen.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let f = f.clone();
            let recorder = recorder.clone();
            tokio::spawn(async move {
                let mut reader = BufReader::new(socket);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).await.is_err() {
                    return;
                }
                // Drain headers up to the blank line.
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line == "\r\n" => break,
                        Ok(_) => {}
                    }
                }

                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                recorder.lock().unwrap().push(target.clone());

                let (status, body) = f(target).await;
                let reason = StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown");
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );

                let mut socket = reader.into_inner();
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, seen)
}

/// Start a mock upstream that always answers the same thing.
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> (SocketAddr, Seen) {
    start_programmable_upstream(move |_| async move { (status, body.to_string()) }).await
}

/// Gateway config pointed at `upstream`, listening on an ephemeral port.
pub fn config_for(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = format!("http://{}", upstream);
    config.upstream.request_timeout_secs = 2;
    config.upstream.connect_timeout_secs = 1;
    config
}

/// Start the gateway; returns its address and the shutdown handle.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // The listener is already bound; give the accept loop a moment.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// A client that never pools or proxies, so each test request is independent.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
