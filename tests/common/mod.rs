//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ocr_gateway::config::{AuthStrategy, GatewayConfig};
use ocr_gateway::engine::{EngineError, OcrEngine};
use ocr_gateway::http::HttpServer;

/// Text produced by the fake engine installed by `spawn_gateway`.
pub const FAKE_ENGINE_TEXT: &str = "recognized-text";

/// In-process engine fake returning fixed text.
pub struct FixedEngine(pub &'static str);

#[async_trait]
impl OcrEngine for FixedEngine {
    async fn recognize(&self, _image: &[u8]) -> Result<String, EngineError> {
        Ok(self.0.to_string())
    }
}

/// Spawn the gateway on an ephemeral port with a fake engine
/// installed, so `/ocr` succeeds whenever the gate lets it through.
pub async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let server = HttpServer::new(config);
    server
        .engines()
        .install(Arc::new(FixedEngine(FAKE_ENGINE_TEXT)), vec!["ocr".into()]);
    spawn_server(server).await
}

/// Spawn the gateway without touching the engine slot.
pub async fn spawn_bare_gateway(config: GatewayConfig) -> SocketAddr {
    spawn_server(HttpServer::new(config)).await
}

async fn spawn_server(server: HttpServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    // Give the acceptor a beat.
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// Signature-strategy configuration with an inline secret.
pub fn signature_config(secret: Option<&str>) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.strategy = AuthStrategy::Signature;
    config.auth.secret = secret.map(str::to_string);
    config
}

/// Delegation-strategy configuration pointing at a validation
/// endpoint.
pub fn delegation_config(validation_url: Option<String>, timeout_secs: f64) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.strategy = AuthStrategy::Delegation;
    config.auth.validation_url = validation_url;
    config.auth.validation_timeout_secs = timeout_secs;
    config
}

#[derive(Serialize)]
struct TestClaims {
    iat: u64,
    exp: u64,
}

/// Sign a token with the given secret, expiring `exp_offset_secs`
/// from now (negative values produce an already-expired token).
pub fn sign_token(secret: &str, exp_offset_secs: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let claims = TestClaims {
        iat: now as u64,
        exp: (now + exp_offset_secs).max(0) as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Start a canned validation endpoint: reads each request, answers
/// with a fixed status and body, then closes.
pub async fn start_validation_stub(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Read the request headers before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let reason = match status {
                            200 => "OK",
                            401 => "Unauthorized",
                            403 => "Forbidden",
                            500 => "Internal Server Error",
                            _ => "Status",
                        };
                        let response = format!(
                            "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start an endpoint that accepts connections and never answers.
pub async fn start_stalling_stub() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        let _socket = socket;
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing listens on (bound briefly, then released).
pub async fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
