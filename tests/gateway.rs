//! Local HTTP gateway over a real socket

use asset_resolver::config::{AppState, Config};
use asset_resolver::server::{self, SignalHandler};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::net::SocketAddr;
use std::sync::Arc;

fn test_config(root: &std::path::Path) -> Config {
    let mut config = Config::load_from("does-not-exist-anywhere").unwrap();
    config.assets.root = root.to_string_lossy().into_owned();
    config.logging.access_log = false;
    config.performance.read_timeout = 5;
    config.performance.write_timeout = 5;
    config
}

async fn fetch(
    addr: SocketAddr,
    method: Method,
    path: &str,
) -> (StatusCode, hyper::HeaderMap, Bytes) {
    let client = Client::builder(TokioExecutor::new()).build_http::<Empty<Bytes>>();
    let req = Request::builder()
        .method(method)
        .uri(format!("http://{addr}{path}"))
        .body(Empty::new())
        .unwrap();
    let resp = client.request(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

#[tokio::test]
async fn serves_until_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<p>and save to reload</p>").unwrap();
    std::fs::write(dir.path().join("logo512.png"), [0x89u8, 0x50, 0x4e, 0x47]).unwrap();

    let listener = server::create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::shared(test_config(dir.path()));
    let signals = Arc::new(SignalHandler::new());

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let server = tokio::task::spawn_local(server::start_server_loop(
                listener,
                state,
                Arc::clone(&signals),
            ));

            let (status, headers, body) = fetch(addr, Method::GET, "/").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(headers["content-type"], "text/html");
            assert!(headers.contains_key("last-modified"));
            assert_eq!(body, Bytes::from_static(b"<p>and save to reload</p>"));

            let (status, headers, body) = fetch(addr, Method::GET, "/logo512.png").await;
            assert_eq!(status, StatusCode::OK);
            assert!(!headers.contains_key("content-type"));
            assert_eq!(body, Bytes::from_static(&[0x89, 0x50, 0x4e, 0x47]));

            let (status, headers, body) = fetch(addr, Method::GET, "/missing.png").await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(headers["content-type"], "application/json");
            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["message"], "File not found: /missing.png");

            let (status, _, _) = fetch(addr, Method::POST, "/").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

            signals.request_shutdown();
            tokio::time::timeout(std::time::Duration::from_secs(5), server)
                .await
                .unwrap()
                .unwrap();
        })
        .await;
}
