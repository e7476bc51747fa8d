//! End-to-end resolution against a real static root on disk

use asset_resolver::http::date::parse_http_date;
use asset_resolver::{InvocationRequest, InvocationResponse, Resolver};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

fn static_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("index.html"), "<html>...</html>").unwrap();
    fs::write(root.join("favicon.ico"), [0u8, 1, 2, 3, 254, 255]).unwrap();
    fs::write(root.join("manifest.json"), r#"{"short_name":"App"}"#).unwrap();
    fs::create_dir_all(root.join("static/js")).unwrap();
    fs::write(root.join("static/js/main.7094825f.js"), "console.log(1)").unwrap();
    dir
}

async fn resolve(root: &Path, path: &str) -> InvocationResponse {
    Resolver::new(root)
        .resolve(&InvocationRequest::new(path))
        .await
}

#[tokio::test]
async fn root_scenario() {
    let dir = static_root();
    let resp = resolve(dir.path(), "/").await;

    assert_eq!(resp.status_code, 200);
    assert!(resp.is_base64_encoded);
    assert_eq!(resp.body, STANDARD.encode("<html>...</html>"));
    assert_eq!(resp.header("Content-Type"), Some("text/html"));

    let mtime: DateTime<Utc> = fs::metadata(dir.path().join("index.html"))
        .unwrap()
        .modified()
        .unwrap()
        .into();
    let header = parse_http_date(resp.header("Last-Modified").unwrap()).unwrap();
    assert_eq!(header.timestamp(), mtime.timestamp());
}

#[tokio::test]
async fn empty_path_matches_slash() {
    let dir = static_root();
    assert_eq!(resolve(dir.path(), "").await, resolve(dir.path(), "/").await);
}

#[tokio::test]
async fn nested_asset_has_no_content_type() {
    let dir = static_root();
    let resp = resolve(dir.path(), "/static/js/main.7094825f.js").await;

    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.header("Content-Type"), None);
    assert!(resp.header("Last-Modified").is_some());
    assert_eq!(resp.decode_body().unwrap(), b"console.log(1)");
}

#[tokio::test]
async fn binary_bytes_survive_encoding() {
    let dir = static_root();
    let resp = resolve(dir.path(), "/favicon.ico").await;
    assert_eq!(resp.decode_body().unwrap(), vec![0u8, 1, 2, 3, 254, 255]);
}

#[tokio::test]
async fn missing_scenario() {
    let dir = static_root();
    let resp = resolve(dir.path(), "/missing.png").await;

    assert_eq!(resp.status_code, 404);
    assert!(!resp.is_base64_encoded);
    assert!(resp.headers.is_empty());
    let value: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(value["message"], "File not found: /missing.png");
}

#[tokio::test]
async fn directory_is_500() {
    let dir = static_root();
    let resp = resolve(dir.path(), "/static").await;

    assert_eq!(resp.status_code, 500);
    assert!(resp.headers.is_empty());
    assert!(resp
        .error_body()
        .unwrap()
        .message
        .starts_with("Failed to read file /static: "));
}

#[tokio::test]
async fn dot_only_path_is_root_directory_500() {
    let dir = static_root();
    for path in ["/./", "//"] {
        let resp = resolve(dir.path(), path).await;
        assert_eq!(resp.status_code, 500, "{path}");
        assert_eq!(resp.header("Content-Type"), None);
        assert!(resp.headers.is_empty());
        assert!(resp.error_body().is_some());
    }
}

#[tokio::test]
async fn traversal_cannot_escape_root() {
    let outer = tempfile::tempdir().unwrap();
    fs::write(outer.path().join("secret.txt"), "top secret").unwrap();
    let root = outer.path().join("public");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("index.html"), "hi").unwrap();

    for path in ["/../secret.txt", "/a/../../secret.txt", "/./../secret.txt"] {
        let resp = resolve(&root, path).await;
        assert_eq!(resp.status_code, 404, "{path}");
        assert!(!resp.body.contains("top secret"));
    }

    let resp = resolve(&root, "/sub/../index.html").await;
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.decode_body().unwrap(), b"hi");
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let dir = static_root();
    let first = resolve(dir.path(), "/manifest.json").await;
    let second = resolve(dir.path(), "/manifest.json").await;
    assert_eq!(first, second);

    let first = resolve(dir.path(), "/nope").await;
    let second = resolve(dir.path(), "/nope").await;
    assert_eq!(first, second);
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_file_is_500() {
    use std::os::unix::fs::PermissionsExt;

    let dir = static_root();
    let path = dir.path().join("private.key");
    fs::write(&path, "key").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to assert there
    if fs::read(&path).is_ok() {
        return;
    }

    let resp = resolve(dir.path(), "/private.key").await;
    assert_eq!(resp.status_code, 500);
    assert!(resp.error_body().is_some());
}
