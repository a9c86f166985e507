//! Live-server tests: bind an ephemeral port and verify that every response
//! path carries the cross-origin isolation triplet.

use sitekit::config::Config;
use sitekit::server::Server;
use std::net::SocketAddr;
use std::path::Path;
use tempfile::TempDir;

const ISOLATION_HEADERS: [(&str, &str); 3] = [
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-embedder-policy", "require-corp"),
    ("cross-origin-resource-policy", "cross-origin"),
];

fn assert_isolated(response: &reqwest::Response) {
    for (name, value) in ISOLATION_HEADERS {
        assert_eq!(
            response
                .headers()
                .get(name)
                .unwrap_or_else(|| panic!("missing {name}")),
            value,
            "wrong value for {name}"
        );
    }
}

/// Spawn a server on 127.0.0.1:0 over the given root and return its address.
fn start_server(root: &Path) -> SocketAddr {
    let mut config = Config::load_from("/nonexistent/sitekit-test").expect("defaults load");
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.root = root.to_path_buf();

    let server = Server::bind(config).expect("bind on an ephemeral port");
    let addr = server.local_addr().expect("bound address");
    tokio::spawn(server.run());
    addr
}

#[tokio::test]
async fn existing_file_gets_200_with_isolation_and_content_type() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("player.js"), b"export const player = 1;").unwrap();
    let addr = start_server(root.path());

    let response = reqwest::get(format!("http://{addr}/player.js"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_isolated(&response);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/javascript"
    );
    assert_eq!(response.bytes().await.unwrap(), &b"export const player = 1;"[..]);
}

#[tokio::test]
async fn missing_path_gets_404_with_isolation() {
    let root = TempDir::new().unwrap();
    let addr = start_server(root.path());

    let response = reqwest::get(format!("http://{addr}/missing.wasm"))
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_isolated(&response);
}

#[tokio::test]
async fn disallowed_method_gets_405_with_isolation() {
    let root = TempDir::new().unwrap();
    let addr = start_server(root.path());

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/upload"))
        .body("payload")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 405);
    assert_isolated(&response);
}

#[tokio::test]
async fn options_gets_204_with_isolation() {
    let root = TempDir::new().unwrap();
    let addr = start_server(root.path());

    let client = reqwest::Client::new();
    let response = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 204);
    assert_isolated(&response);
}

#[tokio::test]
async fn head_gets_headers_without_a_body() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("index.html"), b"<html>mascot</html>").unwrap();
    let addr = start_server(root.path());

    let client = reqwest::Client::new();
    let response = client
        .head(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_isolated(&response);
    assert_eq!(response.headers().get("content-length").unwrap(), "19");
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn ranged_request_gets_206_with_isolation() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("track.mp3"), b"0123456789").unwrap();
    let addr = start_server(root.path());

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{addr}/track.mp3"))
        .header("Range", "bytes=0-3")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 206);
    assert_isolated(&response);
    assert_eq!(
        response.headers().get("content-range").unwrap(),
        "bytes 0-3/10"
    );
    assert_eq!(response.bytes().await.unwrap(), &b"0123"[..]);
}

#[tokio::test]
async fn directory_redirect_carries_isolation() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir(root.path().join("Music")).unwrap();
    let addr = start_server(root.path());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let response = client
        .get(format!("http://{addr}/Music"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 301);
    assert_isolated(&response);
    assert_eq!(response.headers().get("location").unwrap(), "/Music/");
}
