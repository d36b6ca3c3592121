//! Fetching from files and HTTP, and the empty-dataset fallback.

use super::common::{write_temp_csv, RHINOPLASTY_CSV};
use quarry::{
    fetch_text, load, load_session, Config, CsvOptions, HtmlRenderer, LoadError, Source,
};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one canned HTTP response on a local port.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/output/eppley_master.csv", addr)
}

#[tokio::test]
async fn test_load_from_file() {
    let (_dir, path) = write_temp_csv(RHINOPLASTY_CSV);
    let records = load(&Source::Path(path), &CsvOptions::default()).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Rhinoplasty, Revisited");
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let source = Source::Path(PathBuf::from("/definitely/not/here.csv"));
    let err = fetch_text(&source).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_missing_file_loads_as_empty() {
    let source = Source::Path(PathBuf::from("/definitely/not/here.csv"));
    assert!(load(&source, &CsvOptions::default()).await.is_empty());
}

#[tokio::test]
async fn test_load_over_http() {
    let url = serve_once("200 OK", RHINOPLASTY_CSV).await;
    let records = load(&Source::Url(url), &CsvOptions::default()).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].journal, "JPRS");
}

#[tokio::test]
async fn test_http_404_is_status_error() {
    let url = serve_once("404 Not Found", "missing").await;
    let err = fetch_text(&Source::Url(url)).await.unwrap_err();
    assert!(matches!(err, LoadError::Status { status: 404, .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_http_404_leaves_usable_empty_session() {
    let url = serve_once("404 Not Found", "missing").await;
    let config = Config {
        source: url,
        ..Config::default()
    };

    let session = load_session(&config).await;
    assert!(session.is_empty());
    assert!(session.query("rhinoplasty").is_empty());
    assert_eq!(session.on_input("rhinoplasty", &HtmlRenderer::default()), "");
}

#[tokio::test]
async fn test_unparseable_source_leaves_empty_session() {
    let config = Config {
        source: "   ".to_string(),
        ..Config::default()
    };
    assert!(load_session(&config).await.is_empty());
}
