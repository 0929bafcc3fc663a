//! Index sources against real files and a local HTTP listener.

mod common;

use assert2::{check, let_assert};
use common::TempWorkspace;
use docsift::config::SearchSettings;
use docsift::error::FetchError;
use docsift::{FileSource, HttpSource, IndexSource, SearchOutcome, SearchSession, SessionStatus};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const INDEX_JSON: &str =
    r#"[{"slug":"a","lang":"en","title":"Alpha","headings":[],"excerpt":"First letter."}]"#;

/// Serves a single raw HTTP `response` on an ephemeral port and returns the index URL.
async fn serve_once(response: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        // Consume the request head before answering
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
    });

    format!("http://{}/search-index.json", addr)
}

fn response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

#[tokio::test]
async fn http_success_yields_entries() {
    let url = serve_once(response("200 OK", INDEX_JSON)).await;
    let entries = HttpSource::new(url).fetch().await.unwrap();

    check!(entries.len() == 1);
    check!(entries[0].title == "Alpha");
}

#[tokio::test]
async fn http_not_found_is_status_error() {
    let url = serve_once(response("404 Not Found", "")).await;
    let result = HttpSource::new(url.clone()).fetch().await;

    let_assert!(Err(FetchError::Status { url: failed, status }) = result);
    check!(status == 404);
    check!(failed == url);
}

#[tokio::test]
async fn http_refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = HttpSource::new(format!("http://{}/search-index.json", addr))
        .fetch()
        .await;
    check!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn http_garbage_body_is_malformed() {
    let url = serve_once(response("200 OK", "<html>not an index</html>")).await;
    let result = HttpSource::new(url).fetch().await;
    check!(matches!(result, Err(FetchError::Malformed(_))));
}

#[tokio::test]
async fn corrupt_index_file_is_malformed() {
    let workspace = TempWorkspace::new();
    workspace.create_file("public/search-index.json", "{\"slug\": truncated");

    let result = FileSource::new(workspace.index_path()).fetch().await;
    check!(matches!(result, Err(FetchError::Malformed(_))));
}

#[tokio::test]
async fn directory_location_reads_standard_file_name() {
    let workspace = TempWorkspace::new();
    workspace.create_file("public/search-index.json", INDEX_JSON);

    let source = FileSource::new(workspace.path().join("public"));
    check!(source.describe().ends_with("search-index.json"));
    check!(source.fetch().await.unwrap().len() == 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn session_over_missing_http_index_is_ready_and_empty() {
    let url = serve_once(response("404 Not Found", "")).await;
    let session = SearchSession::open(Arc::new(HttpSource::new(url.clone())), SearchSettings::default());

    check!(session.wait_ready().await.is_empty());
    let_assert!(SessionStatus::Ready { source, entries, .. } = session.status());
    check!(source == url);
    check!(entries == 0);
    check!(matches!(session.search("alpha", "en"), SearchOutcome::NoResults));
}

#[tokio::test(flavor = "multi_thread")]
async fn session_over_http_index_finds_entries() {
    let url = serve_once(response("200 OK", INDEX_JSON)).await;
    let session = SearchSession::open(Arc::new(HttpSource::new(url)), SearchSettings::default());

    session.wait_ready().await;
    let_assert!(SearchOutcome::Results(hits) = session.search("alpha", "en"));
    check!(hits[0].path() == "/docs/a");
}
