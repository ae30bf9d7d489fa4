//! Exercises `SimplyTranslateClient` against a canned in-process HTTP server

use std::time::Duration;

use st_translator::{SimplyTranslateClient, TranslateError, TranslationRequest, Translator};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept one connection, answer it, and hand back the raw request head
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&head).into_owned()
    });

    (format!("http://{addr}/"), handle)
}

fn client(base_url: &str) -> SimplyTranslateClient {
    SimplyTranslateClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn sends_query_parameters_and_parses_body() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"translated_text":"你好世界","source_language":"en","extra":true}"#,
    )
    .await;

    let request = TranslationRequest::new("en", "zh-TW", "Hello world");
    let result = client(&base).translate(&request).await.unwrap();

    assert_eq!(result.translated_text, "你好世界");
    assert_eq!(result.source_language_detected.as_deref(), Some("en"));
    assert!(result.pronunciation.is_none());

    let head = server.await.unwrap();
    let request_line = head.lines().next().unwrap();
    assert!(request_line.starts_with("GET /api/translate/?"), "{request_line}");
    assert!(request_line.contains("engine=google"));
    assert!(request_line.contains("from=en"));
    assert!(request_line.contains("to=zh-TW"));
    assert!(request_line.contains("text=Hello+world"));
}

#[tokio::test]
async fn forwards_custom_engine_and_auto_source() {
    let (base, server) = serve_once("200 OK", r#"{"translated_text":"Hallo"}"#).await;

    let request = TranslationRequest::new("auto", "de", "Hello").with_engine("libre");
    let result = client(&base).translate(&request).await.unwrap();
    assert_eq!(result.translated_text, "Hallo");

    let head = server.await.unwrap();
    assert!(head.contains("engine=libre"));
    assert!(head.contains("from=auto"));
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let (base, _server) = serve_once("503 Service Unavailable", "{}").await;

    let request = TranslationRequest::new("en", "ja", "Hello");
    let err = client(&base).translate(&request).await.unwrap_err();

    assert!(matches!(err, TranslateError::UpstreamError { status: 503 }), "{err:?}");
}

#[tokio::test]
async fn unparseable_body_is_malformed_response() {
    let (base, _server) = serve_once("200 OK", "<html>not json</html>").await;

    let request = TranslationRequest::new("en", "ja", "Hello");
    let err = client(&base).translate(&request).await.unwrap_err();

    assert!(matches!(err, TranslateError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = TranslationRequest::new("en", "ja", "Hello");
    let err = client(&format!("http://{addr}"))
        .translate(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::NetworkError(_)), "{err:?}");
}

#[tokio::test]
async fn exceeding_timeout_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let client =
        SimplyTranslateClient::new(&format!("http://{addr}"), Duration::from_millis(200)).unwrap();
    let request = TranslationRequest::new("en", "ja", "Hello");
    let err = client.translate(&request).await.unwrap_err();

    assert!(matches!(err, TranslateError::NetworkError(_)), "{err:?}");
}
