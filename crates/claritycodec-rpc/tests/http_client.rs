//! `HttpReadOnlyClient` against a scripted local HTTP server.

use std::sync::{Arc, Mutex};

use claritycodec_core::ClarityValue;
use claritycodec_rpc::{ApiConfig, CallReadRequest, ClientError, HttpReadOnlyClient, ReadOnlyTransport, RetrySettings};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

type Seen = Arc<Mutex<Vec<String>>>;

async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + len {
                break;
            }
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serve one scripted response per connection, recording each raw request.
async fn serve(script: Vec<(u16, &'static str)>) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let seen: Seen = Arc::default();
    let log = seen.clone();
    tokio::spawn(async move {
        for (status, body) in script {
            let (mut stream, _) = listener.accept().await.unwrap();
            let req = read_request(&mut stream).await.unwrap();
            log.lock().unwrap().push(req);
            let resp = format!(
                "HTTP/1.1 {status} Scripted\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(resp.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
    });
    (url, seen)
}

fn client(base_url: String, max_retries: u32) -> HttpReadOnlyClient {
    HttpReadOnlyClient::new(&ApiConfig {
        base_url,
        api_key: Some("test-key".into()),
        timeout_ms: 5_000,
        requests_per_second: 0.0,
        retry: RetrySettings {
            max_retries,
            initial_backoff_ms: 1,
            max_backoff_ms: 5,
        },
    })
    .unwrap()
}

fn size_request() -> CallReadRequest {
    CallReadRequest::new(
        "SP000000000000000000002Q6VF78.pox-4".parse().unwrap(),
        "get-reward-set-size",
        "SP3TRVBX53CN78AS8C3HNTM3GPNDHGA34F9M7MAH2",
    )
    .arg(ClarityValue::UInt(90))
}

#[tokio::test]
async fn retries_server_error_then_decodes() {
    let (url, seen) = serve(vec![
        (503, r#"{"error":"busy"}"#),
        (200, r#"{"okay":true,"result":"0x0100000000000000000000000000000007"}"#),
    ])
    .await;

    let value = client(url, 2).call_read_value(&size_request()).await.unwrap();
    assert_eq!(value, ClarityValue::UInt(7));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    let req = seen[1].to_lowercase();
    assert!(req.starts_with(
        "post /v2/contracts/call-read/sp000000000000000000002q6vf78/pox-4/get-reward-set-size http/1.1"
    ));
    assert!(req.contains("x-api-key: test-key"));
    assert!(seen[1].contains(r#""sender":"SP3TRVBX53CN78AS8C3HNTM3GPNDHGA34F9M7MAH2""#));
    assert!(seen[1].contains(r#""arguments":["0x010000000000000000000000000000005a"]"#));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let (url, seen) = serve(vec![(404, "not found")]).await;

    let err = client(url, 3).call_read(&size_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 404, ref body } if body == "not found"));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn contract_failure_surfaces_cause() {
    let (url, _) = serve(vec![(200, r#"{"okay":false,"cause":"NoSuchContract"}"#)]).await;

    let err = client(url, 0).call_read_value(&size_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::CallFailed { ref cause } if cause == "NoSuchContract"));
}

#[tokio::test]
async fn throttled_call_is_retried() {
    let (url, seen) = serve(vec![
        (429, "slow down"),
        (200, r#"{"okay":true,"result":"0x0100000000000000000000000000000002"}"#),
    ])
    .await;

    let value = client(url, 1).call_read_value(&size_request()).await.unwrap();
    assert_eq!(value, ClarityValue::UInt(2));
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn throttling_reported_once_retries_run_out() {
    let (url, _) = serve(vec![(429, "slow down")]).await;

    let err = client(url.clone(), 0).call_read(&size_request()).await.unwrap_err();
    match err {
        ClientError::RateLimited { endpoint } => {
            assert!(endpoint.starts_with(&url));
            assert!(endpoint.ends_with("/pox-4/get-reward-set-size"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
