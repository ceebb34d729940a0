//! Gateway responses are turned into delivery reports by each adapter

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use mt_shared::config::{BeemConfig, TigoConfig, TwilioConfig};

use crate::sms::{BeemSmsService, SmsProvider, TigoSmsService, TwilioSmsService};

const PHONE: &str = "+255712345678";

const TIMEOUT: Duration = Duration::from_secs(2);

/// Local HTTP server answering every request with one canned response
struct CannedServer {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    async fn start(status: u16, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    async fn start_with_delay(status: u16, body: &'static str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                seen.lock().unwrap().push(request);

                tokio::time::sleep(delay).await;
                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { url, requests }
    }

    fn last_request(&self) -> String {
        self.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

/// Read one HTTP/1.1 request, headers plus `Content-Length` bytes of body
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn beem(url: &str, timeout: Duration) -> BeemSmsService {
    let config = BeemConfig {
        api_key: Some("key".to_string()),
        secret_key: Some("secret".to_string()),
        api_url: format!("{}/v1/send", url),
        ..BeemConfig::default()
    };
    BeemSmsService::new(&config, timeout).unwrap()
}

fn tigo(url: &str, timeout: Duration) -> TigoSmsService {
    let config = TigoConfig {
        api_token: Some("token".to_string()),
        api_url: format!("{}/sms/sendsms", url),
        ..TigoConfig::default()
    };
    TigoSmsService::new(&config, timeout).unwrap()
}

fn twilio(url: &str, timeout: Duration) -> TwilioSmsService {
    let config = TwilioConfig {
        account_sid: Some("AC123".to_string()),
        auth_token: Some("secret".to_string()),
        from_number: Some("+15005550006".to_string()),
        api_base: url.to_string(),
    };
    TwilioSmsService::new(&config, timeout).unwrap()
}

#[tokio::test]
async fn test_beem_accepted() {
    let server = CannedServer::start(200, r#"{"successful":1,"request_id":"req-1"}"#).await;

    let report = beem(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(report.delivered);
    assert_eq!(report.message_id.as_deref(), Some("req-1"));
    assert!(report.error.is_none());

    let request = server.last_request();
    assert!(request.starts_with("POST /v1/send "));
    // base64("key:secret")
    assert!(request
        .to_lowercase()
        .contains("authorization: basic a2v5onnly3jlda=="));
    assert!(request.contains(r#""dest_addr":"255712345678""#));
}

#[tokio::test]
async fn test_beem_rejected() {
    let server =
        CannedServer::start(200, r#"{"successful":0,"message":"Insufficient balance"}"#).await;

    let report = beem(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(!report.delivered);
    assert_eq!(
        report.error.as_deref(),
        Some("Beem rejected message: Insufficient balance")
    );
}

#[tokio::test]
async fn test_beem_server_error() {
    let server = CannedServer::start(500, r#"{"message":"upstream down"}"#).await;

    let report = beem(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(!report.delivered);
    let error = report.error.unwrap();
    assert!(error.starts_with("HTTP 500: "), "{}", error);
    assert!(error.contains("upstream down"));
}

#[tokio::test]
async fn test_tigo_accepted() {
    let server = CannedServer::start(200, r#"{"status":"success","message_id":"tg-1"}"#).await;

    let report = tigo(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(report.delivered);
    assert_eq!(report.message_id.as_deref(), Some("tg-1"));

    let request = server.last_request();
    assert!(request.to_lowercase().contains("authorization: bearer token"));
    assert!(request.contains(r#""msisdn":"255712345678""#));
}

#[tokio::test]
async fn test_tigo_rejected() {
    let server = CannedServer::start(200, r#"{"status":"failed","message":"Invalid sender"}"#).await;

    let report = tigo(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(!report.delivered);
    assert_eq!(report.error.as_deref(), Some("Tigo rejected message: Invalid sender"));
}

#[tokio::test]
async fn test_tigo_non_json_body() {
    let server = CannedServer::start(200, "<html>maintenance</html>").await;

    let report = tigo(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(!report.delivered);
    let error = report.error.unwrap();
    assert!(error.starts_with("Invalid JSON response"), "{}", error);
    assert!(error.contains("maintenance"));
}

#[tokio::test]
async fn test_twilio_queued() {
    let server = CannedServer::start(201, r#"{"sid":"SM123","status":"queued"}"#).await;

    let report = twilio(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(report.delivered);
    assert_eq!(report.message_id.as_deref(), Some("SM123"));

    let request = server.last_request();
    assert!(request.starts_with("POST /Accounts/AC123/Messages.json "));
    assert!(request.contains("To=%2B255712345678"));
}

#[tokio::test]
async fn test_twilio_failed_status() {
    let server = CannedServer::start(
        200,
        r#"{"sid":"SM124","status":"failed","error_message":"Unreachable destination"}"#,
    )
    .await;

    let report = twilio(&server.url, TIMEOUT).send(PHONE, "hello").await;

    assert!(!report.delivered);
    assert_eq!(
        report.error.as_deref(),
        Some("Twilio message status failed: Unreachable destination")
    );
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let server = CannedServer::start_with_delay(
        201,
        r#"{"sid":"SM125","status":"queued"}"#,
        Duration::from_secs(5),
    )
    .await;

    let report = twilio(&server.url, Duration::from_millis(200))
        .send(PHONE, "hello")
        .await;

    assert!(!report.delivered);
    assert_eq!(report.error.as_deref(), Some("Request timed out"));
}
