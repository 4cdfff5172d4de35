use std::time::Duration;

use analyst_engine::{
    AnalysisReply, AnalysisService, FailureKind, ReqwestAnalysisService, ServiceSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestAnalysisService {
    ReqwestAnalysisService::new(ServiceSettings {
        endpoint: format!("{}/api/analyze", server.uri()),
        ..ServiceSettings::default()
    })
    .expect("valid settings")
}

#[tokio::test]
async fn posts_query_and_profile_and_returns_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "query": "What are Apple's latest earnings?",
            "profile": "a retail investor",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Apple reported ...",
            "sources": ["https://example.com/aapl"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service_for(&server)
        .analyze("What are Apple's latest earnings?", "a retail investor")
        .await
        .expect("analysis ok");

    assert_eq!(
        reply,
        AnalysisReply {
            answer: "Apple reported ...".to_string(),
            sources: vec!["https://example.com/aapl".to_string()],
        }
    );
}

#[tokio::test]
async fn missing_fields_pass_through_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let reply = service_for(&server).analyze("q", "p").await.expect("analysis ok");
    assert_eq!(reply.answer, "");
    assert!(reply.sources.is_empty());
}

#[tokio::test]
async fn server_error_carries_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "model unavailable" })),
        )
        .mount(&server)
        .await;

    let err = service_for(&server).analyze("q", "p").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.service_message.as_deref(), Some("model unavailable"));
    assert_eq!(err.display_message().as_deref(), Some("model unavailable"));
}

#[tokio::test]
async fn server_error_without_body_names_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = service_for(&server).analyze("q", "p").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.service_message, None);
    assert_eq!(
        err.display_message().as_deref(),
        Some("HTTP error! status: 503")
    );
}

#[tokio::test]
async fn undecodable_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = service_for(&server).analyze("q", "p").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert!(err
        .display_message()
        .unwrap()
        .starts_with("malformed response: "));
}

#[tokio::test]
async fn unreachable_backend_is_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = ReqwestAnalysisService::new(ServiceSettings {
        endpoint: format!("http://{addr}/api/analyze"),
        ..ServiceSettings::default()
    })
    .unwrap();

    let err = service.analyze("q", "p").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Transport);
    assert_eq!(err.display_message(), None);
}

#[tokio::test]
async fn configured_timeout_is_enforced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "answer": "late" })),
        )
        .mount(&server)
        .await;

    let service = ReqwestAnalysisService::new(ServiceSettings {
        endpoint: format!("{}/api/analyze", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..ServiceSettings::default()
    })
    .unwrap();

    let err = service.analyze("q", "p").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.display_message().as_deref(), Some("request timed out"));
}

#[test]
fn invalid_endpoint_is_rejected_up_front() {
    let err = ReqwestAnalysisService::new(ServiceSettings {
        endpoint: "not a url".to_string(),
        ..ServiceSettings::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("not a url"));
}
