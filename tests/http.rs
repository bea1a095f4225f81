use std::time::Duration;

use teleforte::{KnownResponseCode, ResponseId, TeleforteClient, TeleforteError};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TeleforteClient {
    let mut client = TeleforteClient::builder("test_key")
        .endpoint(format!("{}/messages/post_req", server.uri()))
        .user_agent("teleforte-test")
        .sender("ACME")
        .build()
        .unwrap();
    client.add_recipient("491111").unwrap();
    client.add_recipient("492222").unwrap();
    client
}

#[tokio::test]
async fn posts_form_encoded_payload_and_returns_response_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages/post_req"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("user-agent", "teleforte-test"))
        .and(body_string(
            "recipient=491111%3B492222&sender=ACME&message=hi&api_key=test_key",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("200:12345"))
        .expect(1)
        .mount(&server)
        .await;

    let id = client_for(&server).send_message("hi").await.unwrap();
    assert_eq!(id, ResponseId::new(12345));
}

#[tokio::test]
async fn provider_failure_code_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0:0"))
        .mount(&server)
        .await;

    let err = client_for(&server).send_message("hi").await.unwrap_err();
    assert!(matches!(
        err,
        TeleforteError::Provider { code, .. } if code.known() == Some(KnownResponseCode::HostFatal)
    ));
}

#[tokio::test]
async fn service_unavailable_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).send_message("hi").await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(
        err,
        TeleforteError::HttpStatus {
            status: 503,
            body: None
        }
    ));
}

#[tokio::test]
async fn trailing_newline_in_body_is_a_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("200:12345\n"))
        .mount(&server)
        .await;

    let err = client_for(&server).send_message("hi").await.unwrap_err();
    assert!(matches!(err, TeleforteError::Protocol { ref body, .. } if body == "200:12345\n"));
}

#[tokio::test]
async fn preconditions_fail_without_touching_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("200:1"))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send_message("x".repeat(161)).await.unwrap_err();
    assert!(matches!(err, TeleforteError::Precondition(_)));
}

#[tokio::test]
async fn slow_server_hits_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("200:1")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut client = TeleforteClient::builder("test_key")
        .endpoint(format!("{}/messages/post_req", server.uri()))
        .timeout(Duration::from_millis(100))
        .sender("ACME")
        .build()
        .unwrap();
    client.add_recipient("491111").unwrap();

    let err = client.send_message("hi").await.unwrap_err();
    assert!(matches!(err, TeleforteError::Transport(_)));
}
