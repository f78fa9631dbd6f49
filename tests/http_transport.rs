//! End-to-end through the real reqwest transport against a local mock
//! server.

use std::time::Duration;

use flexoffers_lib_rust::{ApiConfig, FlexOffersClient, Status};

const DOMAINS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<domains>
  <domain><Id>101</Id><Url>https://blog.example.com</Url></domain>
  <domain><Id>102</Id><Url>https://deals.example.com</Url></domain>
</domains>"#;

fn client_for(server: &mockito::ServerGuard) -> FlexOffersClient {
    FlexOffersClient::builder()
        .config(ApiConfig {
            base_url: server.url(),
            content_base_url: server.url(),
            api_key: None,
            timeout: Duration::from_secs(5),
            danger_accept_invalid_certs: false,
        })
        .build()
        .expect("client builds against the mock server")
}

#[tokio::test]
async fn test_get_domains_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/domains")
        .match_query(mockito::Matcher::Any)
        .match_header("apiKey", "k")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(DOMAINS_XML)
        .create_async()
        .await;

    let client = client_for(&server);
    let envelope = client.get_domains(Some("k"), 10).await;

    mock.assert_async().await;
    assert_eq!(envelope.status, Status::Success);
    assert_eq!(envelope.total_count, Some(2));
}

#[tokio::test]
async fn test_non_2xx_is_a_request_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/domains")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = client_for(&server);
    let envelope = client.get_domains(Some("k"), 10).await;

    assert_eq!(envelope.status, Status::Error);
    let message = envelope.message.unwrap();
    assert!(message.starts_with("API request failed: "), "{}", message);
    assert!(message.contains("500"));
}

#[tokio::test]
async fn test_top_programs_over_http() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/chat/GetGapOpportunityPrograms")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Success": true, "Data": [{"ProgramID": "1", "ProgramName": "Nike"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let envelope = client.get_top_programs(Some("k"), None).await;

    assert_eq!(envelope.status, Status::Success);
    assert_eq!(envelope.total_count, Some(1));
}
