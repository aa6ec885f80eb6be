//! # Integration Tests for the HTTP Collaborator Clients
//!
//! Exercises [`HttpDirectory`] and [`HttpOracle`] against wiremock servers
//! to verify request construction, response parsing, and error handling
//! without a live directory or oracle deployment.

use rguard_client::{
    DirectoryError, EligibilityOracle, HttpDirectory, HttpOracle, OracleError, ServiceDirectory,
};
use rguard_core::Address;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn identity() -> Address {
    Address::from_public_key_bytes(b"http-test-identity")
}

// ── Service Directory ────────────────────────────────────────────────────

#[tokio::test]
async fn directory_resolves_registered_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contracts/permission"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": "http://oracle.internal:8080/"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let directory = HttpDirectory::new(Url::parse(&server.uri()).unwrap());
    let resolved = directory.resolve("permission").await.unwrap();
    assert_eq!(resolved.as_str(), "http://oracle.internal:8080/");
}

#[tokio::test]
async fn directory_unknown_service_maps_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contracts/permission"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let directory = HttpDirectory::new(Url::parse(&server.uri()).unwrap());
    let result = directory.resolve("permission").await;
    assert!(matches!(result, Err(DirectoryError::UnknownService(name)) if name == "permission"));
}

#[tokio::test]
async fn directory_rejects_unparseable_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contracts/permission"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": "not a url"
        })))
        .mount(&server)
        .await;

    let directory = HttpDirectory::new(Url::parse(&server.uri()).unwrap());
    let result = directory.resolve("permission").await;
    assert!(matches!(
        result,
        Err(DirectoryError::MalformedAddress { value, .. }) if value == "not a url"
    ));
}

#[tokio::test]
async fn directory_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contracts/permission"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let directory = HttpDirectory::new(Url::parse(&server.uri()).unwrap());
    let result = directory.resolve("permission").await;
    assert!(matches!(result, Err(DirectoryError::Http { .. })));
}

// ── Eligibility Oracle ───────────────────────────────────────────────────

#[tokio::test]
async fn oracle_reports_eligible_identity() {
    let server = MockServer::start().await;
    let identity = identity();

    Mock::given(method("GET"))
        .and(path(format!("/allowed/{identity}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "allowed": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = Url::parse(&server.uri()).unwrap();
    let eligible = HttpOracle::new()
        .is_eligible(&endpoint, &identity)
        .await
        .unwrap();
    assert!(eligible);
}

#[tokio::test]
async fn oracle_reports_ineligible_identity() {
    let server = MockServer::start().await;
    let identity = identity();

    Mock::given(method("GET"))
        .and(path(format!("/allowed/{identity}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "allowed": false
        })))
        .mount(&server)
        .await;

    let endpoint = Url::parse(&server.uri()).unwrap();
    let eligible = HttpOracle::new()
        .is_eligible(&endpoint, &identity)
        .await
        .unwrap();
    assert!(!eligible);
}

#[tokio::test]
async fn oracle_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let endpoint = Url::parse(&server.uri()).unwrap();
    let result = HttpOracle::new().is_eligible(&endpoint, &identity()).await;
    assert!(matches!(result, Err(OracleError::Http { .. })));
}
