//! HTTP-contract tests for the GeoNames suggestion client, against a mock
//! server.

use serde_json::json;
use skycast_core::provider::SuggestionProvider;
use skycast_core::provider::geonames::GeoNamesClient;
use skycast_core::{CitySuggestion, ProviderError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeoNamesClient {
    GeoNamesClient::new("demo".to_string()).expect("client builds").with_base_url(server.uri())
}

#[tokio::test]
async fn short_partial_short_circuits_without_request() {
    let server = MockServer::start().await;

    // Any request reaching the server at all fails the test.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let suggestions = client_for(&server).suggest("Pa").await.expect("short-circuit is not an error");

    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn suggestions_preserve_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/searchJSON"))
        .and(query_param("q", "Par"))
        .and(query_param("maxRows", "10"))
        .and(query_param("username", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResultsCount": 3,
            "geonames": [
                { "name": "Paris", "countryName": "France" },
                { "name": "Parys", "countryName": "South Africa" },
                { "name": "Parma", "countryName": "Italy" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let suggestions = client_for(&server).suggest("Par").await.expect("suggest succeeds");

    assert_eq!(
        suggestions,
        vec![
            CitySuggestion { name: "Paris".into(), country_name: "France".into() },
            CitySuggestion { name: "Parys".into(), country_name: "South Africa".into() },
            CitySuggestion { name: "Parma".into(), country_name: "Italy".into() },
        ]
    );
}

#[tokio::test]
async fn single_result_comes_back_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/searchJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "geonames": [ { "name": "Paris", "countryName": "France" } ]
        })))
        .mount(&server)
        .await;

    let suggestions = client_for(&server).suggest("Paris").await.expect("suggest succeeds");

    assert_eq!(
        suggestions,
        vec![CitySuggestion { name: "Paris".into(), country_name: "France".into() }]
    );
}

#[tokio::test]
async fn zero_results_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/searchJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "totalResultsCount": 0, "geonames": [] })),
        )
        .mount(&server)
        .await;

    let suggestions = client_for(&server).suggest("Zzzzz").await.expect("suggest succeeds");

    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn missing_geonames_array_is_malformed_response() {
    let server = MockServer::start().await;

    // GeoNames reports errors as a 200 with a status object instead of the
    // geonames array.
    Mock::given(method("GET"))
        .and(path("/searchJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": { "message": "user does not exist.", "value": 10 }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).suggest("Paris").await.unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn non_success_status_is_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/searchJSON"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).suggest("Paris").await.unwrap_err();

    match err {
        ProviderError::MalformedResponse(detail) => assert!(detail.contains("503")),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}
