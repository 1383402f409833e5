//! Contract Test: REST Transport
//!
//! Constraints verified:
//! - Requests carry the version 2 Accept header and the auth header
//! - Create expects 201; read, update, delete and list expect 200
//! - Success bodies are unwrapped from `{"data": ...}`
//! - Error bodies become `Error::Status` with the remote message
//! - 429 and 5xx are retried with backoff; other statuses are not
//! - A create is only replayed on 429
//! - Under OAuth a 401 refreshes the access token exactly once, and a
//!   transient token failure is retried like any other request

mod common;

use common::*;
use serde_json::json;
use site24x7_client::Site24x7HttpClient;
use site24x7_core::api::{LocationProfile, Monitor, MonitorGroup};
use site24x7_core::{Error, Site24x7Client};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn create_posts_entity_and_unwraps_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/monitor_groups"))
        .and(header("authorization", "Zoho-authtoken test-token"))
        .and(header("accept", "application/json; version=2.0"))
        .and(body_json(json!({"display_name": "web", "description": "frontends"})))
        .respond_with(data(201, group("123")))
        .expect(1)
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 0)));

    let created = assert_ok!(
        client
            .monitor_groups()
            .create(&MonitorGroup {
                group_id: String::new(),
                display_name: "web".to_string(),
                description: "frontends".to_string(),
            })
            .await
    );

    assert_eq!(created.group_id, "123");
}

#[tokio::test]
async fn member_operations_use_the_id_path() {
    let server = MockServer::start().await;
    for verb in ["GET", "PUT"] {
        Mock::given(method(verb))
            .and(path("/api/monitor_groups/123"))
            .respond_with(data(200, group("123")))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/api/monitor_groups/123"))
        .respond_with(data(200, json!({})))
        .expect(1)
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 0)));
    let groups = client.monitor_groups();

    let fetched = assert_ok!(groups.get("123").await);
    assert_ok!(groups.update(&fetched).await);
    assert_ok!(groups.delete("123").await);
}

#[tokio::test]
async fn list_keeps_remote_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/location_profiles"))
        .respond_with(data(
            200,
            json!([
                {"profile_id": "456", "profile_name": "Europe"},
                {"profile_id": "123", "profile_name": "America"},
            ]),
        ))
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 0)));

    let profiles: Vec<LocationProfile> = assert_ok!(client.location_profiles().list().await);

    let ids: Vec<_> = profiles.iter().map(|p| p.profile_id.as_str()).collect();
    assert_eq!(ids, vec!["456", "123"]);
}

#[tokio::test]
async fn not_found_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/monitors/999"))
        .respond_with(api_error(404, 1001, "Monitor not found"))
        .expect(1) // 404 is never retried
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 3)));

    let err = assert_err!(client.monitors().get("999").await);

    assert!(err.is_not_found());
    assert!(err.to_string().starts_with("Monitor not found. More info: GET"));
}

#[tokio::test]
async fn unexpected_success_status_is_an_error() {
    let server = MockServer::start().await;
    // create answers 200 instead of 201
    Mock::given(method("POST"))
        .and(path("/api/monitors"))
        .respond_with(api_error(200, 0, "success"))
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 0)));

    let err = assert_err!(client.monitors().create(&Monitor::default()).await);
    assert_eq!(err.http_status(), Some(200));
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/monitor_groups/123"))
        .respond_with(api_error(503, 503, "Service Unavailable"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/monitor_groups/123"))
        .respond_with(api_error(429, 429, "Too Many Requests").insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/monitor_groups/123"))
        .respond_with(data(200, group("123")))
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 4)));

    let fetched = assert_ok!(client.monitor_groups().get("123").await);

    assert_eq!(fetched.group_id, "123");
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn retries_are_bounded() {
    let server = MockServer::start().await;
    for (code, message) in [(1, "first"), (2, "second"), (3, "third")] {
        Mock::given(method("GET"))
            .and(path("/api/monitor_groups/123"))
            .respond_with(api_error(500, code, message))
            .up_to_n_times(1)
            .mount(&server)
            .await;
    }
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 1)));

    let err = assert_err!(client.monitor_groups().get("123").await);

    assert!(err.to_string().starts_with("second"));
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/monitors/7"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_code": 1003,
            "message": "Invalid input",
            "error_info": {"display_name": "too long"},
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 4)));

    let monitor = Monitor {
        monitor_id: "7".to_string(),
        ..Default::default()
    };
    let err = assert_err!(client.monitors().update(&monitor).await);

    match err {
        Error::Status {
            status,
            code,
            ref message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(1003));
            assert!(message.starts_with(r#"Invalid input ({"display_name":"too long"})"#));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn create_is_not_replayed_after_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/monitors"))
        .respond_with(api_error(500, 1000, "Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 4)));

    let err = assert_err!(client.monitors().create(&Monitor::default()).await);

    assert_eq!(err.http_status(), Some(500));
}

#[tokio::test]
async fn create_is_replayed_after_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/monitors"))
        .respond_with(api_error(429, 429, "Too Many Requests"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/monitors"))
        .respond_with(data(201, json!({"monitor_id": "55", "display_name": "foo"})))
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 4)));

    let created = assert_ok!(client.monitors().create(&Monitor::default()).await);

    assert_eq!(created.monitor_id, "55");
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn undecodable_error_body_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/monitors/1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("<html>forbidden</html>"))
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&token_config(&server, 0)));

    let err = assert_err!(client.monitors().delete("1").await);

    assert_eq!(err.http_status(), Some(403));
    assert!(err.to_string().starts_with("json decoding of error failed"));
}

#[tokio::test]
async fn oauth_token_is_fetched_cached_and_refreshed_on_401() {
    let server = MockServer::start().await;
    for value in ["first", "second"] {
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .and(query_param("grant_type", "refresh_token"))
            .and(query_param("refresh_token", "refresh-token"))
            .and(query_param("client_id", "client-id"))
            .respond_with(access_token(value))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
    }
    for id in ["1", "2"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/monitor_groups/{}", id)))
            .and(header("authorization", "Zoho-oauthtoken first"))
            .respond_with(data(200, group(id)))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/monitor_groups/3"))
        .and(header("authorization", "Zoho-oauthtoken first"))
        .respond_with(api_error(401, 401, "Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/monitor_groups/3"))
        .and(header("authorization", "Zoho-oauthtoken second"))
        .respond_with(data(200, group("3")))
        .expect(1)
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&oauth_config(&server, 0)));
    let groups = client.monitor_groups();

    assert_ok!(groups.get("1").await);
    assert_ok!(groups.get("2").await);
    let third = assert_ok!(groups.get("3").await);

    assert_eq!(third.group_id, "3");
    assert_eq!(request_count(&server).await, 6);
}

#[tokio::test]
async fn transient_token_failure_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(access_token("fresh"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/monitor_groups/1"))
        .and(header("authorization", "Zoho-oauthtoken fresh"))
        .respond_with(data(200, group("1")))
        .expect(1)
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&oauth_config(&server, 2)));

    let fetched = assert_ok!(client.monitor_groups().get("1").await);

    assert_eq!(fetched.group_id, "1");
}

#[tokio::test]
async fn rejected_refresh_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_code"})))
        .expect(1) // rejections are not retried
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/monitors/1"))
        .respond_with(data(200, json!({})))
        .expect(0)
        .mount(&server)
        .await;
    let client = assert_ok!(Site24x7HttpClient::new(&oauth_config(&server, 3)));

    let err = assert_err!(client.monitors().get("1").await);

    assert!(matches!(err, Error::Authentication(_)));
    assert!(err.to_string().contains("invalid_code"));
}
