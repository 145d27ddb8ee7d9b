use busbar_ns_api::auth::OAuth1Session;
use busbar_ns_api::rest::restlet_url;
use busbar_ns_api::RequestOptions;
use serde_json::json;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::common::{credentials, rest_client, ACCOUNT_ID};

fn header_param<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    let prefix = format!("{name}=\"");
    header
        .trim_start_matches("OAuth ")
        .split(", ")
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .and_then(|rest| rest.strip_suffix('"'))
}

/// Recompute the signature the way the server would and compare.
fn verify_signature(req: &Request) -> ResponseTemplate {
    let Some(header) = req
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
    else {
        return ResponseTemplate::new(401).set_body_string("missing authorization");
    };
    let (Some(nonce), Some(timestamp)) = (
        header_param(header, "oauth_nonce"),
        header_param(header, "oauth_timestamp"),
    ) else {
        return ResponseTemplate::new(401).set_body_string("malformed authorization");
    };

    let is_form = req
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

    let creds = credentials();
    let session = OAuth1Session::new(&creds);
    let expected = if is_form {
        let body = String::from_utf8_lossy(&req.body);
        session.form_authorization_header_with(
            req.method.as_str(),
            &req.url,
            &body,
            nonce,
            timestamp,
        )
    } else {
        session.authorization_header_with(req.method.as_str(), &req.url, nonce, timestamp)
    }
    .expect("signing succeeds");

    if expected == header {
        ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#)
    } else {
        ResponseTemplate::new(401).set_body_string("signature mismatch")
    }
}

#[tokio::test]
async fn test_signature_verifies_with_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/site/hosting/restlet.nl"))
        .and(query_param("script", "customscript_export"))
        .and(query_param("deploy", "1"))
        .and(query_param("from", "2024-01-01 00:00"))
        .respond_with(verify_signature)
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!(
        "{}/app/site/hosting/restlet.nl?script=customscript_export&deploy=1",
        mock_server.uri()
    );
    let result = rest_client()
        .get(&url, RequestOptions::new().param("from", "2024-01-01 00:00"))
        .await;

    assert_eq!(result.code, 200, "{}", result.response);
    assert_eq!(result.url, url);
    assert_eq!(result.request_data, json!({}));
}

#[tokio::test]
async fn test_signature_verifies_for_post_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/rest/record/v1/customer"))
        .and(body_string(r#"{"companyName":"ACME & Sons"}"#))
        .respond_with(verify_signature)
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/services/rest/record/v1/customer", mock_server.uri());
    let result = rest_client()
        .post(
            &url,
            RequestOptions::new()
                .header("Content-Type", "application/json")
                .body(json!({"companyName": "ACME & Sons"})),
        )
        .await;

    assert_eq!(result.code, 200, "{}", result.response);
    assert_eq!(result.request_data, json!({"companyName": "ACME & Sons"}));
}

#[tokio::test]
async fn test_signature_verifies_for_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/site/hosting/restlet.nl"))
        .and(body_string("name=ACME+%26+Sons&id=7"))
        .respond_with(verify_signature)
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!(
        "{}/app/site/hosting/restlet.nl?script=12&deploy=1",
        mock_server.uri()
    );
    let result = rest_client()
        .post(
            &url,
            RequestOptions::new()
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body("name=ACME+%26+Sons&id=7"),
        )
        .await;

    assert_eq!(result.code, 200, "{}", result.response);
    assert_eq!(result.request_data, json!("name=ACME+%26+Sons&id=7"));
}

#[tokio::test]
async fn test_rejected_request_is_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"error":{"code":"INSUFFICIENT_PERMISSION"}}"#),
        )
        .mount(&mock_server)
        .await;

    let result = rest_client()
        .get(&format!("{}/restlet", mock_server.uri()), RequestOptions::new())
        .await;

    assert_eq!(result.code, 403);
    assert!(!result.is_success());
    let body: serde_json::Value = result.json().unwrap();
    assert_eq!(body["error"]["code"], "INSUFFICIENT_PERMISSION");
}

#[tokio::test]
async fn test_unreachable_host_returns_failure_record() {
    let result = rest_client()
        .delete(
            "http://127.0.0.1:9/services/rest/record/v1/customer/1",
            RequestOptions::new().header("Accept", "application/json"),
        )
        .await;

    assert_eq!(result.code, 500);
    assert!(!result.response.is_empty());
    assert!(!result.response.contains("consumer_secret_abc"));
    assert_eq!(
        result.request_headers.get("Accept").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn test_restlet_url_for_sandbox() {
    assert_eq!(
        restlet_url(ACCOUNT_ID, "12", "1"),
        "https://1234567-sb1.restlets.api.netsuite.com/app/site/hosting/restlet.nl?script=12&deploy=1"
    );
}
