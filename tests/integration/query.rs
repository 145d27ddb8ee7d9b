use busbar_ns_api::odbc::{Error, ErrorKind, OdbcConnection, OdbcDriver, RowSet};
use busbar_ns_api::{NormalizedResult, OdbcConfig, OdbcQueryClient, SqlQuery, SuiteQlClient};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{credentials, live_credentials, suiteql_client};

const SQL: &str = "SELECT id, companyname FROM customer WHERE id < 3";

/// Both adapters are used through the same capability.
async fn run<Q: SqlQuery>(adapter: &Q, sql: &str) -> NormalizedResult {
    adapter.query(sql).await
}

struct StaticDriver;

struct StaticConnection;

impl OdbcDriver for StaticDriver {
    fn connect<'a>(
        &'a self,
        connection_string: &str,
    ) -> busbar_ns_api::odbc::Result<Box<dyn OdbcConnection + 'a>> {
        if !connection_string.contains(";PWD=1234567_SB1&consumer_key_abc&token_id_abc&") {
            return Err(Error::new(ErrorKind::Connection(
                "unexpected login".to_string(),
            )));
        }
        Ok(Box::new(StaticConnection))
    }
}

impl OdbcConnection for StaticConnection {
    fn execute(&mut self, sql: &str) -> busbar_ns_api::odbc::Result<Option<RowSet>> {
        if sql.is_empty() {
            return Ok(None);
        }
        let mut rows = RowSet::new(vec!["id".to_string(), "companyname".to_string()]);
        rows.push_row(vec![json!("1"), json!("ACME")]);
        rows.push_row(vec![json!("2"), json!("Globex")]);
        Ok(Some(rows))
    }

    fn close(self: Box<Self>) -> busbar_ns_api::odbc::Result<()> {
        Ok(())
    }
}

fn odbc_client() -> OdbcQueryClient {
    let config = OdbcConfig::builder()
        .user_email("analyst@example.com")
        .role_id("3")
        .dsn("NetSuite")
        .token(credentials())
        .with_tracing(false)
        .build()
        .expect("config is complete");
    OdbcQueryClient::new(config, StaticDriver)
}

#[tokio::test]
async fn test_rest_query_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/rest/query/v1/suiteql"))
        .and(header("prefer", "transient"))
        .and(body_json(json!({ "q": SQL })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "1", "companyname": "ACME"},
                {"id": "2", "companyname": "Globex"}
            ],
            "hasMore": false,
            "count": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = suiteql_client(&format!(
        "{}/services/rest/query/v1/suiteql",
        mock_server.uri()
    ));
    let result = run(&client, SQL).await;

    assert_eq!(result.code, 200);
    assert_eq!(result.request_data, Value::String(SQL.to_string()));
    let body: Value = result.json().unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["items"][1]["companyname"], "Globex");
}

#[tokio::test]
async fn test_odbc_query_round_trip() {
    let result = run(&odbc_client(), SQL).await;

    assert_eq!(result.code, 200, "{}", result.response);
    assert_eq!(result.url, "DSN=NetSuite");
    assert_eq!(result.request_data, json!(SQL));
    assert_eq!(
        result.columns,
        Some(vec!["id".to_string(), "companyname".to_string()])
    );
    let records: Value = result.json().unwrap();
    assert_eq!(records[0], json!({"id": "1", "companyname": "ACME"}));
}

#[tokio::test]
async fn test_odbc_empty_statement() {
    let result = run(&odbc_client(), "").await;

    assert_eq!(result.code, 200);
    assert_eq!(result.response, "");
    assert_eq!(result.request_data, json!(""));
    assert!(result.columns.is_none());
}

#[tokio::test]
async fn test_results_serialize_alike() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&mock_server)
        .await;

    let rest = run(&suiteql_client(&mock_server.uri()), SQL).await;
    let odbc = run(&odbc_client(), SQL).await;

    let rest_json = serde_json::to_value(&rest).unwrap();
    let odbc_json = serde_json::to_value(&odbc).unwrap();
    for key in ["url", "request_headers", "request_data", "response", "code"] {
        assert!(rest_json.get(key).is_some(), "rest result lacks {key}");
        assert!(odbc_json.get(key).is_some(), "odbc result lacks {key}");
    }
    assert!(rest_json.get("columns").is_none());
    assert!(odbc_json.get("columns").is_some());
}

#[tokio::test]
#[ignore]
async fn test_live_suiteql_query() {
    let client = SuiteQlClient::new(live_credentials()).expect("client builds");
    let result = client.query("SELECT id FROM customer WHERE ROWNUM <= 1").await;

    assert_eq!(result.code, 200, "{}", result.response);
    let body: Value = result.json().unwrap();
    assert!(body.get("items").is_some());
}
