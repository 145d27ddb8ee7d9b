//! SuiteQL over REST.

use busbar_ns_auth::NetSuiteCredentials;
use busbar_ns_client::{ClientConfig, NormalizedResult, SqlQuery};
use serde_json::{json, Value};
use tracing::instrument;

use crate::client::{NetSuiteClient, RequestOptions};
use crate::error::Result;
use crate::urls::suiteql_url;

/// Runs SuiteQL statements through the account's REST query endpoint.
///
/// Each statement is POSTed as `{"q": sql}` with `prefer: transient`. The
/// returned result carries the SQL text as `request_data`.
#[derive(Debug, Clone)]
pub struct SuiteQlClient {
    client: NetSuiteClient,
    endpoint: String,
}

impl SuiteQlClient {
    /// Create a query client for the credentials' account.
    pub fn new(credentials: NetSuiteCredentials) -> Result<Self> {
        Ok(Self::from_client(NetSuiteClient::new(credentials)?))
    }

    /// Create a query client with custom HTTP configuration.
    pub fn with_config(credentials: NetSuiteCredentials, config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(NetSuiteClient::with_config(
            credentials,
            config,
        )?))
    }

    /// Wrap an existing signed client.
    pub fn from_client(client: NetSuiteClient) -> Self {
        let endpoint = suiteql_url(client.account_id());
        Self { client, endpoint }
    }

    /// Override the query endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The query endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The underlying signed client.
    pub fn client(&self) -> &NetSuiteClient {
        &self.client
    }

    /// Execute a SuiteQL statement. The SQL is sent as-is, even when empty.
    #[instrument(skip(self))]
    pub async fn query(&self, sql: &str) -> NormalizedResult {
        let options = RequestOptions::new()
            .header("prefer", "transient")
            .header("Content-Type", "application/json")
            .body(json!({ "q": sql }));

        let mut result = self.client.post(&self.endpoint, options).await;
        result.request_data = Value::String(sql.to_string());
        result
    }
}

impl SqlQuery for SuiteQlClient {
    async fn query(&self, sql: &str) -> NormalizedResult {
        SuiteQlClient::query(self, sql).await
    }
}
