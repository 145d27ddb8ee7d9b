//! Driver-backed query client.

use std::sync::Arc;

use busbar_ns_client::{NormalizedResult, RequestContext, SqlQuery};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::{OdbcAuth, OdbcConfig};
use crate::driver::{OdbcDriver, RowSet};
use crate::error::{Error, ErrorKind, Result};

/// Runs SuiteQL through a SuiteAnalytics Connect driver.
///
/// Each query opens its own connection, executes the statement, fetches the
/// whole result set and closes the connection again, on success and on
/// failure. Rows are returned as record-oriented JSON with the column names
/// in `columns`.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_ns_odbc::{OdbcApiDriver, OdbcConfig, OdbcQueryClient};
///
/// let config = OdbcConfig::builder()
///     .user_email("analyst@example.com")
///     .role_id("3")
///     .dsn("NetSuite")
///     .token(credentials)
///     .build()?;
/// let client = OdbcQueryClient::new(config, OdbcApiDriver::new()?);
///
/// let result = client.query("SELECT id FROM customer").await;
/// println!("{:?} {}", result.columns, result.response);
/// ```
#[derive(Clone)]
pub struct OdbcQueryClient {
    config: Arc<OdbcConfig>,
    driver: Arc<dyn OdbcDriver>,
}

impl std::fmt::Debug for OdbcQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdbcQueryClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OdbcQueryClient {
    pub fn new(config: OdbcConfig, driver: impl OdbcDriver + 'static) -> Self {
        Self::with_driver(config, Arc::new(driver))
    }

    /// Create a client sharing an existing driver.
    pub fn with_driver(config: OdbcConfig, driver: Arc<dyn OdbcDriver>) -> Self {
        Self {
            config: Arc::new(config),
            driver,
        }
    }

    /// Create a client using the system ODBC driver manager.
    #[cfg(feature = "odbc")]
    pub fn with_system_driver(config: OdbcConfig) -> Result<Self> {
        Ok(Self::new(config, crate::OdbcApiDriver::new()?))
    }

    pub fn config(&self) -> &OdbcConfig {
        &self.config
    }

    /// Execute a statement on a blocking task.
    pub async fn query(&self, sql: &str) -> NormalizedResult {
        let client = self.clone();
        let statement = sql.to_string();
        match tokio::task::spawn_blocking(move || client.query_blocking(&statement)).await {
            Ok(result) => result,
            Err(err) => {
                let err = Error::with_source(ErrorKind::Task(err.to_string()), err);
                if self.config.enable_tracing() {
                    warn!(error = %err, "Query task failed");
                }
                NormalizedResult::failure(self.context(sql), &err)
            }
        }
    }

    /// Execute a statement on the current thread.
    #[instrument(skip(self))]
    pub fn query_blocking(&self, sql: &str) -> NormalizedResult {
        let context = self.context(sql);
        match self.run(sql) {
            Ok(None) => NormalizedResult::success(context, 200, ""),
            Ok(Some(rows)) => match rows.to_json() {
                Ok(json) => NormalizedResult::success(context, 200, json).with_columns(rows.columns),
                Err(err) => NormalizedResult::failure(context, &err),
            },
            Err(err) => {
                if self.config.enable_tracing() {
                    warn!(error = %err, "Query failed");
                }
                NormalizedResult::failure(context, &err)
            }
        }
    }

    fn run(&self, sql: &str) -> Result<Option<RowSet>> {
        if self.config.enable_tracing() && matches!(self.config.auth(), OdbcAuth::Token(_)) {
            debug!(account_id = self.config.account_id(), "Deriving token password");
        }
        let connection_string = self.config.connection_string()?;
        let mut connection = self.driver.connect(&connection_string)?;

        let outcome = connection.execute(sql);
        if let Err(err) = connection.close() {
            if self.config.enable_tracing() {
                warn!(error = %err, "Failed to close connection");
            }
        }

        let rows = outcome?;
        if self.config.enable_tracing() {
            debug!(
                columns = rows.as_ref().map(|r| r.columns.len()),
                rows = rows.as_ref().map(|r| r.rows.len()),
                "Query finished"
            );
        }
        Ok(rows)
    }

    fn context(&self, sql: &str) -> RequestContext {
        RequestContext::new(self.config.target().describe()).with_data(Value::String(sql.to_string()))
    }
}

impl SqlQuery for OdbcQueryClient {
    async fn query(&self, sql: &str) -> NormalizedResult {
        OdbcQueryClient::query(self, sql).await
    }
}
