//! # ns-odbc
//!
//! SuiteQL through SuiteAnalytics Connect (ODBC).
//!
//! ## Features
//!
//! - **Token or password login** - see [`OdbcAuth`]; token passwords are
//!   derived fresh for every connection
//! - **DSN and DSN-less targets** - see [`OdbcTarget`]
//! - **Pluggable driver** - [`OdbcDriver`]; the `odbc` feature adds
//!   [`OdbcApiDriver`] on top of the system driver manager
//!
//! Queries return a [`NormalizedResult`] with the rows encoded as
//! `[{"column": value, ...}, ...]` and the column names in `columns`.

mod client;
mod config;
mod driver;
mod error;
#[cfg(feature = "odbc")]
mod odbc_api_driver;

pub use client::OdbcQueryClient;
pub use config::{
    service_host, OdbcAuth, OdbcConfig, OdbcConfigBuilder, OdbcTarget, DEFAULT_DATA_SOURCE,
    DEFAULT_PORT, SERVICE_HOST_SUFFIX,
};
pub use driver::{OdbcConnection, OdbcDriver, RowSet};
pub use error::{Error, ErrorKind, Result};
#[cfg(feature = "odbc")]
pub use odbc_api_driver::{OdbcApiDriver, DEFAULT_BATCH_SIZE, DEFAULT_MAX_STR_LEN};

pub use busbar_ns_client::{NormalizedResult, SqlQuery};
