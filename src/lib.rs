//! # busbar-ns-api
//!
//! NetSuite connectivity for Rust: OAuth 1.0 signed REST calls and SuiteQL
//! queries over REST or SuiteAnalytics Connect (ODBC).
//!
//! ## Security
//!
//! - Secrets are redacted in Debug output
//! - Tracing skips credential parameters
//! - Diagnostics returned in results have signatures and passwords masked
//!
//! ## Crates
//!
//! - **busbar-ns-client** - HTTP transport, normalized results, the `SqlQuery` capability
//! - **busbar-ns-auth** - Credentials, OAuth 1.0 signing, ODBC token passwords
//! - **busbar-ns-rest** - Signed request client and SuiteQL over REST
//! - **busbar-ns-odbc** - SuiteQL through an ODBC driver
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_ns_api::{NetSuiteCredentials, SuiteQlClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = NetSuiteCredentials::from_env()?;
//!     let client = SuiteQlClient::new(creds)?;
//!
//!     let result = client.query("SELECT id, companyname FROM customer").await;
//!     if result.is_success() {
//!         println!("{}", result.response);
//!     } else {
//!         eprintln!("{}: {}", result.code, result.response);
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "auth")]
pub use busbar_ns_auth as auth;
#[cfg(feature = "client")]
pub use busbar_ns_client as client;
#[cfg(feature = "odbc")]
pub use busbar_ns_odbc as odbc;
#[cfg(feature = "rest")]
pub use busbar_ns_rest as rest;

#[cfg(feature = "auth")]
pub use busbar_ns_auth::{derive_password, NetSuiteCredentials};
#[cfg(feature = "client")]
pub use busbar_ns_client::{ClientConfig, NormalizedResult, SqlQuery};
#[cfg(feature = "odbc")]
pub use busbar_ns_odbc::{OdbcAuth, OdbcConfig, OdbcQueryClient, OdbcTarget};
#[cfg(feature = "rest")]
pub use busbar_ns_rest::{NetSuiteClient, RequestOptions, SuiteQlClient};
