//! # ns-rest
//!
//! Signed NetSuite REST access.
//!
//! ## Features
//!
//! - **Signed requests** - GET/PUT/POST/DELETE with a fresh OAuth 1.0 signature per call
//! - **SuiteQL** - Run queries through the REST query service
//! - **Endpoint helpers** - Account-specific SuiteQL, record and RESTlet URLs
//!
//! Every operation returns a [`NormalizedResult`]; failures never surface as
//! `Err` once a client exists.
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_ns_auth::NetSuiteCredentials;
//! use busbar_ns_rest::SuiteQlClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_ns_rest::Error> {
//!     let creds = NetSuiteCredentials::from_env()?;
//!     let client = SuiteQlClient::new(creds)?;
//!
//!     let result = client.query("SELECT id, companyname FROM customer").await;
//!     println!("{} {}", result.code, result.response);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod suiteql;
mod urls;

pub use client::{NetSuiteClient, RequestOptions};
pub use error::{Error, ErrorKind, Result};
pub use suiteql::SuiteQlClient;
pub use urls::{record_url, restlet_url, suiteql_url};

pub use busbar_ns_client::{NormalizedResult, RequestMethod, SqlQuery};
