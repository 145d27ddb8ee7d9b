//! # ns-client
//!
//! Core HTTP transport and result normalization for NetSuite APIs.
//!
//! This crate provides the foundational pieces shared by the REST and ODBC
//! clients:
//! - A thin HTTP client over `reqwest` (one round trip per call, no retries)
//! - Request building with headers, query parameters and text bodies
//! - [`NormalizedResult`], the single result shape returned by every request
//!   and query entry point, including the failure path
//! - The [`SqlQuery`] capability implemented by both query adapters
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │            (ns-rest: NetSuiteClient, SuiteQlClient)         │
//! │            (ns-odbc: OdbcQueryClient)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    NsHttpClient                             │
//! │  - Raw HTTP, request building, response handling            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    NormalizedResult                         │
//! │  - url, request headers/data, response text, status code    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod config;
mod error;
mod normalize;
mod query;
mod request;
mod response;

pub use client::NsHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use normalize::{render_diagnostic, NormalizedResult, RequestContext, FAILURE_CODE};
pub use query::SqlQuery;
pub use request::{encode_body, RequestBuilder, RequestMethod};
pub use response::Response;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("busbar-ns-api/", env!("CARGO_PKG_VERSION"));
