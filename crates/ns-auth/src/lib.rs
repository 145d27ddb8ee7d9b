//! # ns-auth
//!
//! NetSuite token-based authentication (TBA).
//!
//! ## Security
//!
//! - Secrets are redacted in Debug output
//! - Tracing skips credential parameters
//! - Signatures are derived per call and never cached
//!
//! ## Supported Authentication Methods
//!
//! - **OAuth 1.0 request signing** (HMAC-SHA256) for REST and RESTlet calls,
//!   see [`OAuth1Session`]
//! - **Token passwords** for SuiteAnalytics Connect (ODBC) logins, see
//!   [`derive_password`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_ns_auth::{derive_password, NetSuiteCredentials};
//!
//! let creds = NetSuiteCredentials::from_env()?;
//! let password = derive_password(&creds)?;
//! ```

mod credentials;
mod error;
mod oauth1;
mod password;

pub use credentials::{account_host, NetSuiteCredentials, NetSuiteCredentialsBuilder};
pub use error::{Error, ErrorKind, Result};
pub use oauth1::{percent_encode, OAuth1Session};
pub use password::{
    derive_password, derive_password_with, generate_nonce, generate_timestamp,
    DEFAULT_NONCE_LENGTH,
};

/// OAuth signature method used by NetSuite token-based authentication.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";

/// OAuth protocol version.
pub const OAUTH_VERSION: &str = "1.0";
