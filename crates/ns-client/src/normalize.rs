//! Uniform result record for requests and queries.
//!
//! Every request and query entry point returns a [`NormalizedResult`], on
//! success and on failure alike. Failures never propagate to the caller as
//! errors; they become a record with [`FAILURE_CODE`] and a diagnostic in
//! `response`.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Status code recorded when a call fails before a reply is received.
pub const FAILURE_CODE: u16 = 500;

/// Maximum length of a rendered diagnostic.
const MAX_DIAGNOSTIC_LENGTH: usize = 2000;

static OAUTH_SIGNATURE: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r#"oauth_signature="[^"]*""#).expect("valid regex")
});

static PASSWORD_PAIR: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"(?i)\b(PWD|password)=(\{(?:[^}]|\}\})*\}|[^;]*)")
        .expect("valid regex")
});

/// The call inputs a result is traced back to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Request URL, or the connection target for driver queries.
    pub url: String,
    /// Headers supplied by the caller.
    pub request_headers: HashMap<String, String>,
    /// Payload supplied by the caller (body, or SQL text for queries).
    pub request_data: Value,
}

impl RequestContext {
    /// Create a context for the given URL with no headers or data.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_headers: HashMap::new(),
            request_data: Value::Null,
        }
    }

    /// Set the caller-supplied headers.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.request_headers = headers;
        self
    }

    /// Set the caller-supplied payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.request_data = data;
        self
    }
}

/// Uniform outcome of a request or query.
///
/// `code` is always populated: the remote status for HTTP replies, 200 for
/// successful driver queries and [`FAILURE_CODE`] for failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub url: String,
    pub request_headers: HashMap<String, String>,
    pub request_data: Value,
    /// Response body text, record-oriented JSON for queries, or a diagnostic.
    pub response: String,
    pub code: u16,
    /// Column names, query results only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl NormalizedResult {
    /// Build a result from a transport reply.
    pub fn success(context: RequestContext, code: u16, response: impl Into<String>) -> Self {
        Self {
            url: context.url,
            request_headers: context.request_headers,
            request_data: context.request_data,
            response: response.into(),
            code,
            columns: None,
        }
    }

    /// Build a result from a failure.
    pub fn failure(
        context: RequestContext,
        error: &(dyn std::error::Error + 'static),
    ) -> Self {
        Self {
            url: context.url,
            request_headers: context.request_headers,
            request_data: context.request_data,
            response: render_diagnostic(error),
            code: FAILURE_CODE,
            columns: None,
        }
    }

    /// Build a result from either outcome.
    pub fn from_outcome<E>(
        context: RequestContext,
        outcome: std::result::Result<(u16, String), E>,
    ) -> Self
    where
        E: std::error::Error + 'static,
    {
        match outcome {
            Ok((code, response)) => Self::success(context, code, response),
            Err(err) => Self::failure(context, &err),
        }
    }

    /// Attach column names.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Returns true if `code` is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Parse `response` as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.response).map_err(Into::into)
    }
}

/// Render an error and its source chain as a single diagnostic line.
///
/// Sources whose message is already contained in the text are skipped.
/// OAuth signatures and connection-string passwords are redacted, and the
/// output is truncated.
pub fn render_diagnostic(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !message.is_empty() && !rendered.contains(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        source = cause.source();
    }

    sanitize(&rendered)
}

fn sanitize(message: &str) -> String {
    let redacted = OAUTH_SIGNATURE.replace_all(message, r#"oauth_signature="[REDACTED]""#);
    let mut sanitized = PASSWORD_PAIR
        .replace_all(&redacted, "${1}=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_DIAGNOSTIC_LENGTH {
        let mut cut = MAX_DIAGNOSTIC_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
