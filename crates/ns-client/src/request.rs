//! HTTP request building.

use std::collections::HashMap;

use serde_json::Value;
use url::Url;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Upper-case method name, as used in OAuth signature base strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Put => "PUT",
            RequestMethod::Post => "POST",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a request payload as body text.
///
/// Objects and arrays are serialized to JSON text. Strings pass through
/// verbatim, other scalars become their literal text, and `null` means
/// "no body".
pub fn encode_body(body: &Value) -> Result<Option<String>> {
    match body {
        Value::Null => Ok(None),
        Value::Object(_) | Value::Array(_) => Ok(Some(serde_json::to_string(body)?)),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Bool(_) | Value::Number(_) => Ok(Some(body.to_string())),
    }
}

/// Builder for HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<String>,
    pub(crate) authorization: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
            authorization: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Set the `Authorization` header value.
    pub fn authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add several headers.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Set text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body from a JSON value, see [`encode_body`].
    pub fn json_value(mut self, body: &Value) -> Result<Self> {
        self.body = encode_body(body)?;
        Ok(self)
    }

    /// The final URL: the request URL with all query parameters appended.
    ///
    /// This is the URL that gets sent and the one a request signer must sign.
    pub fn resolved_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query_params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}
