//! Signed NetSuite request client.

use std::collections::HashMap;

use busbar_ns_auth::{NetSuiteCredentials, OAuth1Session};
use busbar_ns_client::{
    ClientConfig, NormalizedResult, NsHttpClient, RequestBuilder, RequestContext, RequestMethod,
};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::error::Result;

/// Optional inputs of a signed request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// Headers passed through verbatim.
    pub headers: HashMap<String, String>,
    /// Query parameters appended to the URL (and included in the signature).
    pub params: Vec<(String, String)>,
    /// Body, `{}` unless set. Objects and arrays are sent as JSON text,
    /// strings verbatim, `null` sends no body.
    pub body: Value,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            params: Vec::new(),
            body: Value::Object(Map::new()),
        }
    }
}

impl RequestOptions {
    /// No headers, no params, body `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = body.into();
        self
    }
}

/// NetSuite client issuing OAuth 1.0 signed requests.
///
/// A new signing session (nonce, timestamp, signature) is created for every
/// request; nothing but the credentials is shared between calls.
///
/// Every method returns a [`NormalizedResult`]. Non-2xx replies come back
/// with their status and body; transport failures come back as code 500
/// with a diagnostic.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_ns_rest::{NetSuiteClient, RequestOptions};
///
/// let client = NetSuiteClient::new(creds)?;
/// let result = client
///     .get(
///         "https://1234567.restlets.api.netsuite.com/app/site/hosting/restlet.nl?script=12&deploy=1",
///         RequestOptions::new().header("Content-Type", "application/json"),
///     )
///     .await;
/// if result.is_success() {
///     println!("{}", result.response);
/// }
/// ```
#[derive(Clone)]
pub struct NetSuiteClient {
    http: NsHttpClient,
    credentials: NetSuiteCredentials,
}

impl std::fmt::Debug for NetSuiteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetSuiteClient")
            .field("account_id", &self.credentials.account_id())
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

impl NetSuiteClient {
    /// Create a new client with default HTTP configuration.
    pub fn new(credentials: NetSuiteCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(credentials: NetSuiteCredentials, config: ClientConfig) -> Result<Self> {
        let http = NsHttpClient::new(config)?;
        Ok(Self { http, credentials })
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &NetSuiteCredentials {
        &self.credentials
    }

    /// Get the account id.
    pub fn account_id(&self) -> &str {
        self.credentials.account_id()
    }

    /// Issue a signed request.
    #[instrument(skip(self, options))]
    pub async fn request(
        &self,
        method: RequestMethod,
        url: &str,
        options: RequestOptions,
    ) -> NormalizedResult {
        let context = RequestContext::new(url)
            .with_headers(options.headers.clone())
            .with_data(options.body.clone());

        let outcome = self.send_signed(method, url, options).await;
        if let Err(ref err) = outcome {
            if self.tracing_enabled() {
                warn!(error = %err, "Request failed");
            }
        }

        NormalizedResult::from_outcome(context, outcome)
    }

    /// Issue a signed GET request.
    pub async fn get(&self, url: &str, options: RequestOptions) -> NormalizedResult {
        self.request(RequestMethod::Get, url, options).await
    }

    /// Issue a signed PUT request.
    pub async fn put(&self, url: &str, options: RequestOptions) -> NormalizedResult {
        self.request(RequestMethod::Put, url, options).await
    }

    /// Issue a signed POST request.
    pub async fn post(&self, url: &str, options: RequestOptions) -> NormalizedResult {
        self.request(RequestMethod::Post, url, options).await
    }

    /// Issue a signed DELETE request.
    pub async fn delete(&self, url: &str, options: RequestOptions) -> NormalizedResult {
        self.request(RequestMethod::Delete, url, options).await
    }

    async fn send_signed(
        &self,
        method: RequestMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<(u16, String)> {
        let signed_form = form_body(&options).map(str::to_string);
        let request = options
            .params
            .into_iter()
            .fold(RequestBuilder::new(method, url), |req, (name, value)| {
                req.query(name, value)
            })
            .headers(options.headers)
            .json_value(&options.body)?;

        let signed_url = request.resolved_url()?;
        let session = OAuth1Session::new(&self.credentials);
        let authorization = match signed_form {
            Some(form) => {
                session.form_authorization_header(method.as_str(), &signed_url, &form)?
            }
            None => session.authorization_header(method.as_str(), &signed_url)?,
        };

        let response = self.http.execute(request.authorization(authorization)).await?;
        let status = response.status();
        if self.tracing_enabled() {
            debug!(status, headers = ?response.headers(), "Got response headers");
        }

        let body = response.text().await?;
        Ok((status, body))
    }

    fn tracing_enabled(&self) -> bool {
        self.http.config().enable_tracing
    }
}

/// The body text when it is sent as `application/x-www-form-urlencoded`.
fn form_body(options: &RequestOptions) -> Option<&str> {
    let is_form = options.headers.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("content-type")
            && value.split(';').next().is_some_and(|mime| {
                mime.trim()
                    .eq_ignore_ascii_case("application/x-www-form-urlencoded")
            })
    });
    match &options.body {
        Value::String(body) if is_form => Some(body),
        _ => None,
    }
}
