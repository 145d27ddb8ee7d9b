//! OAuth 1.0 (RFC 5849) request signing with HMAC-SHA256.

use tracing::instrument;
use url::{form_urlencoded, Url};

use crate::credentials::NetSuiteCredentials;
use crate::error::Result;
use crate::password::{
    generate_nonce, generate_timestamp, hmac_sha256_base64, DEFAULT_NONCE_LENGTH,
};
use crate::{OAUTH_VERSION, SIGNATURE_METHOD};

/// Percent-encode a value per RFC 3986 (unreserved characters kept).
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// A single-request OAuth 1.0 signing session.
///
/// Built fresh for each request from the held credentials; the signature
/// method is always `HMAC-SHA256`, the version `1.0`, and the realm is the
/// account id.
#[derive(Debug, Clone, Copy)]
pub struct OAuth1Session<'a> {
    credentials: &'a NetSuiteCredentials,
}

impl<'a> OAuth1Session<'a> {
    /// Create a session for one request.
    pub fn new(credentials: &'a NetSuiteCredentials) -> Self {
        Self { credentials }
    }

    /// The OAuth realm.
    pub fn realm(&self) -> &str {
        self.credentials.account_id()
    }

    /// Produce the `Authorization` header value for a request.
    ///
    /// `url` must already carry every query parameter that will be sent.
    #[instrument(skip(self, url))]
    pub fn authorization_header(&self, method: &str, url: &Url) -> Result<String> {
        self.build_header(
            method,
            url,
            None,
            &generate_nonce(DEFAULT_NONCE_LENGTH),
            &generate_timestamp(),
        )
    }

    /// Produce the `Authorization` header value for a request whose body is
    /// `application/x-www-form-urlencoded`. The form parameters are signed
    /// along with the query.
    #[instrument(skip(self, url, form_body))]
    pub fn form_authorization_header(
        &self,
        method: &str,
        url: &Url,
        form_body: &str,
    ) -> Result<String> {
        self.build_header(
            method,
            url,
            Some(form_body),
            &generate_nonce(DEFAULT_NONCE_LENGTH),
            &generate_timestamp(),
        )
    }

    /// Produce the `Authorization` header value with a fixed nonce and timestamp.
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        self.build_header(method, url, None, nonce, timestamp)
    }

    /// Form-body variant of [`authorization_header_with`](Self::authorization_header_with).
    pub fn form_authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        form_body: &str,
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        self.build_header(method, url, Some(form_body), nonce, timestamp)
    }

    fn build_header(
        &self,
        method: &str,
        url: &Url,
        form_body: Option<&str>,
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        let oauth_params = self.oauth_params(nonce, timestamp);
        let signature = self.sign(method, url, form_body, &oauth_params)?;

        let mut header = format!("OAuth realm=\"{}\"", percent_encode(self.realm()));
        for (name, value) in oauth_params
            .iter()
            .map(|(n, v)| (*n, *v))
            .chain(std::iter::once(("oauth_signature", signature.as_str())))
        {
            header.push_str(&format!(", {}=\"{}\"", name, percent_encode(value)));
        }
        Ok(header)
    }

    fn oauth_params<'s>(
        &'s self,
        nonce: &'s str,
        timestamp: &'s str,
    ) -> [(&'static str, &'s str); 6] {
        [
            ("oauth_consumer_key", self.credentials.consumer_key()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.credentials.token_id()),
            ("oauth_version", OAUTH_VERSION),
        ]
    }

    fn sign(
        &self,
        method: &str,
        url: &Url,
        form_body: Option<&str>,
        oauth_params: &[(&str, &str)],
    ) -> Result<String> {
        let base_string = signature_base_string(method, url, form_body, oauth_params);
        let key = format!(
            "{}&{}",
            percent_encode(self.credentials.consumer_secret()),
            percent_encode(self.credentials.token_secret())
        );
        hmac_sha256_base64(key.as_bytes(), base_string.as_bytes())
    }
}

/// Build the signature base string: `METHOD&base_uri&normalized_params`.
///
/// Normalized parameters are the query, the form body (if any) and the
/// oauth parameters.
pub(crate) fn signature_base_string(
    method: &str,
    url: &Url,
    form_body: Option<&str>,
    oauth_params: &[(&str, &str)],
) -> String {
    let form_pairs = form_body
        .map(|body| form_urlencoded::parse(body.as_bytes()))
        .into_iter()
        .flatten();
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .chain(form_pairs)
        .map(|(name, value)| (percent_encode(&name), percent_encode(&value)))
        .chain(
            oauth_params
                .iter()
                .map(|(name, value)| (percent_encode(name), percent_encode(value))),
        )
        .collect();
    params.sort();

    let normalized = params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_uri(url)),
        percent_encode(&normalized)
    )
}

/// Scheme, host, non-default port and path; no query or fragment.
fn base_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}
