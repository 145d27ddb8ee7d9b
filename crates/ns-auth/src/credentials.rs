//! NetSuite token-based authentication credentials.
//!
//! Secrets are redacted in Debug output.

use crate::error::{Error, ErrorKind, Result};

const ENV_ACCOUNT_ID: &str = "NETSUITE_ACCOUNT_ID";
const ENV_CONSUMER_KEY: &str = "NETSUITE_CONSUMER_KEY";
const ENV_CONSUMER_SECRET: &str = "NETSUITE_CONSUMER_SECRET";
const ENV_TOKEN_ID: &str = "NETSUITE_TOKEN_ID";
const ENV_TOKEN_SECRET: &str = "NETSUITE_TOKEN_SECRET";

/// Host label for an account id: lower-cased, underscores replaced by hyphens.
///
/// Sandbox accounts such as `1234567_SB1` become `1234567-sb1`.
pub fn account_host(account_id: &str) -> String {
    account_id.to_lowercase().replace('_', "-")
}

/// Credentials for NetSuite token-based authentication.
///
/// All five fields are required and validated at construction, so a value of
/// this type is always complete. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct NetSuiteCredentials {
    account_id: String,
    consumer_key: String,
    consumer_secret: String,
    token_id: String,
    token_secret: String,
}

impl std::fmt::Debug for NetSuiteCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetSuiteCredentials")
            .field("account_id", &self.account_id)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("token_id", &self.token_id)
            .field("token_secret", &"[REDACTED]")
            .finish()
    }
}

impl NetSuiteCredentials {
    /// Create credentials from the five required values.
    ///
    /// Empty values count as missing; the error names every missing field.
    pub fn new(
        account_id: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token_id: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::builder()
            .account_id(account_id)
            .consumer_key(consumer_key)
            .consumer_secret(consumer_secret)
            .token_id(token_id)
            .token_secret(token_secret)
            .build()
    }

    /// Start building credentials field by field.
    pub fn builder() -> NetSuiteCredentialsBuilder {
        NetSuiteCredentialsBuilder::default()
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `NETSUITE_ACCOUNT_ID`
    /// - `NETSUITE_CONSUMER_KEY`
    /// - `NETSUITE_CONSUMER_SECRET`
    /// - `NETSUITE_TOKEN_ID`
    /// - `NETSUITE_TOKEN_SECRET`
    ///
    /// All unset variables are reported together.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let names = [
            ENV_ACCOUNT_ID,
            ENV_CONSUMER_KEY,
            ENV_CONSUMER_SECRET,
            ENV_TOKEN_ID,
            ENV_TOKEN_SECRET,
        ];
        let values: Vec<Option<String>> = names
            .iter()
            .map(|name| lookup(name).filter(|v| !v.is_empty()))
            .collect();

        let missing: Vec<String> = names
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::new(ErrorKind::EnvVar(missing)));
        }

        let mut values = values.into_iter().flatten();
        let mut next = || values.next().unwrap_or_default();
        Self::new(next(), next(), next(), next(), next())
    }

    /// Get the account id (also the OAuth realm).
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Get the consumer key.
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Get the consumer secret.
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// Get the token id.
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// Get the token secret.
    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }

    /// Host label used in this account's service domains.
    pub fn account_host(&self) -> String {
        account_host(&self.account_id)
    }
}

/// Builder for [`NetSuiteCredentials`].
#[derive(Default)]
pub struct NetSuiteCredentialsBuilder {
    account_id: Option<String>,
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    token_id: Option<String>,
    token_secret: Option<String>,
}

impl std::fmt::Debug for NetSuiteCredentialsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetSuiteCredentialsBuilder")
            .field("account_id", &self.account_id)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &self.consumer_secret.as_ref().map(|_| "[REDACTED]"))
            .field("token_id", &self.token_id)
            .field("token_secret", &self.token_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl NetSuiteCredentialsBuilder {
    /// Set the account id.
    pub fn account_id(mut self, value: impl Into<String>) -> Self {
        self.account_id = Some(value.into());
        self
    }

    /// Set the consumer key.
    pub fn consumer_key(mut self, value: impl Into<String>) -> Self {
        self.consumer_key = Some(value.into());
        self
    }

    /// Set the consumer secret.
    pub fn consumer_secret(mut self, value: impl Into<String>) -> Self {
        self.consumer_secret = Some(value.into());
        self
    }

    /// Set the token id.
    pub fn token_id(mut self, value: impl Into<String>) -> Self {
        self.token_id = Some(value.into());
        self
    }

    /// Set the token secret.
    pub fn token_secret(mut self, value: impl Into<String>) -> Self {
        self.token_secret = Some(value.into());
        self
    }

    /// Validate and build the credentials.
    pub fn build(self) -> Result<NetSuiteCredentials> {
        let fields = [
            ("account_id", &self.account_id),
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("token_id", &self.token_id),
            ("token_secret", &self.token_secret),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(Error::new(ErrorKind::MissingFields(missing)));
        }

        Ok(NetSuiteCredentials {
            account_id: self.account_id.unwrap_or_default(),
            consumer_key: self.consumer_key.unwrap_or_default(),
            consumer_secret: self.consumer_secret.unwrap_or_default(),
            token_id: self.token_id.unwrap_or_default(),
            token_secret: self.token_secret.unwrap_or_default(),
        })
    }
}
