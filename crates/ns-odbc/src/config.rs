//! SuiteAnalytics Connect connection settings.

use std::borrow::Cow;

use busbar_ns_auth::{account_host, derive_password, NetSuiteCredentials};

use crate::error::{Error, ErrorKind, Result};

/// Domain suffix of the SuiteAnalytics Connect service.
pub const SERVICE_HOST_SUFFIX: &str = "connect.api.netsuite.com";

/// Default SuiteAnalytics Connect port.
pub const DEFAULT_PORT: u16 = 1708;

/// Default server data source.
pub const DEFAULT_DATA_SOURCE: &str = "NetSuite2.com";

/// Connect service host for an account, e.g. `1234567-sb1.connect.api.netsuite.com`.
pub fn service_host(account_id: &str) -> String {
    format!("{}.{}", account_host(account_id), SERVICE_HOST_SUFFIX)
}

/// Where the driver connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdbcTarget {
    /// A data source configured in the driver manager.
    Dsn(String),
    /// DSN-less connection through a named driver.
    Driver {
        driver: String,
        host: String,
        port: u16,
        data_source: String,
    },
}

impl OdbcTarget {
    /// Named data source.
    pub fn dsn(name: impl Into<String>) -> Self {
        OdbcTarget::Dsn(name.into())
    }

    /// DSN-less target on the account's Connect service host with default
    /// port and data source.
    pub fn driver(driver: impl Into<String>, account_id: &str) -> Self {
        OdbcTarget::Driver {
            driver: driver.into(),
            host: service_host(account_id),
            port: DEFAULT_PORT,
            data_source: DEFAULT_DATA_SOURCE.to_string(),
        }
    }

    /// Short description used as the result `url`.
    pub fn describe(&self) -> String {
        match self {
            OdbcTarget::Dsn(name) => format!("DSN={name}"),
            OdbcTarget::Driver { host, port, .. } => format!("{host}:{port}"),
        }
    }

    fn connection_prefix(&self) -> String {
        match self {
            OdbcTarget::Dsn(name) => format!("DSN={}", escape_value(name)),
            OdbcTarget::Driver {
                driver,
                host,
                port,
                data_source,
            } => format!(
                "DRIVER={};Host={};Port={};Encrypted=1;Truststore=system;SDSN={}",
                escape_value(driver),
                escape_value(host),
                port,
                escape_value(data_source)
            ),
        }
    }
}

/// How the login password is obtained.
#[derive(Clone)]
pub enum OdbcAuth {
    /// A fixed password, sent as-is.
    Password(String),
    /// A token password derived from the credentials on every connection.
    Token(NetSuiteCredentials),
}

impl std::fmt::Debug for OdbcAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OdbcAuth::Password(_) => f.debug_tuple("Password").field(&"[REDACTED]").finish(),
            OdbcAuth::Token(credentials) => f.debug_tuple("Token").field(credentials).finish(),
        }
    }
}

impl OdbcAuth {
    /// Password for one connection attempt.
    pub fn password(&self) -> Result<String> {
        match self {
            OdbcAuth::Password(password) => Ok(password.clone()),
            OdbcAuth::Token(credentials) => Ok(derive_password(credentials)?),
        }
    }
}

/// Settings for a SuiteAnalytics Connect login.
#[derive(Debug, Clone)]
pub struct OdbcConfig {
    account_id: String,
    user_email: String,
    role_id: String,
    target: OdbcTarget,
    auth: OdbcAuth,
    enable_tracing: bool,
}

impl OdbcConfig {
    pub fn builder() -> OdbcConfigBuilder {
        OdbcConfigBuilder::default()
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn role_id(&self) -> &str {
        &self.role_id
    }

    pub fn target(&self) -> &OdbcTarget {
        &self.target
    }

    pub fn auth(&self) -> &OdbcAuth {
        &self.auth
    }

    pub fn enable_tracing(&self) -> bool {
        self.enable_tracing
    }

    /// Build a connection string. Token auth derives a fresh password on
    /// every call.
    pub fn connection_string(&self) -> Result<String> {
        let password = self.auth.password()?;
        Ok(self.connection_string_with_password(&password))
    }

    /// Build a connection string with the given password.
    pub fn connection_string_with_password(&self, password: &str) -> String {
        // CustomProperties must come last: its value runs to the end.
        format!(
            "{};UID={};PWD={};CustomProperties=AccountID={};RoleID={}",
            self.target.connection_prefix(),
            escape_value(&self.user_email),
            escape_value(password),
            self.account_id,
            self.role_id
        )
    }
}

/// Builder for [`OdbcConfig`].
#[derive(Debug, Clone)]
pub struct OdbcConfigBuilder {
    account_id: Option<String>,
    user_email: Option<String>,
    role_id: Option<String>,
    target: Option<OdbcTarget>,
    auth: Option<OdbcAuth>,
    enable_tracing: bool,
}

impl Default for OdbcConfigBuilder {
    fn default() -> Self {
        Self {
            account_id: None,
            user_email: None,
            role_id: None,
            target: None,
            auth: None,
            enable_tracing: true,
        }
    }
}

impl OdbcConfigBuilder {
    /// Set the account id. Defaults to the token credentials' account.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Set the login user (e-mail address).
    pub fn user_email(mut self, user_email: impl Into<String>) -> Self {
        self.user_email = Some(user_email.into());
        self
    }

    /// Set the role id.
    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    /// Connect through a named data source.
    pub fn dsn(self, name: impl Into<String>) -> Self {
        self.target(OdbcTarget::dsn(name))
    }

    /// Set the connection target.
    pub fn target(mut self, target: OdbcTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Log in with a fixed password.
    pub fn password(self, password: impl Into<String>) -> Self {
        self.auth(OdbcAuth::Password(password.into()))
    }

    /// Log in with token passwords derived from `credentials`.
    pub fn token(self, credentials: NetSuiteCredentials) -> Self {
        self.auth(OdbcAuth::Token(credentials))
    }

    /// Set the authentication mode.
    pub fn auth(mut self, auth: OdbcAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Enable or disable tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Validate and build. Every missing or empty setting is reported.
    pub fn build(self) -> Result<OdbcConfig> {
        let account_id = self.account_id.clone().or_else(|| match &self.auth {
            Some(OdbcAuth::Token(credentials)) => Some(credentials.account_id().to_string()),
            _ => None,
        });

        let mut missing = Vec::new();
        if account_id.as_deref().is_none_or(str::is_empty) {
            missing.push("account_id");
        }
        if self.user_email.as_deref().is_none_or(str::is_empty) {
            missing.push("user_email");
        }
        if self.role_id.as_deref().is_none_or(str::is_empty) {
            missing.push("role_id");
        }
        let target_missing = match &self.target {
            None => true,
            Some(OdbcTarget::Dsn(name)) => name.is_empty(),
            Some(OdbcTarget::Driver { driver, host, .. }) => driver.is_empty() || host.is_empty(),
        };
        if target_missing {
            missing.push("target");
        }
        if self.auth.is_none() {
            missing.push("auth");
        }

        match (account_id, self.user_email, self.role_id, self.target, self.auth) {
            (Some(account_id), Some(user_email), Some(role_id), Some(target), Some(auth))
                if missing.is_empty() =>
            {
                Ok(OdbcConfig {
                    account_id,
                    user_email,
                    role_id,
                    target,
                    auth,
                    enable_tracing: self.enable_tracing,
                })
            }
            _ => Err(Error::new(ErrorKind::MissingFields(missing))),
        }
    }
}

/// Brace-quote a connection string value when it contains separators.
fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains([';', '{', '}']) || value.trim() != value {
        Cow::Owned(format!("{{{}}}", value.replace('}', "}}")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> NetSuiteCredentials {
        NetSuiteCredentials::new("1234567_SB1", "ck", "cs", "tk", "ts").unwrap()
    }

    #[test]
    fn test_service_host() {
        assert_eq!(
            service_host("1234567_SB1"),
            "1234567-sb1.connect.api.netsuite.com"
        );
    }

    #[test]
    fn test_dsn_connection_string_with_password() {
        let config = OdbcConfig::builder()
            .account_id("1234567")
            .user_email("analyst@example.com")
            .role_id("3")
            .dsn("NetSuite")
            .password("hunter2")
            .build()
            .unwrap();

        assert_eq!(
            config.connection_string().unwrap(),
            "DSN=NetSuite;UID=analyst@example.com;PWD=hunter2;\
             CustomProperties=AccountID=1234567;RoleID=3"
        );
        assert_eq!(config.target().describe(), "DSN=NetSuite");
    }

    #[test]
    fn test_driver_connection_string() {
        let config = OdbcConfig::builder()
            .account_id("1234567_SB1")
            .user_email("analyst@example.com")
            .role_id("1000")
            .target(OdbcTarget::driver("NetSuite Drivers 64bit", "1234567_SB1"))
            .password("pw")
            .build()
            .unwrap();

        assert_eq!(
            config.connection_string().unwrap(),
            "DRIVER=NetSuite Drivers 64bit;Host=1234567-sb1.connect.api.netsuite.com;\
             Port=1708;Encrypted=1;Truststore=system;SDSN=NetSuite2.com;\
             UID=analyst@example.com;PWD=pw;CustomProperties=AccountID=1234567_SB1;RoleID=1000"
        );
        assert_eq!(
            config.target().describe(),
            "1234567-sb1.connect.api.netsuite.com:1708"
        );
    }

    #[test]
    fn test_token_password_derived_per_call() {
        let config = OdbcConfig::builder()
            .user_email("analyst@example.com")
            .role_id("3")
            .dsn("NetSuite")
            .token(credentials())
            .build()
            .unwrap();

        assert_eq!(config.account_id(), "1234567_SB1");

        let first = config.connection_string().unwrap();
        let second = config.connection_string().unwrap();
        assert!(first.contains(";PWD=1234567_SB1&ck&tk&"));
        assert!(first.contains("&HMAC-SHA256;"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_values_with_separators_are_quoted() {
        let config = OdbcConfig::builder()
            .account_id("1")
            .user_email("user@example.com")
            .role_id("3")
            .dsn("My;DSN")
            .password("p;w}d")
            .build()
            .unwrap();

        assert_eq!(
            config.connection_string().unwrap(),
            "DSN={My;DSN};UID=user@example.com;PWD={p;w}}d};CustomProperties=AccountID=1;RoleID=3"
        );
    }

    #[test]
    fn test_missing_settings_all_reported() {
        let err = OdbcConfig::builder()
            .user_email("")
            .password("pw")
            .build()
            .unwrap_err();

        assert_eq!(
            err.missing_fields(),
            &["account_id", "user_email", "role_id", "target"]
        );
    }

    #[test]
    fn test_missing_auth_reported() {
        let err = OdbcConfig::builder()
            .account_id("1")
            .user_email("u")
            .role_id("3")
            .dsn("NetSuite")
            .build()
            .unwrap_err();

        assert_eq!(err.missing_fields(), &["auth"]);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = OdbcConfig::builder()
            .account_id("1")
            .user_email("u")
            .role_id("3")
            .dsn("NetSuite")
            .password("hunter2")
            .build()
            .unwrap();

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("[REDACTED]"));
    }
}
