//! Error types for ns-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for ns-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ns-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Names of the missing credential fields, if that is what went wrong.
    pub fn missing_fields(&self) -> &[&'static str] {
        match &self.kind {
            ErrorKind::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

/// The kind of error that occurred.
///
/// Error messages never include credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Required credential fields are absent or empty.
    #[error("Missing required credential field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Environment variables not set.
    #[error("Environment variable(s) not set: {}", .0.join(", "))]
    EnvVar(Vec<String>),

    /// Signing failed.
    #[error("Signature error: {0}")]
    Signature(String),

    /// The URL to sign could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
