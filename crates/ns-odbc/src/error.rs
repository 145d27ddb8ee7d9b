//! Error types for ns-odbc.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Configuration fields reported missing, in declaration order.
    pub fn missing_fields(&self) -> &[&'static str] {
        match &self.kind {
            ErrorKind::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Missing required ODBC setting(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Password derivation failed: {0}")]
    Auth(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Execution(String),

    #[error("Result encoding failed: {0}")]
    Encoding(String),

    #[error("Query task failed: {0}")]
    Task(String),
}

impl From<busbar_ns_auth::Error> for Error {
    fn from(err: busbar_ns_auth::Error) -> Self {
        Error {
            kind: ErrorKind::Auth(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Encoding(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
