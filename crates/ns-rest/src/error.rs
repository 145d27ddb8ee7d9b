//! Error types for ns-rest.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
    #[error("Auth error: {0}")]
    Auth(String),
}

impl From<busbar_ns_client::Error> for Error {
    fn from(err: busbar_ns_client::Error) -> Self {
        Error { kind: ErrorKind::Client(err.to_string()), source: Some(Box::new(err)) }
    }
}

impl From<busbar_ns_auth::Error> for Error {
    fn from(err: busbar_ns_auth::Error) -> Self {
        Error { kind: ErrorKind::Auth(err.to_string()), source: Some(Box::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let err: Error =
            busbar_ns_client::Error::new(busbar_ns_client::ErrorKind::Timeout).into();
        assert!(matches!(err.kind, ErrorKind::Client(_)));
        assert_eq!(err.to_string(), "Client error: Request timeout");
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_auth_error() {
        let err: Error = busbar_ns_auth::Error::new(busbar_ns_auth::ErrorKind::Signature(
            "bad key".to_string(),
        ))
        .into();
        assert!(matches!(err.kind, ErrorKind::Auth(_)));
        assert!(err.to_string().starts_with("Auth error: "));
    }
}
