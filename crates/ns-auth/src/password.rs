//! Token passwords for SuiteAnalytics Connect (ODBC) logins.
//!
//! The driver accepts a one-time password of the form
//!
//! ```text
//! account_id&consumer_key&token_id&nonce&timestamp&base64(signature)&HMAC-SHA256
//! ```
//!
//! where the signature is HMAC-SHA256 over the first five fields, keyed with
//! `consumer_secret&token_secret`. Unlike REST signing nothing is
//! percent-encoded.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::Sha256;

use crate::credentials::NetSuiteCredentials;
use crate::error::{Error, ErrorKind, Result};
use crate::SIGNATURE_METHOD;

/// Default nonce length.
pub const DEFAULT_NONCE_LENGTH: usize = 20;

/// Random alphanumeric string drawn uniformly from `[A-Za-z0-9]`.
pub fn generate_nonce(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Seconds since the Unix epoch (UTC), as decimal text.
pub fn generate_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// Derive a fresh one-time password. Every call uses a new nonce and timestamp.
pub fn derive_password(credentials: &NetSuiteCredentials) -> Result<String> {
    derive_password_with(
        credentials,
        &generate_nonce(DEFAULT_NONCE_LENGTH),
        &generate_timestamp(),
    )
}

/// Derive a one-time password with a fixed nonce and timestamp.
pub fn derive_password_with(
    credentials: &NetSuiteCredentials,
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let base_string = [
        credentials.account_id(),
        credentials.consumer_key(),
        credentials.token_id(),
        nonce,
        timestamp,
    ]
    .join("&");
    let key = format!(
        "{}&{}",
        credentials.consumer_secret(),
        credentials.token_secret()
    );
    let signature = hmac_sha256_base64(key.as_bytes(), base_string.as_bytes())?;

    Ok(format!("{base_string}&{signature}&{SIGNATURE_METHOD}"))
}

/// Base64 (standard alphabet, padded) HMAC-SHA256 of `message`.
pub(crate) fn hmac_sha256_base64(key: &[u8], message: &[u8]) -> Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| Error::new(ErrorKind::Signature(format!("bad key: {e}"))))?;
    mac.update(message);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> NetSuiteCredentials {
        NetSuiteCredentials::new("test", "test_key", "test_secret", "test_token", "test_secret")
            .unwrap()
    }

    #[test]
    fn test_generate_nonce() {
        let nonce = generate_nonce(DEFAULT_NONCE_LENGTH);
        assert_eq!(nonce.len(), 20);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_nonce_custom_length() {
        for length in [0, 1, 8, 64] {
            let nonce = generate_nonce(length);
            assert_eq!(nonce.len(), length);
            assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_nonces_differ() {
        assert_ne!(generate_nonce(20), generate_nonce(20));
    }

    #[test]
    fn test_generate_timestamp() {
        let first = generate_timestamp();
        let second = generate_timestamp();
        assert!(!first.is_empty());
        assert!(first.chars().all(|c| c.is_ascii_digit()));
        assert!(second.parse::<u64>().unwrap() >= first.parse::<u64>().unwrap());
    }

    #[test]
    fn test_derive_password_format() {
        let password = derive_password(&test_credentials()).unwrap();
        assert!(password.starts_with("test&test_key&test_token&"));
        assert!(password.contains("&HMAC-SHA256"));
        assert!(password.ends_with("&HMAC-SHA256"));
        assert_eq!(password.split('&').count(), 7);
    }

    #[test]
    fn test_derive_password_known_vector() {
        let password =
            derive_password_with(&test_credentials(), "abcdefghij0123456789", "1700000000")
                .unwrap();
        assert_eq!(
            password,
            "test&test_key&test_token&abcdefghij0123456789&1700000000\
             &2RAbRQvHud0NlI75UvlZRb+z5yeKsp7Yv4wXDVubQBs=&HMAC-SHA256"
        );
    }

    #[test]
    fn test_derive_password_unique_per_call() {
        let creds = test_credentials();
        assert_ne!(
            derive_password(&creds).unwrap(),
            derive_password(&creds).unwrap()
        );
    }
}
