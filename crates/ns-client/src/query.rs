//! The SQL query capability shared by the REST and driver-backed adapters.

use std::future::Future;

use crate::normalize::NormalizedResult;

/// Execute a SQL statement and return a normalized result.
///
/// Implementations never fail: errors are reported inside the returned
/// [`NormalizedResult`]. The SQL text is passed through untouched, so an
/// empty statement is a legal call.
pub trait SqlQuery {
    /// Run one statement.
    fn query(&self, sql: &str) -> impl Future<Output = NormalizedResult> + Send;
}
