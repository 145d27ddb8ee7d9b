//! Driver backed by the system ODBC driver manager.

use odbc_api::buffers::TextRowSet;
use odbc_api::{Connection, ConnectionOptions, Cursor, Environment, ResultSetMetadata};
use serde_json::Value;
use tracing::debug;

use crate::driver::{OdbcConnection, OdbcDriver, RowSet};
use crate::error::{Error, ErrorKind, Result};

/// Rows fetched per round trip.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Upper bound on a single text cell, in bytes.
pub const DEFAULT_MAX_STR_LEN: usize = 4096;

/// [`OdbcDriver`] over `odbc-api`. All cell values are fetched as text; a
/// cell longer than `max_str_len` bytes fails the query.
pub struct OdbcApiDriver {
    env: Environment,
    batch_size: usize,
    max_str_len: usize,
}

impl std::fmt::Debug for OdbcApiDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdbcApiDriver")
            .field("batch_size", &self.batch_size)
            .field("max_str_len", &self.max_str_len)
            .finish_non_exhaustive()
    }
}

impl OdbcApiDriver {
    /// Allocate an ODBC environment.
    pub fn new() -> Result<Self> {
        let env = Environment::new()
            .map_err(|e| Error::with_source(ErrorKind::Driver(e.to_string()), e))?;
        Ok(Self {
            env,
            batch_size: DEFAULT_BATCH_SIZE,
            max_str_len: DEFAULT_MAX_STR_LEN,
        })
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_max_str_len(mut self, max_str_len: usize) -> Self {
        self.max_str_len = max_str_len;
        self
    }
}

impl OdbcDriver for OdbcApiDriver {
    fn connect<'a>(&'a self, connection_string: &str) -> Result<Box<dyn OdbcConnection + 'a>> {
        let connection = self
            .env
            .connect_with_connection_string(connection_string, ConnectionOptions::default())
            .map_err(|e| Error::with_source(ErrorKind::Connection(e.to_string()), e))?;
        Ok(Box::new(OdbcApiConnection {
            connection,
            batch_size: self.batch_size,
            max_str_len: self.max_str_len,
        }))
    }
}

struct OdbcApiConnection<'env> {
    connection: Connection<'env>,
    batch_size: usize,
    max_str_len: usize,
}

fn execution_error(err: odbc_api::Error) -> Error {
    Error::with_source(ErrorKind::Execution(err.to_string()), err)
}

impl OdbcConnection for OdbcApiConnection<'_> {
    fn execute(&mut self, sql: &str) -> Result<Option<RowSet>> {
        let Some(mut cursor) = self.connection.execute(sql, ()).map_err(execution_error)? else {
            return Ok(None);
        };

        let columns = cursor
            .column_names()
            .map_err(execution_error)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(execution_error)?;
        let mut rows = RowSet::new(columns);

        let buffer = TextRowSet::for_cursor(self.batch_size, &mut cursor, Some(self.max_str_len))
            .map_err(execution_error)?;
        let mut block_cursor = cursor.bind_buffer(buffer).map_err(execution_error)?;
        // Cells longer than the buffer fail the query instead of being cut short.
        while let Some(batch) = block_cursor
            .fetch_with_truncation_check(true)
            .map_err(execution_error)?
        {
            for row in 0..batch.num_rows() {
                let values = (0..batch.num_cols())
                    .map(|col| match batch.at(col, row) {
                        Some(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
                        None => Value::Null,
                    })
                    .collect();
                rows.push_row(values);
            }
        }

        debug!(rows = rows.rows.len(), "Fetched result set");
        Ok(Some(rows))
    }

    fn close(self: Box<Self>) -> Result<()> {
        let mut handle = self.connection.into_handle();
        handle
            .disconnect()
            .into_result(&handle)
            .map_err(|e| Error::with_source(ErrorKind::Driver(e.to_string()), e))
    }
}
