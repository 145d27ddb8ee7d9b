//! Driver abstraction.
//!
//! The query client only needs to open a connection, run one statement and
//! close it again. The `odbc` feature provides an implementation backed by
//! the system driver manager; tests plug in their own.

use serde_json::{Map, Value};

use crate::error::Result;

/// Opens connections from connection strings.
pub trait OdbcDriver: Send + Sync {
    /// Open a connection.
    fn connect<'a>(&'a self, connection_string: &str) -> Result<Box<dyn OdbcConnection + 'a>>;
}

/// An open connection.
pub trait OdbcConnection {
    /// Execute one statement. `None` when the statement produced no result set.
    fn execute(&mut self, sql: &str) -> Result<Option<RowSet>>;

    /// Close the connection.
    fn close(self: Box<Self>) -> Result<()>;
}

/// A fully fetched result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Rows as `[{"column": value, ...}, ...]`. Missing cells become `null`.
    pub fn to_records(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    let record: Map<String, Value> = self
                        .columns
                        .iter()
                        .enumerate()
                        .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or(Value::Null)))
                        .collect();
                    Value::Object(record)
                })
                .collect(),
        )
    }

    /// Record-oriented JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_records())?)
    }
}
