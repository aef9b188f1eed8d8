use super::Value;
use crate::{Error, Result};

use std::sync::Arc;

/// A single result row, with the names of the columns that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len(), "row width mismatch");
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value of the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        Some(&self.values[index])
    }

    /// Moves the value of the named column out of the row.
    pub fn take(&mut self, column: &str) -> Result<Value> {
        match self.columns.iter().position(|name| name == column) {
            Some(index) => Ok(std::mem::take(&mut self.values[index])),
            None => Err(Error::invalid_statement(format!(
                "result row has no column `{column}`"
            ))),
        }
    }

    /// Moves the first value out of the row. Used for single-column reads.
    pub fn take_first(&mut self) -> Result<Value> {
        match self.values.first_mut() {
            Some(value) => Ok(std::mem::take(value)),
            None => Err(Error::invalid_statement("result row has no columns")),
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
