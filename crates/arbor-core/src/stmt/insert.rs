use super::Value;

/// Inserts a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    /// Column names, in the same order as `values`
    pub columns: Vec<String>,

    pub values: Vec<Value>,

    /// Columns to read back from the inserted row. Set when the store
    /// generates the identifier.
    pub returning: Option<Vec<String>>,
}
