use super::Operation;

use crate::stmt::Value;

/// SQL text with positional parameters, already in the driver's dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSql {
    pub sql: String,
    pub params: Vec<Value>,
}

impl RawSql {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

impl From<RawSql> for Operation {
    fn from(value: RawSql) -> Self {
        Self::RawSql(value)
    }
}
