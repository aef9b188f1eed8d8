use crate::{
    stmt::{Row, Value},
    Error, Result,
};

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, fully buffered
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn empty() -> Self {
        Self::rows(vec![])
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Number of rows affected, or returned.
    pub fn len(&self) -> u64 {
        match self {
            Rows::Count(count) => *count,
            Rows::Values(rows) => rows.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_values(self) -> Result<Vec<Row>> {
        match self {
            Self::Values(rows) => Ok(rows),
            Self::Count(_) => Err(Error::invalid_statement(
                "statement returned a count where rows were expected",
            )),
        }
    }

    /// Reads the single value of a one-row, one-column result, such as a
    /// `COUNT(*)` query.
    pub fn into_scalar(self) -> Result<Value> {
        let mut rows = self.into_values()?;
        match rows.len() {
            1 => rows.remove(0).take_first(),
            0 => Err(Error::record_not_found("scalar query returned no rows")),
            n => Err(Error::too_many_records(format!(
                "scalar query returned {n} rows"
            ))),
        }
    }
}
