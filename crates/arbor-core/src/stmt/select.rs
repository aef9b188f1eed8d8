use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub returning: Returning,
    pub filter: Option<Expr>,

    /// Column to sort by, ascending
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Returning {
    Columns(Vec<String>),
    Count,
}

impl Select {
    pub fn columns(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            returning: Returning::Columns(columns),
            filter: None,
            order_by: None,
        }
    }

    pub fn count(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            returning: Returning::Count,
            filter: None,
            order_by: None,
        }
    }

    pub fn filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }
}
