use super::Expr;

/// Deletes the rows matching `filter`, or every row when there is none.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub filter: Option<Expr>,
}
