use super::{Select, Value};

/// A filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(String),
    Value(Value),

    /// `lhs = rhs`
    Eq(Box<Expr>, Box<Expr>),

    /// `expr IN (v1, v2, ...)`
    InList(Box<Expr>, Vec<Value>),

    /// `expr IN (SELECT ...)`
    InSubquery(Box<Expr>, Box<Select>),

    /// `expr IS NOT NULL`
    IsNotNull(Box<Expr>),
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(Box::new(Self::column(column)), Box::new(Self::value(value)))
    }

    pub fn in_list(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self::InList(Box::new(Self::column(column)), values)
    }

    pub fn in_subquery(column: impl Into<String>, select: Select) -> Self {
        Self::InSubquery(Box::new(Self::column(column)), Box::new(select))
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::IsNotNull(Box::new(Self::column(column)))
    }
}
