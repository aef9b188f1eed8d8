mod query_sql;
pub use query_sql::QuerySql;

mod raw_sql;
pub use raw_sql::RawSql;

mod transaction;
pub use transaction::Transaction;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Execute a statement generated from entity metadata
    QuerySql(QuerySql),

    /// Execute SQL text supplied by a named statement or a raw query
    RawSql(RawSql),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuerySql(_) => "query_sql",
            Self::RawSql(_) => "raw_sql",
            Self::Transaction(_) => "transaction",
        }
    }
}
