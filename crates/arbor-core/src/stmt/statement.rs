use super::{Delete, Insert, Select, Update};

/// A statement generated from entity metadata.
///
/// Serialized to SQL by `arbor-sql`; drivers that accept SQL receive the
/// statement and do the serialization themselves so each one can pick its
/// own flavor.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Select(Select),
}

impl Statement {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Select(_) => "select",
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Self::Insert(stmt) => &stmt.table,
            Self::Update(stmt) => &stmt.table,
            Self::Delete(stmt) => &stmt.table,
            Self::Select(stmt) => &stmt.table,
        }
    }

    /// Returns `true` if the statement produces rows.
    pub fn returns_rows(&self) -> bool {
        match self {
            Self::Insert(stmt) => stmt.returning.is_some(),
            Self::Select(_) => true,
            _ => false,
        }
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
