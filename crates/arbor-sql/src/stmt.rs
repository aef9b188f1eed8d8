mod column_def;
pub use column_def::ColumnDef;

mod create_table;
pub use create_table::CreateTable;

mod drop_table;
pub use drop_table::DropTable;

pub use arbor_core::stmt::*;

/// A statement that can be serialized to SQL: the core DML statements plus
/// the DDL needed to create the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    DropTable(DropTable),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl From<arbor_core::stmt::Statement> for Statement {
    fn from(value: arbor_core::stmt::Statement) -> Self {
        match value {
            arbor_core::stmt::Statement::Delete(stmt) => Self::Delete(stmt),
            arbor_core::stmt::Statement::Insert(stmt) => Self::Insert(stmt),
            arbor_core::stmt::Statement::Select(stmt) => Self::Select(stmt),
            arbor_core::stmt::Statement::Update(stmt) => Self::Update(stmt),
        }
    }
}

macro_rules! impl_from_core_stmt {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Statement {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_core_stmt!(Delete, Insert, Select, Update);
