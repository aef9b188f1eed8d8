use arbor_core::{schema::db::Column, stmt::ScalarTy};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ScalarTy,
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl ColumnDef {
    pub fn from_schema(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            ty: column.ty.clone(),
            not_null: !column.nullable,
            primary_key: column.primary_key,
            auto_increment: column.auto_increment,
        }
    }
}
