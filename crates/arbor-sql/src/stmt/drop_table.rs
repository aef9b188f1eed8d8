use super::Statement;

#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub name: String,
}

impl Statement {
    pub fn drop_table(name: impl Into<String>) -> Self {
        DropTable { name: name.into() }.into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
