use crate::stmt::ScalarTy;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ScalarTy,
    pub nullable: bool,
    pub primary_key: bool,

    /// The store generates the value when the insert omits it
    pub auto_increment: bool,
}
