use super::Type;

#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: Type,

    /// Marks the identifier property
    pub id: bool,

    /// Explicit column name, for scalar properties
    pub column: Option<String>,

    /// Explicit reverse column name, for relation properties
    pub reverse_column: Option<String>,

    /// Explicit key column name, for lists and maps
    pub key_column: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            id: false,
            column: None,
            reverse_column: None,
            key_column: None,
        }
    }

    pub fn id(mut self) -> Self {
        self.id = true;
        self
    }

    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    pub fn reverse_column(mut self, name: impl Into<String>) -> Self {
        self.reverse_column = Some(name.into());
        self
    }

    pub fn key_column(mut self, name: impl Into<String>) -> Self {
        self.key_column = Some(name.into());
        self
    }
}
