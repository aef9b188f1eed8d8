use std::{
    any::TypeId,
    fmt,
    hash::{Hash, Hasher},
};

/// Identifies a Rust type at runtime.
#[derive(Clone, Copy)]
pub struct TypeRef {
    pub id: TypeId,

    /// Fully qualified type name, as reported by [`std::any::type_name`]
    pub name: &'static str,
}

impl TypeRef {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The type name without its module path or generic arguments.
    pub fn short_name(&self) -> &'static str {
        let name = match self.name.find('<') {
            Some(pos) => &self.name[..pos],
            None => self.name,
        };

        match name.rfind("::") {
            Some(pos) => &name[pos + 2..],
            None => name,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
