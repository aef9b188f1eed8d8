use std::fmt;

/// The scalar types a column can hold.
///
/// Anything in this list is written to a single column of the owning
/// entity's table and never produces a database action of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarTy {
    Bool,
    I32,
    I64,
    F64,
    String,

    /// Opaque bytes, handed to the driver verbatim
    Bytes,

    Uuid,
    Date,
    DateTime,

    /// An enumeration stored by variant name
    Enum(EnumTy),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTy {
    /// Fully qualified Rust type name
    pub name: &'static str,

    /// Variant names, in declaration order
    pub variants: &'static [&'static str],
}

impl ScalarTy {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::F64)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::I32 | Self::I64)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F64 => "f64",
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Uuid => "Uuid",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Enum(ty) => ty.name,
        }
    }
}

impl fmt::Display for ScalarTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
