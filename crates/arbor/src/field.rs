mod collection;

mod primitive_chrono;

use crate::Result;

use arbor_core::{
    schema::app::Type,
    stmt::{ScalarTy, Value},
};
use std::ops;

/// A type that can be stored in a property of an entity, or returned from a
/// query.
///
/// Scalars convert to a single column value. Entities, implemented by
/// `#[derive(Entity)]`, convert to a record. Collections of entities convert
/// to lists and maps of records.
pub trait Field: Sized + Send + 'static {
    /// The declared type, used to build mapping metadata.
    fn ty() -> Type;

    /// Converts the value into its dynamic form.
    fn to_value(&self) -> Value;

    /// Rebuilds the value from its dynamic form.
    fn load(value: Value) -> Result<Self>;
}

macro_rules! impl_scalar_field {
    ( $( $ty:ty => $scalar:ident ),* $(,)? ) => {
        $(
            impl Field for $ty {
                fn ty() -> Type {
                    Type::Scalar(ScalarTy::$scalar)
                }

                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }

                fn load(value: Value) -> Result<Self> {
                    value.try_into()
                }
            }
        )*
    };
}

impl_scalar_field! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f64 => F64,
    String => String,
    uuid::Uuid => Uuid,
}

/// Opaque bytes, stored in a single column.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Field for Bytes {
    fn ty() -> Type {
        Type::Scalar(ScalarTy::Bytes)
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.0.clone())
    }

    fn load(value: Value) -> Result<Self> {
        Ok(Bytes(value.try_into()?))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Bytes(value)
    }
}

impl ops::Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Field> Field for Option<T> {
    fn ty() -> Type {
        Type::optional(T::ty())
    }

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }
}
