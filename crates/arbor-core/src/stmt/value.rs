use super::{ScalarTy, ValueMap, ValueRecord};
use crate::{Error, Result};

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A dynamically typed value.
///
/// Aggregates are converted into a tree of values before planning: an entity
/// instance becomes a [`ValueRecord`] with one slot per property, collections
/// become lists or maps of records.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Opaque bytes
    Bytes(Vec<u8>),

    Uuid(Uuid),

    Date(NaiveDate),

    DateTime(NaiveDateTime),

    /// Null value
    #[default]
    Null,

    /// An entity instance, one slot per property
    Record(ValueRecord),

    /// An ordered list or an unordered set of values
    List(Vec<Value>),

    /// Key-value pairs in insertion order
    Map(ValueMap),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns `true` if the value fits in a single column.
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Record(_) | Self::List(_) | Self::Map(_))
    }

    pub fn record_from_vec(fields: Vec<Self>) -> Self {
        ValueRecord::from_vec(fields).into()
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::F64(_) => "F64",
            Self::String(_) => "String",
            Self::Bytes(_) => "Bytes",
            Self::Uuid(_) => "Uuid",
            Self::Date(_) => "Date",
            Self::DateTime(_) => "DateTime",
            Self::Null => "Null",
            Self::Record(_) => "Record",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ValueRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Result<ValueRecord> {
        match self {
            Self::Record(record) => Ok(record),
            _ => Err(Error::type_conversion(self, "Record")),
        }
    }

    /// Converts into a list of items. `Null` is treated as the empty list.
    pub fn into_list(self) -> Result<Vec<Value>> {
        match self {
            Self::List(items) => Ok(items),
            Self::Null => Ok(vec![]),
            _ => Err(Error::type_conversion(self, "List")),
        }
    }

    /// Converts into a map. `Null` is treated as the empty map.
    pub fn into_map(self) -> Result<ValueMap> {
        match self {
            Self::Map(map) => Ok(map),
            Self::Null => Ok(ValueMap::new()),
            _ => Err(Error::type_conversion(self, "Map")),
        }
    }

    /// Returns `true` if the value is the zero of a numeric type.
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::I32(v) => v == 0,
            Self::I64(v) => v == 0,
            Self::F64(v) => v == 0.0,
            _ => false,
        }
    }

    /// Coerces a value as read from the store into the given scalar type.
    ///
    /// Drivers report values in the store's own representation (integers for
    /// booleans, text for dates and uuids). This normalizes them so typed
    /// loading only has to handle the exact variant.
    pub fn cast(self, ty: &ScalarTy) -> Result<Value> {
        use ScalarTy as T;

        Ok(match (ty, self) {
            (_, Value::Null) => Value::Null,
            (T::Bool, Value::Bool(v)) => Value::Bool(v),
            (T::Bool, Value::I64(v)) => Value::Bool(v != 0),
            (T::Bool, Value::I32(v)) => Value::Bool(v != 0),
            (T::I32, Value::I32(v)) => Value::I32(v),
            (T::I32, Value::I64(v)) => match i32::try_from(v) {
                Ok(v) => Value::I32(v),
                Err(_) => return Err(Error::type_conversion(Value::I64(v), "i32")),
            },
            (T::I64, Value::I64(v)) => Value::I64(v),
            (T::I64, Value::I32(v)) => Value::I64(v as i64),
            (T::F64, Value::F64(v)) => Value::F64(v),
            (T::F64, Value::I64(v)) => Value::F64(v as f64),
            (T::F64, Value::I32(v)) => Value::F64(v as f64),
            (T::String, Value::String(v)) => Value::String(v),
            (T::Bytes, Value::Bytes(v)) => Value::Bytes(v),
            (T::Bytes, Value::String(v)) => Value::Bytes(v.into_bytes()),
            (T::Uuid, Value::Uuid(v)) => Value::Uuid(v),
            (T::Uuid, Value::String(v)) => Value::Uuid(v.parse()?),
            (T::Uuid, Value::Bytes(v)) => Value::Uuid(Uuid::from_slice(&v)?),
            (T::Date, Value::Date(v)) => Value::Date(v),
            (T::Date, Value::String(v)) => Value::Date(NaiveDate::parse_from_str(&v, DATE_FORMAT)?),
            (T::DateTime, Value::DateTime(v)) => Value::DateTime(v),
            (T::DateTime, Value::String(v)) => Value::DateTime(parse_date_time(&v)?),
            (T::Enum(enum_ty), Value::String(v)) => {
                if !enum_ty.variants.contains(&v.as_str()) {
                    return Err(Error::type_conversion(Value::String(v), enum_ty.name));
                }
                Value::String(v)
            }
            (ty, value) => return Err(Error::type_conversion(value, ty.name())),
        })
    }
}

fn parse_date_time(src: &str) -> Result<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(src, DATE_TIME_FORMAT) {
        Ok(v) => Ok(v),
        Err(_) => Ok(NaiveDateTime::parse_from_str(src, "%Y-%m-%dT%H:%M:%S%.f")?),
    }
}

/// Formats date and time values the way they are written to text columns.
pub fn format_date(v: &NaiveDate) -> String {
    v.format(DATE_FORMAT).to_string()
}

pub fn format_date_time(v: &NaiveDateTime) -> String {
    v.format(DATE_TIME_FORMAT).to_string()
}

macro_rules! impl_value_conversions {
    ( $( $variant:ident($ty:ty) => $name:literal ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(src: $ty) -> Self {
                    Self::$variant(src)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        _ => Err(Error::type_conversion(value, $name)),
                    }
                }
            }
        )*
    };
}

impl_value_conversions! {
    Bool(bool) => "bool",
    I32(i32) => "i32",
    I64(i64) => "i64",
    F64(f64) => "f64",
    String(String) => "String",
    Bytes(Vec<u8>) => "Bytes",
    Uuid(Uuid) => "Uuid",
    Date(NaiveDate) => "Date",
    DateTime(NaiveDateTime) => "DateTime",
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<ValueRecord> for Value {
    fn from(src: ValueRecord) -> Self {
        Self::Record(src)
    }
}

impl From<ValueMap> for Value {
    fn from(src: ValueMap) -> Self {
        Self::Map(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
