use super::Field;
use crate::Result;

use arbor_core::{
    schema::app::Type,
    stmt::{ScalarTy, Value},
};
use chrono::{NaiveDate, NaiveDateTime};

macro_rules! impl_chrono_field {
    ($ty:ty, $name:ident) => {
        impl Field for $ty {
            fn ty() -> Type {
                Type::Scalar(ScalarTy::$name)
            }

            fn to_value(&self) -> Value {
                Value::$name(*self)
            }

            fn load(value: Value) -> Result<Self> {
                value.try_into()
            }
        }
    };
}

impl_chrono_field!(NaiveDate, Date);
impl_chrono_field!(NaiveDateTime, DateTime);
