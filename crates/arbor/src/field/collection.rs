use super::Field;
use crate::Result;

use arbor_core::{
    schema::app::Type,
    stmt::{Value, ValueMap},
};
use indexmap::IndexMap;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
};

impl<T: Field> Field for Vec<T> {
    fn ty() -> Type {
        Type::list(T::ty())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Field::to_value).collect())
    }

    fn load(value: Value) -> Result<Self> {
        value.into_list()?.into_iter().map(T::load).collect()
    }
}

macro_rules! impl_set_field {
    ($set:ident, $( $bound:path ),*) => {
        impl<T: Field $( + $bound )*> Field for $set<T> {
            fn ty() -> Type {
                Type::set(T::ty())
            }

            fn to_value(&self) -> Value {
                Value::List(self.iter().map(Field::to_value).collect())
            }

            fn load(value: Value) -> Result<Self> {
                value.into_list()?.into_iter().map(T::load).collect()
            }
        }
    };
}

impl_set_field!(HashSet, Eq, Hash);
impl_set_field!(BTreeSet, Ord);

macro_rules! impl_map_field {
    ($map:ident, $( $bound:path ),*) => {
        impl<K: Field $( + $bound )*, V: Field> Field for $map<K, V> {
            fn ty() -> Type {
                Type::map(K::ty(), V::ty())
            }

            fn to_value(&self) -> Value {
                let mut map = ValueMap::with_capacity(self.len());
                for (key, value) in self {
                    map.insert(key.to_value(), value.to_value());
                }
                Value::Map(map)
            }

            fn load(value: Value) -> Result<Self> {
                value
                    .into_map()?
                    .into_iter()
                    .map(|(key, value)| Ok((K::load(key)?, V::load(value)?)))
                    .collect()
            }
        }
    };
}

impl_map_field!(HashMap, Eq, Hash);
impl_map_field!(BTreeMap, Ord);
impl_map_field!(IndexMap, Eq, Hash);
