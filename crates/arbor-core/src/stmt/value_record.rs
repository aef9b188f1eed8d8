use super::Value;
use crate::{Error, Result};

use std::ops;

/// The dynamic form of an entity instance: one slot per property, in
/// declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueRecord {
    pub fields: Vec<Value>,
}

impl ValueRecord {
    pub fn from_vec(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    /// Moves the value out of the given slot, leaving `Null` behind.
    pub fn take(&mut self, index: usize) -> Value {
        std::mem::take(&mut self.fields[index])
    }

    /// Moves the value out of the given slot, failing if the record is too
    /// short. Used when decoding records produced outside of Arbor.
    pub fn take_checked(&mut self, index: usize) -> Result<Value> {
        match self.fields.get_mut(index) {
            Some(slot) => Ok(std::mem::take(slot)),
            None => Err(Error::invalid_statement(format!(
                "record has {} fields; no field at index {index}",
                self.fields.len()
            ))),
        }
    }
}

impl ops::Deref for ValueRecord {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.fields[..]
    }
}

impl ops::DerefMut for ValueRecord {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields[..]
    }
}

impl<'a> IntoIterator for &'a ValueRecord {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ValueRecord {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
