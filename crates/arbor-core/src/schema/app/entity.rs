use super::{PropertyDescriptor, TypeRef};

use std::fmt;

/// A lazily described entity type.
///
/// Relations refer to their target through an `EntityRef` rather than the
/// target's descriptor, so descriptors of mutually reachable types can be
/// built without recursing forever. The mapping layer is the one that
/// detects the cycle and rejects it.
#[derive(Clone, Copy)]
pub struct EntityRef {
    pub ty: TypeRef,
    pub describe: fn() -> EntityDescriptor,
}

/// Static description of an entity type.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub ty: TypeRef,

    /// Explicit table name, overriding the naming strategy
    pub table: Option<String>,

    /// Properties, in declaration order. The order defines the slot of each
    /// property in the entity's dynamic record.
    pub properties: Vec<PropertyDescriptor>,

    /// Types this entity can be used as when resolving row mappers
    pub supertypes: Vec<TypeRef>,
}

impl EntityRef {
    pub fn describe(&self) -> EntityDescriptor {
        (self.describe)()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.ty).finish()
    }
}

impl EntityDescriptor {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            table: None,
            properties: vec![],
            supertypes: vec![],
        }
    }

    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn supertype(mut self, ty: TypeRef) -> Self {
        self.supertypes.push(ty);
        self
    }
}
