use super::{EntityRef, TypeRef};
use crate::stmt::ScalarTy;

/// The declared type of a property, or of a query's return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Scalar(ScalarTy),

    /// `Option<T>`
    Optional(Box<Type>),

    /// An ordered collection, `Vec<T>`
    List(Box<Type>),

    /// An unordered collection, `HashSet<T>` or `BTreeSet<T>`
    Set(Box<Type>),

    /// A keyed collection, `HashMap<K, V>`, `BTreeMap<K, V>` or `IndexMap<K, V>`
    Map(Box<Type>, Box<Type>),

    /// A type with its own entity descriptor
    Entity(EntityRef),

    /// A type without entity metadata. It cannot be persisted, but query
    /// results can be read into it through a registered row mapper.
    Unmapped(Unmapped),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unmapped {
    pub ty: TypeRef,
    pub supertypes: Vec<TypeRef>,
}

impl Type {
    pub fn optional(ty: Type) -> Self {
        Self::Optional(Box::new(ty))
    }

    pub fn list(ty: Type) -> Self {
        Self::List(Box::new(ty))
    }

    pub fn set(ty: Type) -> Self {
        Self::Set(Box::new(ty))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn unmapped(ty: TypeRef) -> Self {
        Self::Unmapped(Unmapped {
            ty,
            supertypes: vec![],
        })
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    pub fn as_scalar(&self) -> Option<&ScalarTy> {
        match self {
            Self::Scalar(ty) => Some(ty),
            _ => None,
        }
    }

    /// Strips `Option` wrappers.
    pub fn non_optional(&self) -> &Type {
        match self {
            Self::Optional(ty) => ty.non_optional(),
            ty => ty,
        }
    }

    /// Strips every optional and collection wrapper, yielding the type of
    /// the individual items a query returns.
    pub fn element(&self) -> &Type {
        match self {
            Self::Optional(ty) | Self::List(ty) | Self::Set(ty) | Self::Map(_, ty) => ty.element(),
            ty => ty,
        }
    }

    /// The Rust type behind an entity or unmapped type.
    pub fn type_ref(&self) -> Option<TypeRef> {
        match self {
            Self::Entity(entity) => Some(entity.ty),
            Self::Unmapped(unmapped) => Some(unmapped.ty),
            _ => None,
        }
    }

    /// Declared supertypes of an entity or unmapped type.
    pub fn supertypes(&self) -> Vec<TypeRef> {
        match self {
            Self::Entity(entity) => entity.describe().supertypes,
            Self::Unmapped(unmapped) => unmapped.supertypes.clone(),
            _ => vec![],
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Scalar(ty) => ty.name().to_string(),
            Self::Optional(ty) => format!("Option<{}>", ty.name()),
            Self::List(ty) => format!("List<{}>", ty.name()),
            Self::Set(ty) => format!("Set<{}>", ty.name()),
            Self::Map(key, value) => format!("Map<{}, {}>", key.name(), value.name()),
            Self::Entity(entity) => entity.ty.name.to_string(),
            Self::Unmapped(unmapped) => unmapped.ty.name.to_string(),
        }
    }
}
