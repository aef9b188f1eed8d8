use super::PersistentEntity;
use crate::{schema::app::Type, stmt::ScalarTy};

use std::sync::Arc;

#[derive(Debug)]
pub struct PersistentProperty {
    pub name: String,

    /// Slot of the property in the entity's dynamic record
    pub index: usize,

    /// Declared type
    pub ty: Type,

    /// Column name. Only meaningful for scalar properties.
    pub column: String,

    pub kind: PropertyKind,
}

#[derive(Debug)]
pub enum PropertyKind {
    /// Stored in a single column of the owning table
    Scalar { ty: ScalarTy, nullable: bool },

    /// At most one referenced row
    OneToOne(Relation),

    /// Unordered collection of referenced rows
    OneToManySet(Relation),

    /// List or map of referenced rows. The relation always carries a key.
    OneToManyKeyed(Relation),
}

/// How an owning entity reaches the rows of another entity's table.
#[derive(Debug)]
pub struct Relation {
    pub target: Arc<PersistentEntity>,

    /// Column on the target table holding the owner's identifier
    pub reverse_column: String,

    /// Position or map key of each element, for keyed collections
    pub key: Option<RelationKey>,
}

#[derive(Debug)]
pub struct RelationKey {
    pub column: String,
    pub ty: KeyTy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyTy {
    /// Zero-based list position
    Position,

    /// Declared map key type
    Explicit(Type),
}

impl PersistentProperty {
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, PropertyKind::Scalar { .. })
    }

    pub fn scalar_ty(&self) -> Option<&ScalarTy> {
        match &self.kind {
            PropertyKind::Scalar { ty, .. } => Some(ty),
            _ => None,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.kind, PropertyKind::Scalar { nullable: true, .. })
    }

    pub fn relation(&self) -> Option<&Relation> {
        match &self.kind {
            PropertyKind::Scalar { .. } => None,
            PropertyKind::OneToOne(relation)
            | PropertyKind::OneToManySet(relation)
            | PropertyKind::OneToManyKeyed(relation) => Some(relation),
        }
    }

    pub fn is_one_to_one(&self) -> bool {
        matches!(self.kind, PropertyKind::OneToOne(_))
    }

    /// Returns `true` for list properties, whose elements are ordered by an
    /// implicit position.
    pub fn is_list(&self) -> bool {
        matches!(
            &self.kind,
            PropertyKind::OneToManyKeyed(Relation {
                key: Some(RelationKey {
                    ty: KeyTy::Position,
                    ..
                }),
                ..
            })
        )
    }
}

impl KeyTy {
    /// The scalar type written to the key column, if there is one.
    pub fn scalar(&self) -> Option<&ScalarTy> {
        match self {
            KeyTy::Position => Some(&ScalarTy::I64),
            KeyTy::Explicit(ty) => ty.non_optional().as_scalar(),
        }
    }
}
