//! Structural metadata derived from entity descriptors

mod context;
pub use context::MappingContext;

mod entity;
pub use entity::PersistentEntity;

mod property;
pub use property::{KeyTy, PersistentProperty, PropertyKind, Relation, RelationKey};
