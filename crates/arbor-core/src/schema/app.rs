//! Application-level descriptors
//!
//! Every type that takes part in an aggregate describes itself with a static
//! [`EntityDescriptor`], usually generated by `#[derive(Entity)]`. The mapping
//! layer turns descriptors into [`PersistentEntity`] metadata.
//!
//! [`PersistentEntity`]: super::PersistentEntity

mod entity;
pub use entity::{EntityDescriptor, EntityRef};

mod property;
pub use property::PropertyDescriptor;

mod ty;
pub use ty::{Type, Unmapped};

mod type_ref;
pub use type_ref::TypeRef;
