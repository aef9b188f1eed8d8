use crate::{Field, Result};

use arbor_core::{
    schema::app::{EntityDescriptor, EntityRef, TypeRef},
    stmt::ValueRecord,
};

/// An aggregate member with static structural metadata.
///
/// Implemented by `#[derive(Entity)]`. The record produced by `to_record`
/// has one slot per property, in the order of the descriptor's properties.
pub trait Entity: Field {
    fn descriptor() -> EntityDescriptor;

    fn entity_ref() -> EntityRef {
        EntityRef {
            ty: TypeRef::of::<Self>(),
            describe: Self::descriptor,
        }
    }

    fn to_record(&self) -> ValueRecord;

    fn load_record(record: ValueRecord) -> Result<Self>;
}

/// Lets an entity report whether it has been persisted before.
///
/// Only consulted for types configured with
/// [`IsNewStrategy::self_reported`](crate::IsNewStrategy::self_reported).
pub trait Persistable {
    fn is_new(&self) -> bool;
}
