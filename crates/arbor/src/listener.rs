use crate::{DbAction, Result};

use arbor_core::{
    schema::PersistentEntity,
    stmt::{Value, ValueRecord},
};

/// Lifecycle hooks around writes and reads.
///
/// Every method has a no-op default. Hooks run on the caller's task, in
/// registration order, inside the caller's transaction; an error returned
/// from a `before_*` hook aborts the operation before anything is written.
pub trait Listener: Send + Sync + 'static {
    /// Called with the planned actions before any of them runs. Actions may
    /// be added, removed or reordered.
    fn before_save(&self, entity: &PersistentEntity, actions: &mut Vec<DbAction>) -> Result<()> {
        let _ = (entity, actions);
        Ok(())
    }

    /// Called with the saved instance, identifiers populated.
    fn after_save(&self, entity: &PersistentEntity, instance: &ValueRecord) -> Result<()> {
        let _ = (entity, instance);
        Ok(())
    }

    /// `id` is `None` when every aggregate of the type is being deleted.
    fn before_delete(&self, entity: &PersistentEntity, id: Option<&Value>) -> Result<()> {
        let _ = (entity, id);
        Ok(())
    }

    fn after_delete(&self, entity: &PersistentEntity, id: Option<&Value>) -> Result<()> {
        let _ = (entity, id);
        Ok(())
    }

    /// Called once per fully loaded aggregate root.
    fn after_load(&self, entity: &PersistentEntity, instance: &ValueRecord) -> Result<()> {
        let _ = (entity, instance);
        Ok(())
    }
}
