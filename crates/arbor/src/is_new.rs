use crate::Persistable;

use arbor_core::{schema::PersistentEntity, stmt::ValueRecord};
use std::{any::Any, fmt, sync::Arc};

type IsNewFn = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

/// Decides whether `save` inserts or updates an aggregate.
#[derive(Clone, Default)]
pub enum IsNewStrategy {
    /// New when the identifier is null, or zero for a non-optional numeric
    /// identifier. Entities without an identifier are always new.
    #[default]
    IdentifierNull,

    /// Asks the entity through [`Persistable::is_new`]
    SelfReported(IsNewFn),

    /// A user supplied predicate
    Custom(IsNewFn),
}

impl IsNewStrategy {
    pub fn self_reported<T: Persistable + 'static>() -> Self {
        Self::SelfReported(Arc::new(|instance: &dyn Any| {
            instance
                .downcast_ref::<T>()
                .map(Persistable::is_new)
                .unwrap_or(true)
        }))
    }

    pub fn custom<T: 'static>(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(move |instance: &dyn Any| {
            instance.downcast_ref::<T>().map(&f).unwrap_or(true)
        }))
    }

    pub(crate) fn is_new(
        &self,
        entity: &PersistentEntity,
        instance: &dyn Any,
        record: &ValueRecord,
    ) -> bool {
        match self {
            Self::IdentifierNull => {
                let Some(property) = entity.id_property() else {
                    return true;
                };

                let id = &record[property.index];
                id.is_null() || (!property.ty.is_optional() && id.is_zero())
            }
            Self::SelfReported(f) | Self::Custom(f) => f(instance),
        }
    }
}

impl fmt::Debug for IsNewStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentifierNull => f.write_str("IdentifierNull"),
            Self::SelfReported(_) => f.write_str("SelfReported"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}
