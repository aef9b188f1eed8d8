use crate::{Field, Result};

use arbor_core::{
    schema::{
        app::{Type, TypeRef},
        MappingContext, PersistentEntity,
    },
    stmt::{Row, Value},
    Error,
};
use std::{fmt, sync::Arc};

/// Turns one result row into the dynamic form of a query's item type.
pub trait RowMapper: Send + Sync + 'static {
    fn map_row(&self, row: Row) -> Result<Value>;
}

impl<F> RowMapper for F
where
    F: Fn(Row) -> Result<Value> + Send + Sync + 'static,
{
    fn map_row(&self, row: Row) -> Result<Value> {
        self(row)
    }
}

/// Wraps a typed mapping function.
pub fn map_with<T: Field>(f: impl Fn(Row) -> Result<T> + Send + Sync + 'static) -> impl RowMapper {
    move |row: Row| -> Result<Value> { Ok(f(row)?.to_value()) }
}

/// How rows of a query are turned into items.
#[derive(Clone)]
pub enum Mapper {
    /// A mapper registered for the item type or one of its supertypes
    Registered(Arc<dyn RowMapper>),

    /// Loads the full aggregate described by the entity's metadata
    Entity(Arc<PersistentEntity>),
}

/// Row mappers, consulted in registration order.
#[derive(Default, Clone)]
pub struct RowMapperRegistry {
    entries: Vec<(TypeRef, Arc<dyn RowMapper>)>,
}

impl RowMapperRegistry {
    pub fn register<T: ?Sized + 'static>(&mut self, mapper: impl RowMapper) {
        self.entries.push((TypeRef::of::<T>(), Arc::new(mapper)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Picks the mapper for a query returning `ty`.
    ///
    /// Optional and collection wrappers are stripped first. Scalar items need
    /// no mapper and resolve to `None`. Otherwise the first registered entry
    /// whose type is the item type, or one of its declared supertypes, wins.
    /// Entities without a registered mapper fall back to their metadata.
    pub fn resolve(&self, mapping: &MappingContext, ty: &Type) -> Result<Option<Mapper>> {
        let element = ty.element();

        if element.as_scalar().is_some() {
            return Ok(None);
        }

        let Some(element_ty) = element.type_ref() else {
            return Err(Error::unresolved_row_mapper(element.name()));
        };

        let supertypes = element.supertypes();

        let registered = self
            .entries
            .iter()
            .find(|(ty, _)| *ty == element_ty || supertypes.contains(ty));

        if let Some((ty, mapper)) = registered {
            tracing::trace!(item = element_ty.name, mapper = ty.name, "resolved row mapper");
            return Ok(Some(Mapper::Registered(mapper.clone())));
        }

        match element {
            Type::Entity(entity) => Ok(Some(Mapper::Entity(mapping.entity_for(entity)?))),
            _ => Err(Error::unresolved_row_mapper(element.name())),
        }
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered(_) => f.write_str("Registered"),
            Self::Entity(entity) => f.debug_tuple("Entity").field(&entity.name()).finish(),
        }
    }
}

impl fmt::Debug for RowMapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(ty, _)| ty.name))
            .finish()
    }
}
