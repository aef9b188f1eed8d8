use super::{Db, Shared};
use crate::{
    driver::{Connect, Driver},
    Entity, IsNewStrategy, Listener, NamedStatement, Result, RowMapper, RowMapperRegistry,
    StatementRegistry,
};

use arbor_core::schema::{
    app::EntityRef, DefaultNamingStrategy, MappingContext, NamingStrategy,
};
use std::{any::TypeId, collections::HashMap, sync::Arc};

#[derive(Default)]
pub struct Builder {
    /// Aggregate roots, and any other entity, registered up front
    entities: Vec<EntityRef>,

    naming: Option<Arc<dyn NamingStrategy>>,

    table_name_prefix: Option<String>,

    statements: StatementRegistry,

    row_mappers: RowMapperRegistry,

    listeners: Vec<Arc<dyn Listener>>,

    is_new: HashMap<TypeId, IsNewStrategy>,
}

impl Builder {
    /// Registers an entity type. Its metadata, and that of every entity it
    /// reaches, is built and verified when the `Db` is built.
    pub fn register<T: Entity>(&mut self) -> &mut Self {
        self.entities.push(T::entity_ref());
        self
    }

    /// Replaces the default naming strategy. A table name prefix set with
    /// [`table_name_prefix`](Self::table_name_prefix) is then ignored.
    pub fn naming_strategy(&mut self, naming: impl NamingStrategy) -> &mut Self {
        self.naming = Some(Arc::new(naming));
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Registers a named statement, used instead of generated SQL wherever
    /// its name is looked up.
    pub fn statement(
        &mut self,
        name: impl Into<String>,
        statement: impl NamedStatement,
    ) -> &mut Self {
        self.statements.insert(name, statement);
        self
    }

    /// Registers a row mapper for `T` and every type declaring `T` as a
    /// supertype. Mappers are consulted in registration order.
    pub fn row_mapper<T: ?Sized + 'static>(&mut self, mapper: impl RowMapper) -> &mut Self {
        self.row_mappers.register::<T>(mapper);
        self
    }

    pub fn listener(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Sets how `save` tells new instances of `T` from persisted ones.
    pub fn is_new<T: Entity>(&mut self, strategy: IsNewStrategy) -> &mut Self {
        self.is_new.insert(TypeId::of::<T>(), strategy);
        self
    }

    /// Builds a `Db` for the driver selected by the URL scheme.
    pub fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?)
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let naming = match &self.naming {
            Some(naming) => naming.clone(),
            None => match &self.table_name_prefix {
                Some(prefix) => Arc::new(DefaultNamingStrategy::with_table_prefix(prefix.clone())),
                None => Arc::new(DefaultNamingStrategy::new()),
            },
        };

        let mapping = MappingContext::new(naming);

        let registered = self
            .entities
            .iter()
            .map(|entity| mapping.entity_for(entity))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            registered = registered.len(),
            entities = mapping.entities().len(),
            statements = self.statements.len(),
            row_mappers = self.row_mappers.len(),
            "built db"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                driver: Arc::new(driver),
                mapping,
                registered,
                statements: std::mem::take(&mut self.statements),
                row_mappers: std::mem::take(&mut self.row_mappers),
                listeners: std::mem::take(&mut self.listeners),
                is_new: std::mem::take(&mut self.is_new),
            }),
        })
    }
}
