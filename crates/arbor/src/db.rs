mod builder;
pub use builder::Builder;

mod session;
pub use session::Session;

use crate::{
    engine::{self, statement_name, Aggregate, DbAction, Dispatcher, Executor, Loader, Plan},
    Entity, Field, IsNewStrategy, Listener, Mapper, Result, RowMapperRegistry, StatementRegistry,
};

use arbor_core::{
    driver::{operation::RawSql, Capability, Driver, Rows},
    schema::{app::Type, db::Schema, MappingContext, PersistentEntity},
    stmt::{Row, Value, ValueRecord},
    Error,
};
use arbor_sql::generate;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

/// Entry point for persisting and loading aggregates.
///
/// Cheap to clone. Operations run on a [`Session`] supplied by the caller,
/// inside whatever transaction the caller has started.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

struct Shared {
    driver: Arc<dyn Driver>,
    mapping: MappingContext,
    registered: Vec<Arc<PersistentEntity>>,
    statements: StatementRegistry,
    row_mappers: RowMapperRegistry,
    listeners: Vec<Arc<dyn Listener>>,
    is_new: HashMap<TypeId, IsNewStrategy>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub fn capability(&self) -> &'static Capability {
        self.shared.driver.capability()
    }

    /// Opens a new session on the driver.
    pub async fn session(&self) -> Result<Session> {
        Ok(Session::new(self.shared.driver.connect().await?))
    }

    pub fn mapping(&self) -> &MappingContext {
        &self.shared.mapping
    }

    /// Metadata for `T`, built on first use.
    pub fn entity<T: Entity>(&self) -> Result<Arc<PersistentEntity>> {
        self.shared.mapping.entity_for(&T::entity_ref())
    }

    /// Entity types passed to [`Builder::register`]
    pub fn registered(&self) -> &[Arc<PersistentEntity>] {
        &self.shared.registered
    }

    /// Tables for every entity known to the mapping context.
    pub fn schema(&self) -> Result<Schema> {
        let mut entities = self.shared.mapping.entities();
        entities.sort_by_key(|entity| entity.name());
        Schema::from_entities(&entities)
    }

    /// Creates the tables of every registered entity and the entities they
    /// reach.
    pub async fn push_schema(&self, session: &mut Session) -> Result<()> {
        let schema = self.schema()?;
        tracing::debug!(tables = schema.tables.len(), "pushing schema");
        session.push_schema(&schema).await
    }

    /// Drops and recreates every table. All stored data is lost.
    pub async fn reset_schema(&self, session: &mut Session) -> Result<()> {
        let schema = self.schema()?;
        tracing::debug!(tables = schema.tables.len(), "resetting schema");
        session.reset_schema(&schema).await
    }

    /// Plans `save` without executing anything.
    pub fn plan_save<T: Entity>(&self, instance: &T) -> Result<Plan> {
        let entity = self.entity::<T>()?;
        let record = instance.to_record();
        let is_new = self.is_new_strategy::<T>().is_new(&entity, instance, &record);
        engine::plan_save(&entity, record, is_new)
    }

    /// Plans `delete_by_id` without executing anything.
    pub fn plan_delete<T: Entity>(&self, id: impl Into<Value>) -> Result<Plan> {
        let entity = self.entity::<T>()?;
        let id = cast_id(&entity, id.into())?;
        Ok(engine::plan_delete(&entity, id))
    }

    /// Inserts or updates an aggregate, as decided by the type's
    /// [`IsNewStrategy`]. Generated identifiers are written back into
    /// `instance`.
    pub async fn save<T: Entity>(&self, session: &mut Session, instance: &mut T) -> Result<()> {
        self.save_with(session, instance, None).await
    }

    /// Inserts an aggregate regardless of its identifier.
    pub async fn insert<T: Entity>(&self, session: &mut Session, instance: &mut T) -> Result<()> {
        self.save_with(session, instance, Some(true)).await
    }

    /// Replaces a persisted aggregate.
    pub async fn update<T: Entity>(&self, session: &mut Session, instance: &mut T) -> Result<()> {
        self.save_with(session, instance, Some(false)).await
    }

    async fn save_with<T: Entity>(
        &self,
        session: &mut Session,
        instance: &mut T,
        is_new: Option<bool>,
    ) -> Result<()> {
        let entity = self.entity::<T>()?;
        let record = instance.to_record();

        let is_new = match is_new {
            Some(is_new) => is_new,
            None => self
                .is_new_strategy::<T>()
                .is_new(&entity, &*instance as &dyn Any, &record),
        };

        let Plan {
            aggregate,
            mut actions,
        } = engine::plan_save(&entity, record, is_new)?;

        let Some(mut aggregate) = aggregate else {
            return Err(Error::invalid_statement("save planned without an aggregate"));
        };

        for listener in &self.shared.listeners {
            listener.before_save(&entity, &mut actions)?;
        }

        self.execute(session, Some(&mut aggregate), &actions).await?;

        let record = aggregate.assemble();

        for listener in &self.shared.listeners {
            listener.after_save(&entity, &record)?;
        }

        *instance = T::load_record(record)?;
        Ok(())
    }

    /// Deletes an aggregate by the identifier of `instance`.
    pub async fn delete<T: Entity>(&self, session: &mut Session, instance: &T) -> Result<()> {
        let entity = self.entity::<T>()?;
        let record = instance.to_record();

        let id = match entity.id_value(&record) {
            Some(id) if !id.is_null() => id.clone(),
            _ => {
                return Err(Error::invalid_statement(format!(
                    "cannot delete `{}` without an identifier",
                    entity.name()
                )))
            }
        };

        self.delete_aggregate(session, &entity, id).await
    }

    /// Deletes the aggregate with the given identifier. Deleting an absent
    /// aggregate is not an error.
    pub async fn delete_by_id<T: Entity>(
        &self,
        session: &mut Session,
        id: impl Into<Value>,
    ) -> Result<()> {
        let entity = self.entity::<T>()?;
        let id = cast_id(&entity, id.into())?;
        self.delete_aggregate(session, &entity, id).await
    }

    /// Deletes every aggregate of type `T`.
    pub async fn delete_all<T: Entity>(&self, session: &mut Session) -> Result<()> {
        let entity = self.entity::<T>()?;

        for listener in &self.shared.listeners {
            listener.before_delete(&entity, None)?;
        }

        let plan = engine::plan_delete_all(&entity);
        self.execute(session, None, &plan.actions).await?;

        for listener in &self.shared.listeners {
            listener.after_delete(&entity, None)?;
        }

        Ok(())
    }

    async fn delete_aggregate(
        &self,
        session: &mut Session,
        entity: &Arc<PersistentEntity>,
        id: Value,
    ) -> Result<()> {
        for listener in &self.shared.listeners {
            listener.before_delete(entity, Some(&id))?;
        }

        let plan = engine::plan_delete(entity, id.clone());
        self.execute(session, None, &plan.actions).await?;

        for listener in &self.shared.listeners {
            listener.after_delete(entity, Some(&id))?;
        }

        Ok(())
    }

    pub async fn find_by_id<T: Entity>(
        &self,
        session: &mut Session,
        id: impl Into<Value>,
    ) -> Result<Option<T>> {
        let entity = self.entity::<T>()?;
        let id = cast_id(&entity, id.into())?;

        let rows = self.find_rows_by_id(session, &entity, id).await?;

        if rows.len() > 1 {
            return Err(Error::too_many_records(format!(
                "{} rows of `{}` share one identifier",
                rows.len(),
                entity.name()
            )));
        }

        Ok(self.load_aggregates(session, &entity, rows).await?.pop())
    }

    /// Loads every aggregate of type `T`, in identifier order.
    pub async fn find_all<T: Entity>(&self, session: &mut Session) -> Result<Vec<T>> {
        let entity = self.entity::<T>()?;

        let read = self.read(&entity, "findAll", None);
        let rows = self
            .loader(session)
            .fetch(read, || Ok(generate::select_all(&entity).into()))
            .await?;

        self.load_aggregates(session, &entity, rows).await
    }

    /// Loads the aggregates with the given identifiers. Missing identifiers
    /// are skipped.
    pub async fn find_all_by_id<T: Entity, I: Into<Value>>(
        &self,
        session: &mut Session,
        ids: impl IntoIterator<Item = I>,
    ) -> Result<Vec<T>> {
        let entity = self.entity::<T>()?;
        let ids = ids
            .into_iter()
            .map(|id| cast_id(&entity, id.into()))
            .collect::<Result<Vec<_>>>()?;

        let read = self.read(&entity, "findAllById", Some(Value::List(ids.clone())));
        let rows = self
            .loader(session)
            .fetch(read, || Ok(generate::select_all_by_id(&entity, ids)?.into()))
            .await?;

        self.load_aggregates(session, &entity, rows).await
    }

    /// Number of aggregates of type `T`.
    pub async fn count<T: Entity>(&self, session: &mut Session) -> Result<u64> {
        let entity = self.entity::<T>()?;

        let read = self.read(&entity, "count", None);
        let rows = self
            .loader(session)
            .fetch(read, || Ok(generate::count(&entity).into()))
            .await?;

        let count = Rows::Values(rows).into_scalar()?;
        match count.as_i64().and_then(|count| u64::try_from(count).ok()) {
            Some(count) => Ok(count),
            None => Err(Error::type_conversion(count, "u64")),
        }
    }

    /// Returns `true` if an aggregate with the given identifier exists. Only
    /// the root row is read.
    pub async fn exists_by_id<T: Entity>(
        &self,
        session: &mut Session,
        id: impl Into<Value>,
    ) -> Result<bool> {
        let entity = self.entity::<T>()?;
        let id = cast_id(&entity, id.into())?;

        Ok(!self.find_rows_by_id(session, &entity, id).await?.is_empty())
    }

    /// Runs SQL text and reads the result as `R`.
    ///
    /// `R` may be a scalar, an entity, or a type with a registered row
    /// mapper, optionally wrapped in `Option` (zero or one row) or a
    /// collection (any number of rows). Any other `R` expects exactly one
    /// row.
    pub async fn query<R: Field>(
        &self,
        session: &mut Session,
        sql: impl Into<String>,
        params: Vec<Value>,
    ) -> Result<R> {
        let ty = R::ty();
        let mapper = self.shared.row_mappers.resolve(&self.shared.mapping, &ty)?;

        let raw = RawSql::new(sql, params);
        tracing::debug!(sql = %raw.sql, ?mapper, "executing query");

        let rows = session.exec(raw).await?.rows.into_values()?;
        let mut items = Vec::with_capacity(rows.len());

        match mapper {
            None => {
                let Some(scalar) = ty.element().as_scalar() else {
                    return Err(Error::unresolved_row_mapper(ty.name()));
                };

                for mut row in rows {
                    items.push(row.take_first()?.cast(scalar)?);
                }
            }
            Some(Mapper::Registered(mapper)) => {
                for row in rows {
                    items.push(mapper.map_row(row)?);
                }
            }
            Some(Mapper::Entity(entity)) => {
                let records = self.loader(session).load_all(&entity, rows).await?;

                for record in records {
                    self.after_load(&entity, &record)?;
                    items.push(Value::Record(record));
                }
            }
        }

        R::load(shape(&ty, items)?)
    }

    fn is_new_strategy<T: Entity>(&self) -> IsNewStrategy {
        self.shared
            .is_new
            .get(&TypeId::of::<T>())
            .cloned()
            .unwrap_or_default()
    }

    async fn execute(
        &self,
        session: &mut Session,
        aggregate: Option<&mut Aggregate>,
        actions: &[DbAction],
    ) -> Result<()> {
        Executor::new(
            session.connection(),
            Dispatcher::new(&self.shared.statements),
            self.capability(),
        )
        .execute(aggregate, actions)
        .await
    }

    fn loader<'a>(&'a self, session: &'a mut Session) -> Loader<'a> {
        Loader::new(
            session.connection(),
            Dispatcher::new(&self.shared.statements),
            self.capability(),
        )
    }

    fn read<'a>(
        &self,
        entity: &'a PersistentEntity,
        suffix: &str,
        id: Option<Value>,
    ) -> engine::Read<'a> {
        engine::Read {
            name: statement_name(&entity.ty, suffix),
            domain_type: entity.ty,
            entity,
            id,
            identifiers: vec![],
        }
    }

    async fn find_rows_by_id(
        &self,
        session: &mut Session,
        entity: &Arc<PersistentEntity>,
        id: Value,
    ) -> Result<Vec<Row>> {
        let read = self.read(entity, "findById", Some(id.clone()));

        self.loader(session)
            .fetch(read, || Ok(generate::select_by_id(entity, id)?.into()))
            .await
    }

    async fn load_aggregates<T: Entity>(
        &self,
        session: &mut Session,
        entity: &Arc<PersistentEntity>,
        rows: Vec<Row>,
    ) -> Result<Vec<T>> {
        let records = self.loader(session).load_all(entity, rows).await?;

        records
            .into_iter()
            .map(|record| {
                self.after_load(entity, &record)?;
                T::load_record(record)
            })
            .collect()
    }

    fn after_load(&self, entity: &PersistentEntity, record: &ValueRecord) -> Result<()> {
        for listener in &self.shared.listeners {
            listener.after_load(entity, record)?;
        }
        Ok(())
    }
}

/// Coerces a caller supplied identifier to the entity's identifier type.
fn cast_id(entity: &PersistentEntity, id: Value) -> Result<Value> {
    match entity.id_ty() {
        Some(ty) => id.cast(ty),
        None => Err(Error::invalid_statement(format!(
            "`{}` has no identifier property",
            entity.name()
        ))),
    }
}

/// Collects query items into the shape of the declared return type.
fn shape(ty: &Type, mut items: Vec<Value>) -> Result<Value> {
    match ty {
        Type::List(_) | Type::Set(_) => Ok(Value::List(items)),
        Type::Map(..) => Err(Error::invalid_statement(format!(
            "query results cannot be collected into `{}`",
            ty.name()
        ))),
        _ if items.len() > 1 => Err(Error::too_many_records(format!(
            "query for `{}` returned {} rows",
            ty.name(),
            items.len()
        ))),
        Type::Optional(_) => Ok(items.pop().unwrap_or(Value::Null)),
        _ => match items.pop() {
            Some(item) => Ok(item),
            None => Err(Error::record_not_found(format!(
                "query for `{}` returned no rows",
                ty.name()
            ))),
        },
    }
}
