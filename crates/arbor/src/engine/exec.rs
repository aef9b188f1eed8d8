use super::{Aggregate, DbAction, Dispatcher};
use crate::{Result, StatementContext};

use arbor_core::{
    driver::{Capability, Rows},
    schema::PersistentEntity,
    stmt::Value,
    Connection, Error,
};
use arbor_sql::generate;

/// Runs planned actions, one awaited statement at a time.
pub(crate) struct Executor<'a> {
    connection: &'a mut dyn Connection,
    dispatcher: Dispatcher<'a>,
    capability: &'static Capability,
}

impl<'a> Executor<'a> {
    pub(crate) fn new(
        connection: &'a mut dyn Connection,
        dispatcher: Dispatcher<'a>,
        capability: &'static Capability,
    ) -> Self {
        Self {
            connection,
            dispatcher,
            capability,
        }
    }

    /// Runs `actions` in order. The first failure stops execution and is
    /// returned as is; nothing already executed is undone.
    pub(crate) async fn execute(
        &mut self,
        mut aggregate: Option<&mut Aggregate>,
        actions: &[DbAction],
    ) -> Result<()> {
        for action in actions {
            self.exec_action(aggregate.as_deref_mut(), action).await?;
        }

        Ok(())
    }

    async fn exec_action(
        &mut self,
        aggregate: Option<&mut Aggregate>,
        action: &DbAction,
    ) -> Result<()> {
        let name = Dispatcher::action_name(action);

        tracing::debug!(
            action = action.name(),
            path = ?action.path(),
            statement = %name,
            "executing action"
        );

        match action {
            DbAction::Insert {
                path,
                node,
                parent,
                key,
            } => {
                let aggregate = require_aggregate(aggregate, action)?;
                let entity = path.leaf_entity();

                let mut identifiers = vec![];

                if let (Some(parent), Some(relation)) = (parent, path.leaf_relation()) {
                    let parent_id = aggregate.id_of(*parent).clone();
                    identifiers.push((relation.reverse_column.clone(), parent_id));

                    if let (Some(key), Some(relation_key)) = (key, &relation.key) {
                        identifiers.push((relation_key.column.clone(), key.clone()));
                    }
                }

                let rows = {
                    let instance = &aggregate[*node].instance;
                    let statement = self.dispatcher.resolve(name, || {
                        Ok(generate::insert(entity, instance, &identifiers).into())
                    })?;

                    let mut cx = StatementContext::new(entity.ty, entity, self.capability)
                        .instance(instance)
                        .identifiers(identifiers);

                    if let Some(id) = entity.id_value(instance).filter(|id| !id.is_null()) {
                        cx = cx.id(id.clone());
                    }

                    let op = statement.into_operation(&cx)?;
                    self.connection.exec(op).await?.rows
                };

                if entity.id.is_some() && aggregate.id_of(*node).is_null() {
                    let id = generated_id(entity, rows)?;
                    tracing::trace!(entity = entity.name(), ?id, "generated identifier");
                    aggregate.set_id(*node, id);
                }
            }
            DbAction::Update { path, node } => {
                let aggregate = require_aggregate(aggregate, action)?;
                let entity = path.root_entity();
                let instance = &aggregate[*node].instance;
                let id = aggregate.id_of(*node).clone();

                let statement = self
                    .dispatcher
                    .resolve(name, || Ok(generate::update(entity, instance)?.into()))?;
                let generated = !statement.is_named();

                let cx = StatementContext::new(entity.ty, entity, self.capability)
                    .instance(instance)
                    .id(id.clone());

                let op = statement.into_operation(&cx)?;
                let rows = self.connection.exec(op).await?.rows;

                if generated && matches!(rows, Rows::Count(0)) {
                    return Err(Error::record_not_found(format!(
                        "table={} id={id:?}",
                        entity.table
                    )));
                }
            }
            DbAction::Delete { path, id } => {
                let entity = path.root_entity();

                let statement = self
                    .dispatcher
                    .resolve(name, || Ok(generate::delete_by_id(entity, id.clone())?.into()))?;

                let cx = StatementContext::new(entity.ty, entity, self.capability).id(id.clone());

                let op = statement.into_operation(&cx)?;
                self.connection.exec(op).await?;
            }
            DbAction::DeleteAll { path, root } => {
                let entity = path.leaf_entity();

                let statement = self.dispatcher.resolve(name, || {
                    Ok(if path.is_root() {
                        generate::delete_all(entity).into()
                    } else {
                        generate::delete_by_path(path, root.as_ref())?.into()
                    })
                })?;

                let mut cx = StatementContext::new(path.root_entity().ty, entity, self.capability);

                if let Some(id) = root {
                    cx = cx.id(id.clone());
                }

                let op = statement.into_operation(&cx)?;
                self.connection.exec(op).await?;
            }
        }

        Ok(())
    }
}

fn require_aggregate<'b>(
    aggregate: Option<&'b mut Aggregate>,
    action: &DbAction,
) -> Result<&'b mut Aggregate> {
    aggregate.ok_or_else(|| {
        Error::invalid_statement(format!(
            "`{}` action at `{:?}` has no instance to write",
            action.name(),
            action.path()
        ))
    })
}

/// Reads the identifier the store generated for an insert.
fn generated_id(entity: &PersistentEntity, rows: Rows) -> Result<Value> {
    let id = match rows {
        Rows::Values(rows) => match rows.into_iter().next() {
            Some(mut row) => row.take_first()?,
            None => Value::Null,
        },
        Rows::Count(_) => Value::Null,
    };

    let id = match entity.id_ty() {
        Some(ty) => id.cast(ty)?,
        None => id,
    };

    if id.is_null() {
        return Err(Error::identifier_generation(entity.name()));
    }

    Ok(id)
}
