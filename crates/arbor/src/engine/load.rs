use super::{statement_name, Dispatcher};
use crate::{Result, StatementContext};

use arbor_core::{
    driver::Capability,
    schema::{
        app::TypeRef, mapping::KeyTy, PersistentEntity, PersistentProperty, PropertyKind,
        PropertyPath,
    },
    stmt::{self, Row, Value, ValueMap, ValueRecord},
    Connection, Error,
};
use arbor_sql::generate;
use async_recursion::async_recursion;
use std::sync::Arc;

/// Reads rows and rebuilds full aggregate instances from them.
///
/// Children are fetched with one query per owner and relation, through the
/// `findAllByProperty-<name>` statement of the owning type.
pub(crate) struct Loader<'a> {
    connection: &'a mut dyn Connection,
    dispatcher: Dispatcher<'a>,
    capability: &'static Capability,
}

/// A read issued on behalf of an entity.
pub(crate) struct Read<'a> {
    /// Canonical statement name
    pub(crate) name: String,

    pub(crate) domain_type: TypeRef,

    pub(crate) entity: &'a PersistentEntity,

    pub(crate) id: Option<Value>,

    pub(crate) identifiers: Vec<(String, Value)>,
}

impl<'a> Loader<'a> {
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

    /// Runs a read and returns its rows.
    pub(crate) async fn fetch(
        &mut self,
        read: Read<'_>,
        generate: impl FnOnce() -> Result<stmt::Statement> + Send,
    ) -> Result<Vec<Row>> {
        tracing::debug!(statement = %read.name, "executing read");

        let statement = self.dispatcher.resolve(read.name, generate)?;

        let mut cx = StatementContext::new(read.domain_type, read.entity, self.capability)
            .identifiers(read.identifiers);

        if let Some(id) = read.id {
            cx = cx.id(id);
        }

        let op = statement.into_operation(&cx)?;
        self.connection.exec(op).await?.rows.into_values()
    }

    /// Loads one aggregate per row.
    pub(crate) async fn load_all(
        &mut self,
        root: &Arc<PersistentEntity>,
        rows: Vec<Row>,
    ) -> Result<Vec<ValueRecord>> {
        let path = PropertyPath::root(root.clone());
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            records.push(self.load(&path, row).await?);
        }

        Ok(records)
    }

    /// Builds the instance stored at `path` from its row, then loads its
    /// relations.
    #[async_recursion]
    pub(crate) async fn load(&mut self, path: &PropertyPath, mut row: Row) -> Result<ValueRecord> {
        let entity = path.leaf_entity().clone();
        let mut record = ValueRecord::from_vec(vec![Value::Null; entity.properties.len()]);

        for property in entity.scalars() {
            if let PropertyKind::Scalar { ty, .. } = &property.kind {
                record[property.index] = row.take(&property.column)?.cast(ty)?;
            }
        }

        let id = entity
            .id_value(&record)
            .cloned()
            .unwrap_or(Value::Null);

        for (property, _) in entity.relations() {
            let child = path.child(property.index);
            record[property.index] = self.load_relation(&child, property, id.clone()).await?;
        }

        Ok(record)
    }

    #[async_recursion]
    async fn load_relation(
        &mut self,
        path: &PropertyPath,
        property: &PersistentProperty,
        parent_id: Value,
    ) -> Result<Value> {
        let (Some(owner), Some(relation)) = (path.owner(), property.relation()) else {
            return Err(Error::invalid_statement(format!(
                "`{}` is not a relation",
                property.name
            )));
        };

        let rows = if parent_id.is_null() {
            vec![]
        } else {
            let read = Read {
                name: statement_name(&owner.ty, &format!("findAllByProperty-{}", property.name)),
                domain_type: owner.ty,
                entity: &relation.target,
                id: Some(parent_id.clone()),
                identifiers: vec![(relation.reverse_column.clone(), parent_id.clone())],
            };

            self.fetch(read, || {
                Ok(generate::select_by_reverse(relation, parent_id).into())
            })
            .await?
        };

        match &property.kind {
            PropertyKind::OneToOne(_) => {
                if rows.len() > 1 {
                    return Err(Error::too_many_records(format!(
                        "{} rows for one-to-one `{}`",
                        rows.len(),
                        path.dot_path()
                    )));
                }

                match rows.into_iter().next() {
                    Some(row) => Ok(Value::Record(self.load(path, row).await?)),
                    None => Ok(Value::Null),
                }
            }
            PropertyKind::OneToManyKeyed(relation) if !property.is_list() => {
                let Some(key) = &relation.key else {
                    return Err(Error::invalid_statement(format!(
                        "keyed relation `{}` has no key column",
                        path.dot_path()
                    )));
                };

                let Some(key_ty) = key.ty.scalar() else {
                    let declared = match &key.ty {
                        KeyTy::Explicit(ty) => ty.name(),
                        KeyTy::Position => "position".to_string(),
                    };
                    return Err(Error::unsupported_key_type(path.dot_path(), declared));
                };

                let mut entries = ValueMap::with_capacity(rows.len());
                for mut row in rows {
                    let key = row.take(&key.column)?.cast(key_ty)?;
                    entries.insert(key, Value::Record(self.load(path, row).await?));
                }
                Ok(Value::Map(entries))
            }
            PropertyKind::OneToManySet(_) | PropertyKind::OneToManyKeyed(_) => {
                // Lists arrive ordered by their key column
                let mut items = Vec::with_capacity(rows.len());
                for row in rows {
                    items.push(Value::Record(self.load(path, row).await?));
                }
                Ok(Value::List(items))
            }
            PropertyKind::Scalar { .. } => Err(Error::invalid_statement(format!(
                "`{}` is not a relation",
                property.name
            ))),
        }
    }
}
