//! Statements derived from entity metadata
//!
//! These are the statements used whenever no named statement is registered
//! for an action or a read.

use arbor_core::{
    schema::{mapping::Relation, PersistentEntity, PropertyPath},
    stmt::{Assignment, Delete, Expr, Insert, Select, Update, Value, ValueRecord},
    Error, Result,
};

/// Inserts one row for `record`.
///
/// A null identifier is left out of the column list and read back through
/// `RETURNING` so the store can generate it. `identifiers` carries the
/// reverse and key columns of a child row.
pub fn insert(
    entity: &PersistentEntity,
    record: &ValueRecord,
    identifiers: &[(String, Value)],
) -> Insert {
    let mut columns = vec![];
    let mut values = vec![];
    let mut returning = None;

    for property in entity.scalars() {
        let value = &record[property.index];

        if entity.id == Some(property.index) && value.is_null() {
            returning = Some(vec![property.column.clone()]);
            continue;
        }

        columns.push(property.column.clone());
        values.push(value.clone());
    }

    for (column, value) in identifiers {
        columns.push(column.clone());
        values.push(value.clone());
    }

    Insert {
        table: entity.table.clone(),
        columns,
        values,
        returning,
    }
}

/// Updates the scalar columns of the row identified by the record's id.
pub fn update(entity: &PersistentEntity, record: &ValueRecord) -> Result<Update> {
    let (id_column, id) = identifier(entity, record)?;

    let mut assignments = entity
        .scalars()
        .filter(|property| entity.id != Some(property.index))
        .map(|property| Assignment {
            column: property.column.clone(),
            value: record[property.index].clone(),
        })
        .collect::<Vec<_>>();

    // Entities made only of an identifier and relations still need a
    // statement that reports whether the row exists.
    if assignments.is_empty() {
        assignments.push(Assignment {
            column: id_column.to_string(),
            value: id.clone(),
        });
    }

    Ok(Update {
        table: entity.table.clone(),
        assignments,
        filter: Expr::eq(id_column, id.clone()),
    })
}

pub fn delete_by_id(entity: &PersistentEntity, id: Value) -> Result<Delete> {
    Ok(Delete {
        table: entity.table.clone(),
        filter: Some(Expr::eq(id_column(entity)?, id)),
    })
}

/// Deletes every row of the entity's table.
pub fn delete_all(entity: &PersistentEntity) -> Delete {
    Delete {
        table: entity.table.clone(),
        filter: None,
    }
}

/// Deletes the rows stored at `path`.
///
/// With a root id, only rows belonging to that aggregate are removed: the
/// filter walks back up the path through nested `IN (SELECT ...)` clauses
/// until it reaches the root's id. Without one, every row owned through the
/// path's relation is removed.
pub fn delete_by_path(path: &PropertyPath, root_id: Option<&Value>) -> Result<Delete> {
    if path.is_root() {
        return Err(Error::invalid_statement(
            "deleting by path requires at least one relation",
        ));
    }

    Ok(Delete {
        table: path.leaf_entity().table.clone(),
        filter: Some(path_filter(path, root_id)?),
    })
}

fn path_filter(path: &PropertyPath, root_id: Option<&Value>) -> Result<Expr> {
    let (Some(relation), Some(parent)) = (path.leaf_relation(), path.parent()) else {
        return Err(Error::invalid_statement("path has no relation"));
    };

    if parent.is_root() {
        return Ok(match root_id {
            Some(id) => Expr::eq(&relation.reverse_column[..], id.clone()),
            None => Expr::is_not_null(&relation.reverse_column[..]),
        });
    }

    let owner = parent.leaf_entity();
    let owners = Select::columns(&owner.table[..], vec![id_column(owner)?.to_string()])
        .filter(path_filter(&parent, root_id)?);

    Ok(Expr::in_subquery(&relation.reverse_column[..], owners))
}

pub fn select_by_id(entity: &PersistentEntity, id: Value) -> Result<Select> {
    Ok(Select::columns(&entity.table[..], entity.columns()).filter(Expr::eq(id_column(entity)?, id)))
}

/// Selects every row, in identifier order when there is an identifier.
pub fn select_all(entity: &PersistentEntity) -> Select {
    let select = Select::columns(&entity.table[..], entity.columns());

    match entity.id_column() {
        Some(column) => select.order_by(column),
        None => select,
    }
}

pub fn select_all_by_id(entity: &PersistentEntity, ids: Vec<Value>) -> Result<Select> {
    let id_column = id_column(entity)?;

    Ok(Select::columns(&entity.table[..], entity.columns())
        .filter(Expr::in_list(id_column, ids))
        .order_by(id_column))
}

/// Selects the children of one owner, ordered by key for keyed
/// collections. The key column, if any, is returned after the target's own
/// columns.
pub fn select_by_reverse(relation: &Relation, parent_id: Value) -> Select {
    let target = &relation.target;
    let mut columns = target.columns();

    let select = match &relation.key {
        Some(key) => {
            columns.push(key.column.clone());
            Select::columns(&target.table[..], columns).order_by(&key.column[..])
        }
        None => {
            let select = Select::columns(&target.table[..], columns);
            match target.id_column() {
                Some(column) => select.order_by(column),
                None => select,
            }
        }
    };

    select.filter(Expr::eq(&relation.reverse_column[..], parent_id))
}

pub fn count(entity: &PersistentEntity) -> Select {
    Select::count(&entity.table[..])
}

fn id_column(entity: &PersistentEntity) -> Result<&str> {
    entity.id_column().ok_or_else(|| {
        Error::invalid_statement(format!(
            "`{}` has no identifier property",
            entity.name()
        ))
    })
}

fn identifier<'a>(
    entity: &'a PersistentEntity,
    record: &'a ValueRecord,
) -> Result<(&'a str, &'a Value)> {
    let column = id_column(entity)?;

    match entity.id_value(record) {
        Some(id) if !id.is_null() => Ok((column, id)),
        _ => Err(Error::invalid_statement(format!(
            "`{}` has no identifier value",
            entity.name()
        ))),
    }
}
