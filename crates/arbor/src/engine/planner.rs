use super::{Aggregate, DbAction, Plan};
use crate::Result;

use arbor_core::{
    schema::{PersistentEntity, PropertyPath},
    stmt::{Value, ValueRecord},
    Error,
};
use std::sync::Arc;

/// Plans the actions that write an aggregate instance.
///
/// A new aggregate is inserted node by node, parents first. An existing one
/// is fully replaced: every relation path is cleared, deepest first, the
/// root row is updated and every present child is inserted again.
pub fn plan_save(root: &Arc<PersistentEntity>, instance: ValueRecord, is_new: bool) -> Result<Plan> {
    let mut aggregate = Aggregate::new(root, instance)?;
    let mut actions = vec![];

    aggregate.clear_zero_ids(is_new);

    if !is_new {
        let root_node = aggregate.root();
        let id = aggregate.id_of(root_node).clone();

        if id.is_null() {
            return Err(Error::invalid_statement(format!(
                "cannot update `{}` without an identifier",
                root.name()
            )));
        }

        actions.extend(delete_paths(root, Some(&id)));
        actions.push(DbAction::Update {
            path: PropertyPath::root(root.clone()),
            node: root_node,
        });
    }

    for (id, node) in aggregate.iter() {
        if !is_new && node.parent.is_none() {
            continue;
        }

        actions.push(DbAction::Insert {
            path: node.path.clone(),
            node: id,
            parent: node.parent,
            key: node.key.clone(),
        });
    }

    tracing::debug!(
        entity = root.name(),
        is_new,
        actions = actions.len(),
        "planned save"
    );

    Ok(Plan {
        aggregate: Some(aggregate),
        actions,
    })
}

/// Plans the removal of one aggregate: its children deepest first, then the
/// root row.
pub fn plan_delete(root: &Arc<PersistentEntity>, id: Value) -> Plan {
    let mut actions = delete_paths(root, Some(&id));
    actions.push(DbAction::Delete {
        path: PropertyPath::root(root.clone()),
        id,
    });

    tracing::debug!(entity = root.name(), actions = actions.len(), "planned delete");

    Plan {
        aggregate: None,
        actions,
    }
}

/// Plans the removal of every aggregate of a type.
pub fn plan_delete_all(root: &Arc<PersistentEntity>) -> Plan {
    let mut actions = delete_paths(root, None);
    actions.push(DbAction::DeleteAll {
        path: PropertyPath::root(root.clone()),
        root: None,
    });

    tracing::debug!(
        entity = root.name(),
        actions = actions.len(),
        "planned delete all"
    );

    Plan {
        aggregate: None,
        actions,
    }
}

fn delete_paths(root: &Arc<PersistentEntity>, id: Option<&Value>) -> Vec<DbAction> {
    relation_paths(root)
        .into_iter()
        .map(|path| DbAction::DeleteAll {
            path,
            root: id.cloned(),
        })
        .collect()
}

/// Every relation path reachable from `root`, deepest first. Paths of equal
/// depth keep their declaration order.
pub fn relation_paths(root: &Arc<PersistentEntity>) -> Vec<PropertyPath> {
    let mut paths = vec![];
    collect_paths(&PropertyPath::root(root.clone()), &mut paths);
    paths.sort_by_key(|path| std::cmp::Reverse(path.depth()));
    paths
}

fn collect_paths(path: &PropertyPath, paths: &mut Vec<PropertyPath>) {
    for (property, _) in path.leaf_entity().relations() {
        let child = path.child(property.index);
        paths.push(child.clone());
        collect_paths(&child, paths);
    }
}
