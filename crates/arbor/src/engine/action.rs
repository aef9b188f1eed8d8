use super::{Aggregate, NodeId};

use arbor_core::{schema::PropertyPath, stmt::Value};
use std::fmt;

/// One atomic database operation produced by the planner.
#[derive(Clone)]
pub enum DbAction {
    /// Inserts the instance held by `node`. Child rows reference the
    /// identifier of `parent` once it is known, and carry `key` when the
    /// owning collection is keyed.
    Insert {
        path: PropertyPath,
        node: NodeId,
        parent: Option<NodeId>,
        key: Option<Value>,
    },

    /// Updates the aggregate root's own row.
    Update { path: PropertyPath, node: NodeId },

    /// Deletes the aggregate root's row.
    Delete { path: PropertyPath, id: Value },

    /// Deletes the rows stored at `path`, either those belonging to the
    /// aggregate rooted at `root` or, when `root` is `None`, all of them.
    DeleteAll {
        path: PropertyPath,
        root: Option<Value>,
    },
}

/// Actions for one aggregate, in execution order.
#[derive(Debug)]
pub struct Plan {
    /// The decomposed instance. Absent for deletes, which only need
    /// identifiers.
    pub aggregate: Option<Aggregate>,

    pub actions: Vec<DbAction>,
}

impl DbAction {
    pub fn path(&self) -> &PropertyPath {
        match self {
            Self::Insert { path, .. }
            | Self::Update { path, .. }
            | Self::Delete { path, .. }
            | Self::DeleteAll { path, .. } => path,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert { .. })
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }

    pub fn is_delete_all(&self) -> bool {
        matches!(self, Self::DeleteAll { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::DeleteAll { .. } => "delete_all",
        }
    }
}

impl fmt::Debug for DbAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert {
                path,
                node,
                parent,
                key,
            } => {
                let mut f = f.debug_struct("Insert");
                f.field("path", path).field("node", node);
                if let Some(parent) = parent {
                    f.field("parent", parent);
                }
                if let Some(key) = key {
                    f.field("key", key);
                }
                f.finish()
            }
            Self::Update { path, node } => f
                .debug_struct("Update")
                .field("path", path)
                .field("node", node)
                .finish(),
            Self::Delete { path, id } => f
                .debug_struct("Delete")
                .field("path", path)
                .field("id", id)
                .finish(),
            Self::DeleteAll { path, root } => f
                .debug_struct("DeleteAll")
                .field("path", path)
                .field("root", root)
                .finish(),
        }
    }
}
