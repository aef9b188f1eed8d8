use super::{mapping::Relation, PersistentEntity, PersistentProperty};

use std::{fmt, sync::Arc};

/// A chain of relation properties starting at an aggregate root.
///
/// The empty path designates the root itself.
#[derive(Clone)]
pub struct PropertyPath {
    root: Arc<PersistentEntity>,
    steps: Vec<Step>,
}

#[derive(Clone)]
struct Step {
    owner: Arc<PersistentEntity>,
    property: usize,
}

impl PropertyPath {
    pub fn root(root: Arc<PersistentEntity>) -> Self {
        Self {
            root,
            steps: vec![],
        }
    }

    /// Extends the path through the relation property at `index` of the
    /// path's leaf entity.
    pub fn child(&self, index: usize) -> Self {
        debug_assert!(self.leaf_entity().properties[index].relation().is_some());

        let mut steps = self.steps.clone();
        steps.push(Step {
            owner: self.leaf_entity().clone(),
            property: index,
        });

        Self {
            root: self.root.clone(),
            steps,
        }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.steps.is_empty() {
            return None;
        }

        Some(Self {
            root: self.root.clone(),
            steps: self.steps[..self.steps.len() - 1].to_vec(),
        })
    }

    pub fn root_entity(&self) -> &Arc<PersistentEntity> {
        &self.root
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// The entity owning the leaf property. `None` for the root path.
    pub fn owner(&self) -> Option<&Arc<PersistentEntity>> {
        self.steps.last().map(|step| &step.owner)
    }

    pub fn leaf_property(&self) -> Option<&PersistentProperty> {
        self.steps
            .last()
            .map(|step| &step.owner.properties[step.property])
    }

    pub fn leaf_relation(&self) -> Option<&Relation> {
        self.leaf_property().and_then(|property| property.relation())
    }

    /// The entity stored at the end of the path.
    pub fn leaf_entity(&self) -> &Arc<PersistentEntity> {
        match self.leaf_relation() {
            Some(relation) => &relation.target,
            None => &self.root,
        }
    }

    /// Relations traversed from the root, outermost first.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.steps
            .iter()
            .filter_map(|step| step.owner.properties[step.property].relation())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps
            .iter()
            .map(|step| &step.owner.properties[step.property].name[..])
    }

    /// Renders the path as `items.tags`.
    pub fn dot_path(&self) -> String {
        self.segments().collect::<Vec<_>>().join(".")
    }

    /// Renders the path as `items-tags`, the form used in statement names.
    pub fn dash_path(&self) -> String {
        self.segments().collect::<Vec<_>>().join("-")
    }
}

impl PartialEq for PropertyPath {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
            && self.steps.len() == other.steps.len()
            && self
                .steps
                .iter()
                .zip(&other.steps)
                .all(|(a, b)| Arc::ptr_eq(&a.owner, &b.owner) && a.property == b.property)
    }
}

impl fmt::Debug for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "{}", self.root.ty.short_name())
        } else {
            write!(f, "{}.{}", self.root.ty.short_name(), self.dot_path())
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dot_path())
    }
}
