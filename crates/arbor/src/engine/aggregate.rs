use crate::Result;

use arbor_core::{
    schema::{
        mapping::{KeyTy, RelationKey},
        PersistentEntity, PersistentProperty, PropertyKind, PropertyPath,
    },
    stmt::{Value, ValueMap, ValueRecord},
    Error,
};
use std::{fmt, ops, sync::Arc};

/// Index of a node within an [`Aggregate`]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One entity instance of an aggregate.
#[derive(Debug)]
pub struct AggregateNode {
    pub entity: Arc<PersistentEntity>,

    /// The instance's own columns. Relation slots are `Null`; their content
    /// lives in child nodes.
    pub instance: ValueRecord,

    /// Path from the aggregate root
    pub path: PropertyPath,

    /// The owning node, whose identifier the row references
    pub parent: Option<NodeId>,

    /// List position or map key within the parent's collection
    pub key: Option<Value>,

    relations: Vec<(usize, Slot)>,
}

/// Shape of a relation property, used to put the instance tree back
/// together.
#[derive(Debug)]
enum Slot {
    One(Option<NodeId>),
    Set(Vec<NodeId>),
    List(Vec<NodeId>),
    Map(Vec<(Value, NodeId)>),
}

/// An aggregate instance flattened into an arena of nodes.
///
/// Nodes are stored in pre-order: the root first, then for every relation
/// property in declaration order, each element followed by its own
/// descendants. This is the order rows must be inserted in.
#[derive(Debug)]
pub struct Aggregate {
    nodes: Vec<AggregateNode>,
}

impl Aggregate {
    pub fn new(root: &Arc<PersistentEntity>, instance: ValueRecord) -> Result<Self> {
        let mut aggregate = Self { nodes: vec![] };
        aggregate.add(PropertyPath::root(root.clone()), instance, None, None)?;
        Ok(aggregate)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AggregateNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// The identifier of a node's instance, `Null` until assigned.
    pub fn id_of(&self, node: NodeId) -> &Value {
        let node = &self[node];
        node.entity.id_value(&node.instance).unwrap_or(&Value::Null)
    }

    /// Writes an identifier into a node's instance.
    pub(crate) fn set_id(&mut self, node: NodeId, id: Value) {
        let node = &mut self.nodes[node.0];
        if let Some(index) = node.entity.id {
            node.instance[index] = id;
        }
    }

    /// Nulls zero identifiers of non-optional numeric id properties, so that
    /// inserting the node lets the store generate its identifier.
    pub(crate) fn clear_zero_ids(&mut self, include_root: bool) {
        for node in &mut self.nodes {
            if node.parent.is_none() && !include_root {
                continue;
            }

            let Some(property) = node.entity.id_property() else {
                continue;
            };

            let slot = &mut node.instance[property.index];
            if !property.ty.is_optional() && slot.is_zero() {
                *slot = Value::Null;
            }
        }
    }

    /// Rebuilds the root instance, with every assigned identifier in place.
    pub fn assemble(&self) -> ValueRecord {
        self.assemble_node(self.root())
    }

    fn assemble_node(&self, id: NodeId) -> ValueRecord {
        let node = &self[id];
        let mut record = node.instance.clone();

        for (index, slot) in &node.relations {
            let child = |id: &NodeId| Value::Record(self.assemble_node(*id));

            record[*index] = match slot {
                Slot::One(None) => Value::Null,
                Slot::One(Some(id)) => child(id),
                Slot::Set(ids) | Slot::List(ids) => Value::List(ids.iter().map(child).collect()),
                Slot::Map(entries) => Value::Map(
                    entries
                        .iter()
                        .map(|(key, id)| (key.clone(), child(id)))
                        .collect::<ValueMap>(),
                ),
            };
        }

        record
    }

    fn add(
        &mut self,
        path: PropertyPath,
        mut instance: ValueRecord,
        parent: Option<NodeId>,
        key: Option<Value>,
    ) -> Result<NodeId> {
        let entity = path.leaf_entity().clone();
        let id = NodeId(self.nodes.len());

        if instance.len() != entity.properties.len() {
            return Err(Error::invalid_statement(format!(
                "`{}` instance has {} fields; expected {}",
                entity.name(),
                instance.len(),
                entity.properties.len()
            )));
        }

        // Reserve the slot so the node precedes its descendants
        self.nodes.push(AggregateNode {
            entity: entity.clone(),
            instance: ValueRecord::default(),
            path: path.clone(),
            parent,
            key,
            relations: vec![],
        });

        let mut relations = vec![];

        for property in entity.properties.iter().filter(|p| !p.is_scalar()) {
            let value = instance.take(property.index);
            let child_path = path.child(property.index);
            let slot = self.add_relation(&child_path, property, value, id)?;
            relations.push((property.index, slot));
        }

        let node = &mut self.nodes[id.0];
        node.instance = instance;
        node.relations = relations;

        Ok(id)
    }

    fn add_relation(
        &mut self,
        path: &PropertyPath,
        property: &PersistentProperty,
        value: Value,
        parent: NodeId,
    ) -> Result<Slot> {
        Ok(match &property.kind {
            PropertyKind::Scalar { .. } => {
                return Err(Error::invalid_statement(format!(
                    "`{}` is not a relation",
                    property.name
                )))
            }
            PropertyKind::OneToOne(_) => match value {
                Value::Null => Slot::One(None),
                value => Slot::One(Some(self.add(
                    path.clone(),
                    value.into_record()?,
                    Some(parent),
                    None,
                )?)),
            },
            PropertyKind::OneToManySet(_) => {
                let mut ids = vec![];
                for item in value.into_list()? {
                    ids.push(self.add(path.clone(), item.into_record()?, Some(parent), None)?);
                }
                Slot::Set(ids)
            }
            PropertyKind::OneToManyKeyed(relation) => match &relation.key {
                Some(RelationKey {
                    ty: KeyTy::Position,
                    ..
                }) => {
                    let mut ids = vec![];
                    for (position, item) in value.into_list()?.into_iter().enumerate() {
                        let key = Value::I64(position as i64);
                        ids.push(self.add(
                            path.clone(),
                            item.into_record()?,
                            Some(parent),
                            Some(key),
                        )?);
                    }
                    Slot::List(ids)
                }
                key => {
                    // Checked against the declared type so empty maps fail too
                    if let Some(RelationKey {
                        ty: KeyTy::Explicit(declared),
                        ..
                    }) = key
                    {
                        if declared.non_optional().as_scalar().is_none() {
                            return Err(Error::unsupported_key_type(
                                path.dot_path(),
                                declared.name(),
                            ));
                        }
                    }

                    let mut entries = vec![];
                    for (key, item) in value.into_map()? {
                        if !key.is_scalar() || key.is_null() {
                            return Err(Error::unsupported_key_type(
                                path.dot_path(),
                                key.variant_name(),
                            ));
                        }

                        let id = self.add(
                            path.clone(),
                            item.into_record()?,
                            Some(parent),
                            Some(key.clone()),
                        )?;
                        entries.push((key, id));
                    }
                    Slot::Map(entries)
                }
            },
        })
    }
}

impl ops::Index<NodeId> for Aggregate {
    type Output = AggregateNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
