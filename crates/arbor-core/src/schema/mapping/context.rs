use super::{KeyTy, PersistentEntity, PersistentProperty, PropertyKind, Relation, RelationKey};
use crate::{
    schema::{
        app::{EntityDescriptor, EntityRef, PropertyDescriptor, Type, TypeRef},
        DefaultNamingStrategy, NamingStrategy,
    },
    Error, Result,
};

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Builds and caches [`PersistentEntity`] metadata.
///
/// The cache is the only shared mutable state of the engine. Metadata is
/// built outside of the lock; when two callers race to build the same type,
/// the first one to insert wins and both get the same `Arc`.
#[derive(Debug)]
pub struct MappingContext {
    naming: Arc<dyn NamingStrategy>,
    entities: RwLock<HashMap<TypeId, Arc<PersistentEntity>>>,
}

impl MappingContext {
    pub fn new(naming: Arc<dyn NamingStrategy>) -> Self {
        Self {
            naming,
            entities: RwLock::new(HashMap::new()),
        }
    }

    pub fn naming(&self) -> &dyn NamingStrategy {
        &*self.naming
    }

    /// Returns the metadata for the given entity, building it on first use.
    pub fn entity_for(&self, entity: &EntityRef) -> Result<Arc<PersistentEntity>> {
        let mut stack = vec![];
        self.entity_for_inner(entity, &mut stack)
    }

    /// Returns cached metadata without building it.
    pub fn get(&self, ty: &TypeRef) -> Option<Arc<PersistentEntity>> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty.id)
            .cloned()
    }

    /// Every entity built so far, in no particular order.
    pub fn entities(&self) -> Vec<Arc<PersistentEntity>> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn entity_for_inner(
        &self,
        entity: &EntityRef,
        stack: &mut Vec<TypeRef>,
    ) -> Result<Arc<PersistentEntity>> {
        if let Some(built) = self.get(&entity.ty) {
            return Ok(built);
        }

        if let Some(pos) = stack.iter().position(|ty| *ty == entity.ty) {
            let cycle = stack[pos..]
                .iter()
                .chain(Some(&entity.ty))
                .map(|ty| ty.name)
                .collect::<Vec<_>>()
                .join(" -> ");

            return Err(Error::mapping_configuration(
                entity.ty.name,
                format!("entity is reachable from itself ({cycle}); model the back-reference as an identifier"),
            ));
        }

        stack.push(entity.ty);
        let built = self.build(entity.describe(), stack);
        stack.pop();

        let built = Arc::new(built?);

        tracing::debug!(
            entity = built.name(),
            table = %built.table,
            properties = built.properties.len(),
            "built entity metadata"
        );

        let mut entities = self
            .entities
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(entities.entry(entity.ty.id).or_insert(built).clone())
    }

    fn build(
        &self,
        descriptor: EntityDescriptor,
        stack: &mut Vec<TypeRef>,
    ) -> Result<PersistentEntity> {
        let table = match &descriptor.table {
            Some(table) => table.clone(),
            None => self.naming.table_name(&descriptor.ty),
        };

        let mut properties = Vec::with_capacity(descriptor.properties.len());
        let mut id = None;

        for (index, property) in descriptor.properties.iter().enumerate() {
            let kind = self.classify(&descriptor, &table, property, stack)?;

            if property.id {
                if let Some(prev) = id {
                    let prev: &PersistentProperty = &properties[prev];
                    return Err(Error::mapping_configuration(
                        descriptor.ty.name,
                        format!(
                            "properties `{}` and `{}` are both marked as the identifier",
                            prev.name, property.name
                        ),
                    ));
                }

                if !matches!(kind, PropertyKind::Scalar { .. }) {
                    return Err(Error::mapping_configuration(
                        descriptor.ty.name,
                        format!("identifier property `{}` must be a scalar", property.name),
                    ));
                }

                id = Some(index);
            }

            let column = match &property.column {
                Some(column) => column.clone(),
                None => self.naming.column_name(property),
            };

            properties.push(PersistentProperty {
                name: property.name.clone(),
                index,
                ty: property.ty.clone(),
                column,
                kind,
            });
        }

        let entity = PersistentEntity {
            ty: descriptor.ty,
            table,
            properties,
            id,
            supertypes: descriptor.supertypes,
        };

        verify(&entity)?;

        Ok(entity)
    }

    fn classify(
        &self,
        owner: &EntityDescriptor,
        owner_table: &str,
        property: &PropertyDescriptor,
        stack: &mut Vec<TypeRef>,
    ) -> Result<PropertyKind> {
        let unmappable = |reason: &str| {
            Error::mapping_configuration(
                owner.ty.name,
                format!(
                    "property `{}` of type `{}` cannot be mapped: {reason}",
                    property.name,
                    property.ty.name()
                ),
            )
        };

        Ok(match &property.ty {
            Type::Scalar(ty) => PropertyKind::Scalar {
                ty: ty.clone(),
                nullable: false,
            },
            Type::Optional(inner) => match &**inner {
                Type::Scalar(ty) => PropertyKind::Scalar {
                    ty: ty.clone(),
                    nullable: true,
                },
                Type::Entity(target) => {
                    PropertyKind::OneToOne(self.relation(owner_table, property, target, None, stack)?)
                }
                _ => return Err(unmappable("only scalars and entities may be optional")),
            },
            Type::Entity(target) => {
                PropertyKind::OneToOne(self.relation(owner_table, property, target, None, stack)?)
            }
            Type::Set(element) => match &**element {
                Type::Entity(target) => PropertyKind::OneToManySet(
                    self.relation(owner_table, property, target, None, stack)?,
                ),
                _ => return Err(unmappable("collections must contain entities")),
            },
            Type::List(element) => match &**element {
                Type::Entity(target) => PropertyKind::OneToManyKeyed(self.relation(
                    owner_table,
                    property,
                    target,
                    Some(KeyTy::Position),
                    stack,
                )?),
                _ => return Err(unmappable("collections must contain entities")),
            },
            Type::Map(key, value) => match &**value {
                Type::Entity(target) => PropertyKind::OneToManyKeyed(self.relation(
                    owner_table,
                    property,
                    target,
                    Some(KeyTy::Explicit((**key).clone())),
                    stack,
                )?),
                _ => return Err(unmappable("collections must contain entities")),
            },
            Type::Unmapped(_) => return Err(unmappable("the type has no entity metadata")),
        })
    }

    fn relation(
        &self,
        owner_table: &str,
        property: &PropertyDescriptor,
        target: &EntityRef,
        key: Option<KeyTy>,
        stack: &mut Vec<TypeRef>,
    ) -> Result<Relation> {
        let target = self.entity_for_inner(target, stack)?;

        let reverse_column = match &property.reverse_column {
            Some(column) => column.clone(),
            None => self.naming.reverse_column_name(owner_table, property),
        };

        let key = key.map(|ty| RelationKey {
            column: match &property.key_column {
                Some(column) => column.clone(),
                None => self.naming.key_column_name(&reverse_column, property),
            },
            ty,
        });

        Ok(Relation {
            target,
            reverse_column,
            key,
        })
    }
}

impl Default for MappingContext {
    fn default() -> Self {
        Self::new(Arc::new(DefaultNamingStrategy::default()))
    }
}

fn verify(entity: &PersistentEntity) -> Result<()> {
    let relations = entity.relations().collect::<Vec<_>>();

    if !relations.is_empty() && entity.id.is_none() {
        return Err(Error::mapping_configuration(
            entity.name(),
            format!(
                "entity owns relation `{}` but declares no identifier property",
                relations[0].0.name
            ),
        ));
    }

    for (i, (property, relation)) in relations.iter().enumerate() {
        for (other, other_relation) in &relations[i + 1..] {
            if relation.target.ty == other_relation.target.ty
                && relation.reverse_column == other_relation.reverse_column
            {
                return Err(Error::mapping_configuration(
                    entity.name(),
                    format!(
                        "properties `{}` and `{}` both reference `{}` through reverse column `{}`",
                        property.name,
                        other.name,
                        relation.target.name(),
                        relation.reverse_column
                    ),
                ));
            }
        }

        let target = &relation.target;

        if target.has_column(&relation.reverse_column) {
            return Err(Error::mapping_configuration(
                entity.name(),
                format!(
                    "reverse column `{}` of property `{}` collides with a column of `{}`",
                    relation.reverse_column,
                    property.name,
                    target.name()
                ),
            ));
        }

        if let Some(key) = &relation.key {
            if target.has_column(&key.column) || key.column == relation.reverse_column {
                return Err(Error::mapping_configuration(
                    entity.name(),
                    format!(
                        "key column `{}` of property `{}` collides with a column of `{}`",
                        key.column,
                        property.name,
                        target.name()
                    ),
                ));
            }
        }
    }

    Ok(())
}
