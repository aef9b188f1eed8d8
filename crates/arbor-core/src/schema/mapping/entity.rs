use super::{PersistentProperty, Relation};
use crate::{
    schema::app::TypeRef,
    stmt::{ScalarTy, Value, ValueRecord},
};

/// Structural metadata for one entity type.
///
/// Built once per type by [`MappingContext`] and immutable afterwards.
///
/// [`MappingContext`]: super::MappingContext
#[derive(Debug)]
pub struct PersistentEntity {
    pub ty: TypeRef,

    pub table: String,

    /// Properties in declaration order
    pub properties: Vec<PersistentProperty>,

    /// Index of the identifier property
    pub id: Option<usize>,

    pub supertypes: Vec<TypeRef>,
}

impl PersistentEntity {
    /// Fully qualified name of the entity type
    pub fn name(&self) -> &'static str {
        self.ty.name
    }

    pub fn id_property(&self) -> Option<&PersistentProperty> {
        self.id.map(|index| &self.properties[index])
    }

    pub fn id_column(&self) -> Option<&str> {
        self.id_property().map(|property| &property.column[..])
    }

    pub fn id_ty(&self) -> Option<&ScalarTy> {
        self.id_property().and_then(|property| property.scalar_ty())
    }

    /// Reads the identifier out of an instance record.
    pub fn id_value<'a>(&self, record: &'a ValueRecord) -> Option<&'a Value> {
        self.id.map(|index| &record[index])
    }

    pub fn property(&self, name: &str) -> Option<&PersistentProperty> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn scalars(&self) -> impl Iterator<Item = &PersistentProperty> + '_ {
        self.properties.iter().filter(|property| property.is_scalar())
    }

    pub fn relations(&self) -> impl Iterator<Item = (&PersistentProperty, &Relation)> + '_ {
        self.properties
            .iter()
            .filter_map(|property| Some((property, property.relation()?)))
    }

    pub fn has_relations(&self) -> bool {
        self.relations().next().is_some()
    }

    /// Columns of the entity's own scalar properties, in declaration order.
    pub fn columns(&self) -> Vec<String> {
        self.scalars().map(|property| property.column.clone()).collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.scalars().any(|property| property.column == column)
    }

    /// Returns `true` if the entity is `ty` or declares `ty` as a supertype.
    pub fn is_a(&self, ty: &TypeRef) -> bool {
        self.ty == *ty || self.supertypes.contains(ty)
    }
}
