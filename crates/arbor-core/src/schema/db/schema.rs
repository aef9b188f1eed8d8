use super::{Column, Table};
use crate::{
    schema::{mapping::PersistentEntity, PropertyPath},
    Error, Result,
};

use std::{any::TypeId, collections::HashSet, sync::Arc};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    /// Derives the tables needed to store the given aggregates.
    ///
    /// Each entity gets a table with one column per scalar property. A
    /// relation adds its reverse column, and key column if any, to the
    /// target's table. Tables shared by several owners carry the reverse
    /// columns of all of them.
    pub fn from_entities<'a>(
        entities: impl IntoIterator<Item = &'a Arc<PersistentEntity>>,
    ) -> Result<Schema> {
        let mut schema = Schema::default();
        let mut visited = HashSet::new();

        for entity in entities {
            schema.visit(&PropertyPath::root(entity.clone()), &mut visited)?;
        }

        Ok(schema)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    fn table_mut(&mut self, name: &str) -> &mut Table {
        let index = match self.tables.iter().position(|table| table.name == name) {
            Some(index) => index,
            None => {
                self.tables.push(Table::new(name));
                self.tables.len() - 1
            }
        };

        &mut self.tables[index]
    }

    fn visit(&mut self, path: &PropertyPath, visited: &mut HashSet<TypeId>) -> Result<()> {
        let entity = path.leaf_entity().clone();

        if !visited.insert(entity.ty.id) {
            return Ok(());
        }

        let table = self.table_mut(&entity.table);

        for property in entity.scalars() {
            let Some(ty) = property.scalar_ty() else {
                continue;
            };
            let primary_key = entity.id == Some(property.index);

            table.add_column(Column {
                name: property.column.clone(),
                ty: ty.clone(),
                nullable: property.is_nullable() && !primary_key,
                primary_key,
                auto_increment: primary_key && ty.is_integer(),
            });
        }

        for (property, relation) in entity.relations() {
            let child = path.child(property.index);
            self.visit(&child, visited)?;

            // Owners of relations always have an identifier
            let Some(id_ty) = entity.id_ty() else {
                continue;
            };

            let key = match &relation.key {
                Some(key) => match key.ty.scalar() {
                    Some(ty) => Some((key.column.clone(), ty.clone())),
                    None => {
                        return Err(Error::unsupported_key_type(
                            format!("{}.{}", entity.name(), property.name),
                            property.ty.name(),
                        ))
                    }
                },
                None => None,
            };

            let table = self.table_mut(&relation.target.table);

            table.add_column(Column {
                name: relation.reverse_column.clone(),
                ty: id_ty.clone(),
                nullable: true,
                primary_key: false,
                auto_increment: false,
            });

            if let Some((name, ty)) = key {
                table.add_column(Column {
                    name,
                    ty,
                    nullable: true,
                    primary_key: false,
                    auto_increment: false,
                });
            }
        }

        Ok(())
    }
}
