use super::app::{PropertyDescriptor, TypeRef};

use heck::ToSnakeCase;
use std::fmt::Debug;

/// Naming convention for tables and columns.
///
/// Every method is a pure function of its inputs. Explicit names on an entity
/// or property descriptor take precedence and never reach the strategy.
pub trait NamingStrategy: Debug + Send + Sync + 'static {
    /// Table storing instances of `ty`. Defaults to the snake-cased short
    /// type name.
    fn table_name(&self, ty: &TypeRef) -> String {
        ty.short_name().to_snake_case()
    }

    /// Column storing a scalar property. Defaults to the snake-cased
    /// property name.
    fn column_name(&self, property: &PropertyDescriptor) -> String {
        property.name.to_snake_case()
    }

    /// Column on the referenced table storing the owner's identifier.
    /// Defaults to the owner's table name.
    fn reverse_column_name(&self, owner_table: &str, _property: &PropertyDescriptor) -> String {
        owner_table.to_string()
    }

    /// Column on the referenced table storing the element's list position
    /// or map key. Defaults to the reverse column name followed by `_key`.
    fn key_column_name(&self, reverse_column: &str, _property: &PropertyDescriptor) -> String {
        format!("{reverse_column}_key")
    }
}

/// Snake-cased names with an optional table prefix.
#[derive(Debug, Default, Clone)]
pub struct DefaultNamingStrategy {
    table_prefix: Option<String>,
}

impl DefaultNamingStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_prefix(prefix: impl Into<String>) -> Self {
        Self {
            table_prefix: Some(prefix.into()),
        }
    }
}

impl NamingStrategy for DefaultNamingStrategy {
    fn table_name(&self, ty: &TypeRef) -> String {
        let name = ty.short_name().to_snake_case();

        match &self.table_prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => name,
        }
    }
}
