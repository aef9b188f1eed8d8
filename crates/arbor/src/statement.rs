use crate::Result;

use arbor_core::{
    driver::{operation::RawSql, Capability, Operation},
    schema::{app::TypeRef, PersistentEntity},
    stmt::{self, Value, ValueRecord},
    Error,
};
use std::{collections::HashMap, fmt, sync::Arc};

/// The statement chosen for one action or read.
pub enum Statement {
    /// SQL derived from entity metadata
    Generated(stmt::Statement),

    /// An externally registered statement, looked up by its canonical name
    Named {
        name: String,
        statement: Arc<dyn NamedStatement>,
    },
}

impl Statement {
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named { .. })
    }

    pub(crate) fn into_operation(self, cx: &StatementContext<'_>) -> Result<Operation> {
        match self {
            Self::Generated(stmt) => Ok(stmt.into()),
            Self::Named { statement, .. } => Ok(statement.prepare(cx)?.into()),
        }
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated(stmt) => f.debug_tuple("Generated").field(stmt).finish(),
            Self::Named { name, .. } => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// A statement supplied by the application instead of generated from
/// metadata.
///
/// Registered under a canonical name, see
/// [`statement_name`](crate::engine::statement_name).
pub trait NamedStatement: Send + Sync + 'static {
    /// Renders the statement for one invocation.
    fn prepare(&self, cx: &StatementContext<'_>) -> Result<RawSql>;
}

impl<F> NamedStatement for F
where
    F: Fn(&StatementContext<'_>) -> Result<RawSql> + Send + Sync + 'static,
{
    fn prepare(&self, cx: &StatementContext<'_>) -> Result<RawSql> {
        self(cx)
    }
}

/// Values available to a named statement.
#[derive(Debug)]
pub struct StatementContext<'a> {
    /// Type the statement name was derived from
    pub domain_type: TypeRef,

    /// Entity whose rows the statement touches
    pub entity: &'a PersistentEntity,

    /// The instance being written, if any
    pub instance: Option<&'a ValueRecord>,

    /// A single identifier, or a list of them
    pub id: Option<Value>,

    /// Reverse and key columns of a child row
    pub identifiers: Vec<(String, Value)>,

    pub capability: &'static Capability,
}

impl<'a> StatementContext<'a> {
    pub(crate) fn new(
        domain_type: TypeRef,
        entity: &'a PersistentEntity,
        capability: &'static Capability,
    ) -> Self {
        Self {
            domain_type,
            entity,
            instance: None,
            id: None,
            identifiers: vec![],
            capability,
        }
    }

    pub(crate) fn instance(mut self, instance: &'a ValueRecord) -> Self {
        self.instance = Some(instance);
        self
    }

    pub(crate) fn id(mut self, id: Value) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn identifiers(mut self, identifiers: Vec<(String, Value)>) -> Self {
        self.identifiers = identifiers;
        self
    }

    /// Looks up a value by name.
    ///
    /// `id`, `domainType` and `instance` are reserved. Otherwise the name is
    /// matched against the reverse and key columns, then against the
    /// properties of the instance.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "id" => self.id.clone(),
            "domainType" => Some(Value::from(self.domain_type.name)),
            "instance" => self.instance.cloned().map(Value::Record),
            _ => {
                if let Some((_, value)) = self.identifiers.iter().find(|(column, _)| column == name) {
                    return Some(value.clone());
                }

                let instance = self.instance?;
                let property = self.entity.property(name)?;
                Some(instance[property.index].clone())
            }
        }
    }
}

/// SQL text with `#{name}` parameters, bound from the [`StatementContext`].
///
/// ```
/// # use arbor::SqlStatement;
/// let insert = SqlStatement::new("INSERT INTO item (name, \"order\") VALUES (#{name}, #{order})");
/// ```
#[derive(Debug, Clone)]
pub struct SqlStatement {
    sql: String,
}

impl SqlStatement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }
}

impl NamedStatement for SqlStatement {
    fn prepare(&self, cx: &StatementContext<'_>) -> Result<RawSql> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut params = vec![];
        let mut rest = &self.sql[..];

        while let Some(start) = rest.find("#{") {
            sql.push_str(&rest[..start]);

            let Some(len) = rest[start + 2..].find('}') else {
                return Err(Error::invalid_statement(format!(
                    "unterminated parameter in `{}`",
                    self.sql
                )));
            };

            let name = rest[start + 2..start + 2 + len].trim();
            let Some(value) = cx.get(name) else {
                return Err(Error::invalid_statement(format!(
                    "unknown parameter `{name}` in `{}`",
                    self.sql
                )));
            };

            params.push(value);

            if cx.capability.numbered_params {
                sql.push('$');
            } else {
                sql.push('?');
            }
            sql.push_str(&params.len().to_string());

            rest = &rest[start + 3 + len..];
        }

        sql.push_str(rest);

        Ok(RawSql::new(sql, params))
    }
}

/// Named statements, keyed by canonical name.
#[derive(Default, Clone)]
pub struct StatementRegistry {
    statements: HashMap<String, Arc<dyn NamedStatement>>,
}

impl StatementRegistry {
    pub fn insert(&mut self, name: impl Into<String>, statement: impl NamedStatement) {
        self.statements.insert(name.into(), Arc::new(statement));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn NamedStatement>> {
        self.statements.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.statements.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Debug for StatementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.statements.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_set().entries(names).finish()
    }
}
