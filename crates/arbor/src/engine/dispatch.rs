use super::DbAction;
use crate::{Result, Statement, StatementRegistry};

use arbor_core::{schema::app::TypeRef, stmt};

/// Canonical name of a named statement, `<type>Mapper.<suffix>`.
pub fn statement_name(domain_type: &TypeRef, suffix: &str) -> String {
    format!("{}Mapper.{}", domain_type.name, suffix)
}

/// Chooses between a registered named statement and generated SQL.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dispatcher<'a> {
    statements: &'a StatementRegistry,
}

impl<'a> Dispatcher<'a> {
    pub(crate) fn new(statements: &'a StatementRegistry) -> Self {
        Self { statements }
    }

    /// Looks `name` up in the registry, generating the statement on a miss.
    pub(crate) fn resolve(
        &self,
        name: String,
        generate: impl FnOnce() -> Result<stmt::Statement>,
    ) -> Result<Statement> {
        let statement = match self.statements.get(&name) {
            Some(statement) => Statement::Named {
                name,
                statement: statement.clone(),
            },
            None => Statement::Generated(generate()?),
        };

        tracing::trace!(?statement, "resolved statement");

        Ok(statement)
    }

    /// The statement name an action is looked up under.
    pub(crate) fn action_name(action: &DbAction) -> String {
        match action {
            DbAction::Insert { path, .. } => statement_name(&path.leaf_entity().ty, "insert"),
            DbAction::Update { path, .. } => statement_name(&path.root_entity().ty, "update"),
            DbAction::Delete { path, .. } => statement_name(&path.root_entity().ty, "delete"),
            DbAction::DeleteAll { path, root } => {
                let domain_type = &path.root_entity().ty;

                if path.is_root() {
                    statement_name(domain_type, "deleteAll")
                } else if root.is_some() {
                    statement_name(domain_type, &format!("delete-{}", path.dash_path()))
                } else {
                    statement_name(domain_type, &format!("deleteAll-{}", path.dash_path()))
                }
            }
        }
    }
}
