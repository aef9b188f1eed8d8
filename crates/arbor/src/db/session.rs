use crate::Result;

use arbor_core::{
    driver::{operation::Transaction, Operation, Response},
    schema::db::Schema,
    Connection,
};

/// A connection held by the caller.
///
/// Every `Db` operation runs on a session the caller passes in. Arbor never
/// starts, commits or rolls back a transaction on its own; use
/// [`begin`](Self::begin), [`commit`](Self::commit) and
/// [`rollback`](Self::rollback) to demarcate a unit of work.
#[derive(Debug)]
pub struct Session {
    connection: Box<dyn Connection>,
}

impl Session {
    pub fn new(connection: Box<dyn Connection>) -> Self {
        Self { connection }
    }

    pub async fn begin(&mut self) -> Result<()> {
        self.transaction(Transaction::Start).await
    }

    pub async fn commit(&mut self) -> Result<()> {
        self.transaction(Transaction::Commit).await
    }

    pub async fn rollback(&mut self) -> Result<()> {
        self.transaction(Transaction::Rollback).await
    }

    /// Sends an operation straight to the driver.
    pub async fn exec(&mut self, op: impl Into<Operation>) -> Result<Response> {
        self.connection.exec(op.into()).await
    }

    pub(crate) async fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        self.connection.push_schema(schema).await
    }

    pub(crate) async fn reset_schema(&mut self, schema: &Schema) -> Result<()> {
        self.connection.reset_schema(schema).await
    }

    pub(crate) fn connection(&mut self) -> &mut dyn Connection {
        &mut *self.connection
    }

    async fn transaction(&mut self, op: Transaction) -> Result<()> {
        tracing::debug!(?op, "transaction");
        self.connection.exec(op.into()).await?;
        Ok(())
    }
}
