mod capability;
pub use capability::Capability;

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, schema::db::Schema, Result};

use std::fmt::Debug;

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which informs SQL generation.
    fn capability(&self) -> &'static Capability;

    /// Opens a new connection to the store.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single connection to the store.
///
/// Every operation is awaited before the next one is issued. The engine never
/// demarcates transactions on its own; callers send
/// [`operation::Transaction`] operations around a unit of work.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Creates the tables described by the schema.
    async fn push_schema(&mut self, schema: &Schema) -> Result<()>;

    /// Drops the tables described by the schema, then creates them again.
    async fn reset_schema(&mut self, schema: &Schema) -> Result<()>;
}
