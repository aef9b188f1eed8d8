//! Persists whole aggregates to a relational store.
//!
//! An aggregate is a root entity together with every entity it reaches
//! through one-to-one and one-to-many properties. Arbor derives the table
//! layout from the entity types, turns a save of the root into an ordered
//! list of inserts, updates and deletes, and reads aggregates back by
//! fetching each level of children through its reverse column.
//!
//! ```no_run
//! use arbor::{Db, Entity};
//!
//! #[derive(Debug, Entity)]
//! struct Order {
//!     #[id]
//!     id: Option<i64>,
//!     customer: String,
//!     items: Vec<Item>,
//! }
//!
//! #[derive(Debug, Entity)]
//! struct Item {
//!     name: String,
//! }
//!
//! async fn example() -> arbor::Result<()> {
//!     let db = Db::builder().register::<Order>().connect("sqlite::memory:")?;
//!
//!     let mut session = db.session().await?;
//!     db.push_schema(&mut session).await?;
//!
//!     let mut order = Order {
//!         id: None,
//!         customer: "alice".to_string(),
//!         items: vec![Item { name: "book".to_string() }],
//!     };
//!
//!     session.begin().await?;
//!     db.save(&mut session, &mut order).await?;
//!     session.commit().await?;
//!
//!     let loaded = db.find_by_id::<Order>(&mut session, order.id).await?;
//!     assert_eq!(loaded.map(|order| order.items.len()), Some(1));
//!     Ok(())
//! }
//! ```

pub mod db;
pub use db::{Builder, Db, Session};

pub mod driver;

pub mod engine;
pub use engine::{statement_name, DbAction, Plan};

mod entity;
pub use entity::{Entity, Persistable};

mod field;
pub use field::{Bytes, Field};

mod is_new;
pub use is_new::IsNewStrategy;

mod listener;
pub use listener::Listener;

mod row_mapper;
pub use row_mapper::{map_with, Mapper, RowMapper, RowMapperRegistry};

mod statement;
pub use statement::{NamedStatement, SqlStatement, Statement, StatementContext, StatementRegistry};

pub use arbor_core::{
    schema,
    stmt::{Row, Value, ValueMap, ValueRecord},
    Error, Result,
};

pub use arbor_macros::{Entity, Enum};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Entity, Error, Field, Result};
    pub use arbor_core::{
        schema::app::{EntityDescriptor, PropertyDescriptor, Type, TypeRef},
        stmt::{EnumTy, ScalarTy, Value, ValueRecord},
    };
}
