//! Common imports for test files
//!
//! `use tests::prelude::*;`

pub use crate::{entities, ExecLog, Test};
pub use arbor::{Db, Entity, Enum, Field, Value};
pub use pretty_assertions::assert_eq;
