//! Database-level schema: the tables backing a set of aggregates

mod column;
pub use column::Column;

mod schema;
pub use schema::Schema;

mod table;
pub use table::Table;
