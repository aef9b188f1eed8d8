pub mod app;

pub mod db;

pub mod mapping;
pub use mapping::{MappingContext, PersistentEntity, PersistentProperty, PropertyKind};

mod naming;
pub use naming::{DefaultNamingStrategy, NamingStrategy};

mod path;
pub use path::PropertyPath;
