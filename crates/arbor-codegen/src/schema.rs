mod column;
pub(crate) use column::ColumnName;

mod entity;
pub(crate) use entity::Entity;

mod entity_attr;
pub(crate) use entity_attr::EntityAttr;

mod error;
pub(crate) use error::ErrorSet;

mod property;
pub(crate) use property::Property;

mod scalar_enum;
pub(crate) use scalar_enum::ScalarEnum;
