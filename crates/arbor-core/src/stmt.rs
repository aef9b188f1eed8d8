mod delete;
pub use delete::Delete;

mod expr;
pub use expr::Expr;

mod insert;
pub use insert::Insert;

mod row;
pub use row::Row;

mod select;
pub use select::{Returning, Select};

mod statement;
pub use statement::Statement;

mod ty;
pub use ty::{EnumTy, ScalarTy};

mod update;
pub use update::{Assignment, Update};

mod value;
pub use value::{format_date, format_date_time, Value};

mod value_map;
pub use value_map::ValueMap;

mod value_record;
pub use value_record::ValueRecord;
