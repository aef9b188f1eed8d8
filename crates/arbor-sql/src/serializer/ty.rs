use super::{Flavor, Formatter, Params, ToSql};

use arbor_core::stmt::ScalarTy;

impl ToSql for &ScalarTy {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let ty = match f.serializer.flavor {
            Flavor::Sqlite => match self {
                ScalarTy::Bool => "BOOLEAN",
                ScalarTy::I32 | ScalarTy::I64 => "INTEGER",
                ScalarTy::F64 => "REAL",
                ScalarTy::Bytes => "BLOB",
                ScalarTy::String
                | ScalarTy::Uuid
                | ScalarTy::Date
                | ScalarTy::DateTime
                | ScalarTy::Enum(_) => "TEXT",
            },
            Flavor::Postgresql => match self {
                ScalarTy::Bool => "BOOLEAN",
                ScalarTy::I32 => "INTEGER",
                ScalarTy::I64 => "BIGINT",
                ScalarTy::F64 => "DOUBLE PRECISION",
                ScalarTy::String | ScalarTy::Enum(_) => "TEXT",
                ScalarTy::Bytes => "BYTEA",
                ScalarTy::Uuid => "UUID",
                ScalarTy::Date => "DATE",
                ScalarTy::DateTime => "TIMESTAMP",
            },
        };

        fmt!(f, ty);
    }
}
