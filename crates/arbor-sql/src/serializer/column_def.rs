use super::{Flavor, Ident, Params, ToSql};

use crate::stmt::ColumnDef;
use arbor_core::stmt::ScalarTy;

impl ToSql for &ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);

        // Auto incrementing keys are spelled as a type of their own
        if self.auto_increment {
            let ty = match (&f.serializer.flavor, &self.ty) {
                (Flavor::Sqlite, _) => "INTEGER PRIMARY KEY",
                (Flavor::Postgresql, ScalarTy::I32) => "SERIAL PRIMARY KEY",
                (Flavor::Postgresql, _) => "BIGSERIAL PRIMARY KEY",
            };
            fmt!(f, name, " ", ty);
            return;
        }

        fmt!(f, name, " ", &self.ty);

        if self.primary_key {
            fmt!(f, " PRIMARY KEY");
        }

        if self.not_null {
            fmt!(f, " NOT NULL");
        }
    }
}
