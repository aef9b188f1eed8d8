use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = Ident(&self.name);

        fmt!(f, "CREATE TABLE IF NOT EXISTS ", name, " (");

        for (index, column) in self.columns.iter().enumerate() {
            fmt!(f, "\n    ", column);
            if index < self.columns.len() - 1 {
                fmt!(f, ",");
            }
        }

        fmt!(f, "\n)");
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DROP TABLE IF EXISTS ", Ident(&self.name));
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE FROM ", Ident(&self.table));

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        if self.columns.is_empty() {
            fmt!(f, "INSERT INTO ", table, " DEFAULT VALUES");
        } else {
            let columns = Comma(self.columns.iter().map(Ident));
            let values = Comma(&self.values);

            fmt!(f, "INSERT INTO ", table, " (", columns, ") VALUES (", values, ")");
        }

        if let Some(returning) = &self.returning {
            fmt!(f, " RETURNING ", Comma(returning.iter().map(Ident)));
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT ");

        match &self.returning {
            stmt::Returning::Columns(columns) => fmt!(f, Comma(columns.iter().map(Ident))),
            stmt::Returning::Count => fmt!(f, "COUNT(*)"),
        }

        fmt!(f, " FROM ", Ident(&self.table));

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }

        if let Some(column) = &self.order_by {
            fmt!(f, " ORDER BY ", Ident(column));
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = Comma(&self.assignments);

        fmt!(f, "UPDATE ", Ident(&self.table), " SET ", assignments, " WHERE ", &self.filter);
    }
}

impl ToSql for &stmt::Assignment {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.column), " = ", &self.value);
    }
}
