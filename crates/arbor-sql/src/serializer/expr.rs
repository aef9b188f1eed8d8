use super::{Comma, Formatter, Ident, Params, ToSql};

use arbor_core::stmt::Expr;

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::Column(name) => fmt!(f, Ident(name)),
            Expr::Value(value) => fmt!(f, value),
            Expr::Eq(lhs, rhs) => fmt!(f, &**lhs, " = ", &**rhs),
            // `IN ()` is not portable
            Expr::InList(_, values) if values.is_empty() => fmt!(f, "1 = 0"),
            Expr::InList(lhs, values) => fmt!(f, &**lhs, " IN (", Comma(values), ")"),
            Expr::InSubquery(lhs, select) => fmt!(f, &**lhs, " IN (", &**select, ")"),
            Expr::IsNotNull(expr) => fmt!(f, &**expr, " IS NOT NULL"),
        }
    }
}
