use tests::prelude::*;
use tests::prelude::assert_eq;

use arbor::{
    driver::operation::RawSql, schema::app::TypeRef, statement_name, SqlStatement,
    StatementContext,
};

#[derive(Debug, Clone, PartialEq, Entity)]
struct Order {
    #[id]
    id: Option<i64>,
    customer: String,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Item {
    name: String,
}

fn name(suffix: &str) -> String {
    statement_name(&TypeRef::of::<Order>(), suffix)
}

fn order(customer: &str, items: &[&str]) -> Order {
    Order {
        id: None,
        customer: customer.to_string(),
        items: items
            .iter()
            .map(|name| Item {
                name: name.to_string(),
            })
            .collect(),
    }
}

#[test]
fn names_are_qualified_by_type() {
    assert!(name("findById").ends_with("named_statements::OrderMapper.findById"));
    assert_eq!(
        statement_name(&TypeRef::of::<Item>(), "insert"),
        "named_statements::ItemMapper.insert"
    );
}

#[tokio::test]
async fn named_inserts_replace_generated_ones() {
    let mut builder = entities!(Order);
    builder
        .statement(
            name("insert"),
            SqlStatement::new(
                r#"INSERT INTO "order" ("customer") VALUES (LOWER(#{customer})) RETURNING "id""#,
            ),
        )
        .statement(
            statement_name(&TypeRef::of::<Item>(), "insert"),
            SqlStatement::new(
                r#"INSERT INTO "item" ("name", "order", "order_key") VALUES (UPPER(#{name}), #{order}, #{order_key})"#,
            ),
        );

    let mut t = Test::new(&mut builder).await;

    let mut saved = order("ALICE", &["pen", "ink"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    // The identifier comes back through the named statement's RETURNING
    assert_eq!(saved.id, Some(1));

    assert_eq!(
        t.log.statements()[1],
        (
            r#"INSERT INTO "item" ("name", "order", "order_key") VALUES (UPPER(?1), ?2, ?3)"#
                .to_string(),
            vec![Value::from("pen"), Value::I64(1), Value::I64(0)],
        )
    );

    let rows = t
        .rows(
            r#"SELECT "customer" FROM "order" UNION ALL SELECT "name" FROM "item""#,
            vec![],
        )
        .await;
    assert_eq!(
        rows,
        [
            vec![Value::from("alice")],
            vec![Value::from("PEN")],
            vec![Value::from("INK")],
        ]
    );
}

#[tokio::test]
async fn named_read_feeds_generated_child_reads() {
    let mut builder = entities!(Order);
    builder.statement(
        name("findById"),
        SqlStatement::new(
            r#"SELECT "id", UPPER("customer") AS "customer" FROM "order" WHERE "id" = #{id}"#,
        ),
    );

    let mut t = Test::new(&mut builder).await;

    let mut saved = order("bob", &["cup"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    let loaded = t
        .db
        .find_by_id::<Order>(&mut t.session, saved.id.unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(loaded.customer, "BOB");
    assert_eq!(loaded.items, saved.items);
}

fn answer(_: &StatementContext<'_>) -> arbor::Result<RawSql> {
    Ok(RawSql::new("SELECT 42", vec![]))
}

#[tokio::test]
async fn functions_are_named_statements() {
    let mut builder = entities!(Order);
    builder.statement(name("count"), answer);

    let mut t = Test::new(&mut builder).await;

    assert_eq!(t.db.count::<Order>(&mut t.session).await.unwrap(), 42);
    assert_eq!(t.log.sql(), ["SELECT 42"]);
}

#[tokio::test]
async fn named_update_reports_no_missing_row() {
    let mut builder = entities!(Order);
    builder.statement(
        name("update"),
        SqlStatement::new(r#"UPDATE "order" SET "customer" = #{customer} WHERE "id" = #{id}"#),
    );

    let mut t = Test::new(&mut builder).await;

    let mut detached = order("carol", &[]);
    detached.id = Some(99);

    t.db.save(&mut t.session, &mut detached).await.unwrap();
    assert_eq!(t.row_count("order").await, 0);
}

#[tokio::test]
async fn named_path_delete() {
    let mut builder = entities!(Order);
    // Keep the items of deleted orders around
    builder.statement(
        name("delete-items"),
        SqlStatement::new(r#"UPDATE "item" SET "order" = NULL WHERE "order" = #{id}"#),
    );

    let mut t = Test::new(&mut builder).await;

    let mut saved = order("dave", &["pen", "ink"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    t.db.delete(&mut t.session, &saved).await.unwrap();

    assert_eq!(t.row_count("order").await, 0);

    let orphans = t
        .rows(r#"SELECT COUNT(*) FROM "item" WHERE "order" IS NULL"#, vec![])
        .await;
    assert_eq!(orphans, [vec![Value::I64(2)]]);
}
