use tests::prelude::*;
use tests::prelude::assert_eq;

use arbor::{
    driver::operation::{RawSql, Transaction},
    schema::app::TypeRef,
    statement_name, Error, StatementContext,
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

/// Inserts items, refusing any named `boom`
fn guarded_insert(cx: &StatementContext<'_>) -> arbor::Result<RawSql> {
    let name = cx.get("name").unwrap_or(Value::Null);

    if name == Value::from("boom") {
        return Err(Error::invalid_statement("refusing to insert `boom`"));
    }

    Ok(RawSql::new(
        r#"INSERT INTO "item" ("name", "order", "order_key") VALUES (?1, ?2, ?3)"#,
        vec![
            name,
            cx.get("order").unwrap_or(Value::Null),
            cx.get("order_key").unwrap_or(Value::Null),
        ],
    ))
}

#[tokio::test]
async fn operations_never_demarcate_transactions() {
    let mut t = Test::new(&mut entities!(Order)).await;

    let mut saved = order("alice", &["pen", "ink"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();
    t.db.find_all::<Order>(&mut t.session).await.unwrap();
    t.db.delete(&mut t.session, &saved).await.unwrap();

    assert!(!t.log.is_empty());
    assert!(!t.log.has_transaction(Transaction::Start));
    assert!(!t.log.has_transaction(Transaction::Commit));
    assert!(!t.log.has_transaction(Transaction::Rollback));
}

#[tokio::test]
async fn rollback_discards_a_save() {
    let mut t = Test::new(&mut entities!(Order)).await;

    t.session.begin().await.unwrap();
    let mut saved = order("bob", &["cup"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();
    assert_eq!(t.db.count::<Order>(&mut t.session).await.unwrap(), 1);
    t.session.rollback().await.unwrap();

    assert_eq!(t.db.count::<Order>(&mut t.session).await.unwrap(), 0);
    assert_eq!(t.row_count("item").await, 0);
}

#[tokio::test]
async fn commit_keeps_a_save() {
    let mut t = Test::new(&mut entities!(Order)).await;

    t.session.begin().await.unwrap();
    let mut saved = order("carol", &["cup", "mug"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();
    t.session.commit().await.unwrap();

    assert_eq!(t.log.sql().first().map(String::as_str), Some("BEGIN"));
    assert_eq!(t.log.sql().last().map(String::as_str), Some("COMMIT"));

    let loaded = t
        .db
        .find_by_id::<Order>(&mut t.session, saved.id.unwrap())
        .await
        .unwrap();
    assert_eq!(loaded, Some(saved));
}

#[tokio::test]
async fn failed_save_is_undone_by_the_caller() {
    let mut builder = entities!(Order);
    builder.statement(statement_name(&TypeRef::of::<Item>(), "insert"), guarded_insert);

    let mut t = Test::new(&mut builder).await;

    let mut saved = order("dave", &["pen", "ink"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    let mut changed = saved.clone();
    changed.customer = "dave b.".to_string();
    changed.items = vec![
        Item {
            name: "pad".to_string(),
        },
        Item {
            name: "boom".to_string(),
        },
    ];

    t.session.begin().await.unwrap();
    let err = t.db.save(&mut t.session, &mut changed).await.unwrap_err();
    assert!(err.is_invalid_statement());

    // Statements already executed are not undone by the failed save
    assert_eq!(t.row_count("item").await, 1);

    t.session.rollback().await.unwrap();

    let loaded = t
        .db
        .find_by_id::<Order>(&mut t.session, saved.id.unwrap())
        .await
        .unwrap();
    assert_eq!(loaded, Some(saved));
}
