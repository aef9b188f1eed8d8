use tests::prelude::*;
use tests::prelude::assert_eq;

#[derive(Debug, Clone, PartialEq, Entity)]
struct Order {
    #[id]
    id: Option<i64>,
    customer: String,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Item {
    #[id]
    id: Option<i64>,
    name: String,
    notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Note {
    text: String,
}

fn order(customer: &str) -> Order {
    Order {
        id: None,
        customer: customer.to_string(),
        items: vec![Item {
            id: None,
            name: "pen".to_string(),
            notes: vec![Note {
                text: "blue".to_string(),
            }],
        }],
    }
}

#[tokio::test]
async fn delete_removes_every_row_of_the_aggregate() {
    let mut t = Test::new(&mut entities!(Order)).await;

    let mut kept = order("alice");
    let mut removed = order("bob");
    t.db.save(&mut t.session, &mut kept).await.unwrap();
    t.db.save(&mut t.session, &mut removed).await.unwrap();
    t.log.clear();

    t.db.delete(&mut t.session, &removed).await.unwrap();

    assert_eq!(
        t.log.sql(),
        [
            r#"DELETE FROM "note" WHERE "item" IN (SELECT "id" FROM "item" WHERE "order" = ?1);"#,
            r#"DELETE FROM "item" WHERE "order" = ?1;"#,
            r#"DELETE FROM "order" WHERE "id" = ?1;"#,
        ]
    );

    assert_eq!(t.row_count("order").await, 1);
    assert_eq!(t.row_count("item").await, 1);
    assert_eq!(t.row_count("note").await, 1);

    let found = t
        .db
        .find_by_id::<Order>(&mut t.session, removed.id.unwrap())
        .await
        .unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn delete_by_id_of_absent_aggregate_is_ok() {
    let mut t = Test::new(&mut entities!(Order)).await;

    t.db.delete_by_id::<Order>(&mut t.session, 12).await.unwrap();
    assert_eq!(t.log.count_prefix("DELETE"), 3);
}

#[tokio::test]
async fn delete_without_identifier_fails() {
    let mut t = Test::new(&mut entities!(Order)).await;

    let err = t
        .db
        .delete(&mut t.session, &order("carol"))
        .await
        .unwrap_err();

    assert!(err.is_invalid_statement());
    assert!(t.log.is_empty());
}

#[tokio::test]
async fn delete_all_clears_every_table() {
    let mut t = Test::new(&mut entities!(Order)).await;

    for customer in ["alice", "bob", "carol"] {
        let mut order = order(customer);
        t.db.save(&mut t.session, &mut order).await.unwrap();
    }
    t.log.clear();

    t.db.delete_all::<Order>(&mut t.session).await.unwrap();

    assert_eq!(
        t.log.sql(),
        [
            r#"DELETE FROM "note" WHERE "item" IN (SELECT "id" FROM "item" WHERE "order" IS NOT NULL);"#,
            r#"DELETE FROM "item" WHERE "order" IS NOT NULL;"#,
            r#"DELETE FROM "order";"#,
        ]
    );

    for table in ["order", "item", "note"] {
        assert_eq!(t.row_count(table).await, 0, "{table}");
    }
}

#[tokio::test]
async fn plan_delete_lists_children_first() {
    let t = Test::new(&mut entities!(Order)).await;

    let plan = t.db.plan_delete::<Order>(3).unwrap();
    let paths = plan
        .actions
        .iter()
        .map(|action| format!("{} {:?}", action.name(), action.path()))
        .collect::<Vec<_>>();

    assert_eq!(
        paths,
        [
            "delete_all Order.items.notes",
            "delete_all Order.items",
            "delete Order",
        ]
    );
}
