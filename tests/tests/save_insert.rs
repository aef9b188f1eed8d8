use tests::prelude::*;
use tests::prelude::assert_eq;

#[derive(Debug, Clone, PartialEq, Entity)]
struct Customer {
    #[id]
    id: Option<i64>,
    name: String,
    age: i32,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Order {
    #[id]
    id: Option<i64>,
    customer: String,
    shipping: Option<Address>,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Address {
    street: String,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Item {
    #[id]
    id: Option<i64>,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Counter {
    #[id]
    id: i64,
    hits: i64,
}

fn item(name: &str) -> Item {
    Item {
        id: None,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn scalar_only_entity_is_one_insert() {
    let mut t = Test::new(&mut entities!(Customer)).await;

    let mut customer = Customer {
        id: None,
        name: "alice".to_string(),
        age: 30,
    };
    t.db.save(&mut t.session, &mut customer).await.unwrap();

    assert_eq!(customer.id, Some(1));
    assert_eq!(
        t.log.statements(),
        [(
            r#"INSERT INTO "customer" ("name", "age") VALUES (?1, ?2) RETURNING "id";"#.to_string(),
            vec![Value::from("alice"), Value::I32(30)],
        )]
    );

    let rows = t.rows(r#"SELECT "id", "name", "age" FROM "customer""#, vec![]).await;
    assert_eq!(
        rows,
        [vec![Value::I64(1), Value::from("alice"), Value::I64(30)]]
    );
}

#[tokio::test]
async fn aggregate_is_inserted_parents_first() {
    let mut t = Test::new(&mut entities!(Order)).await;

    let mut order = Order {
        id: None,
        customer: "bob".to_string(),
        shipping: Some(Address {
            street: "Main St".to_string(),
        }),
        items: vec![item("pen"), item("ink")],
    };
    t.db.save(&mut t.session, &mut order).await.unwrap();

    assert_eq!(
        t.log.sql(),
        [
            r#"INSERT INTO "order" ("customer") VALUES (?1) RETURNING "id";"#,
            r#"INSERT INTO "address" ("street", "order") VALUES (?1, ?2);"#,
            r#"INSERT INTO "item" ("name", "order", "order_key") VALUES (?1, ?2, ?3) RETURNING "id";"#,
            r#"INSERT INTO "item" ("name", "order", "order_key") VALUES (?1, ?2, ?3) RETURNING "id";"#,
        ]
    );

    let params = t
        .log
        .statements()
        .into_iter()
        .map(|(_, params)| params)
        .collect::<Vec<_>>();
    assert_eq!(params[1], [Value::from("Main St"), Value::I64(1)]);
    assert_eq!(params[2], [Value::from("pen"), Value::I64(1), Value::I64(0)]);
    assert_eq!(params[3], [Value::from("ink"), Value::I64(1), Value::I64(1)]);

    // Generated identifiers are written back into the whole tree
    assert_eq!(order.id, Some(1));
    assert_eq!(order.items[0].id, Some(1));
    assert_eq!(order.items[1].id, Some(2));

    let rows = t
        .rows(
            r#"SELECT "name", "order", "order_key" FROM "item" ORDER BY "id""#,
            vec![],
        )
        .await;
    assert_eq!(
        rows,
        [
            vec![Value::from("pen"), Value::I64(1), Value::I64(0)],
            vec![Value::from("ink"), Value::I64(1), Value::I64(1)],
        ]
    );
}

#[tokio::test]
async fn absent_one_to_one_is_not_inserted() {
    let mut t = Test::new(&mut entities!(Order)).await;

    let mut order = Order {
        id: None,
        customer: "carol".to_string(),
        shipping: None,
        items: vec![],
    };
    t.db.save(&mut t.session, &mut order).await.unwrap();

    assert_eq!(t.log.len(), 1);
    assert_eq!(t.row_count("address").await, 0);
}

#[tokio::test]
async fn zero_identifier_is_generated() {
    let mut t = Test::new(&mut entities!(Counter)).await;

    let mut first = Counter { id: 0, hits: 3 };
    let mut second = Counter { id: 0, hits: 4 };
    t.db.save(&mut t.session, &mut first).await.unwrap();
    t.db.save(&mut t.session, &mut second).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(
        t.log.sql()[0],
        r#"INSERT INTO "counter" ("hits") VALUES (?1) RETURNING "id";"#
    );
}

#[tokio::test]
async fn explicit_insert_keeps_the_identifier() {
    let mut t = Test::new(&mut entities!(Customer)).await;

    let mut customer = Customer {
        id: Some(42),
        name: "dave".to_string(),
        age: 51,
    };
    t.db.insert(&mut t.session, &mut customer).await.unwrap();

    assert_eq!(customer.id, Some(42));
    assert_eq!(
        t.log.sql(),
        [r#"INSERT INTO "customer" ("id", "name", "age") VALUES (?1, ?2, ?3);"#]
    );
}

#[tokio::test]
async fn save_returns_plan_without_executing() {
    let t = Test::new(&mut entities!(Order)).await;

    let order = Order {
        id: None,
        customer: "erin".to_string(),
        shipping: None,
        items: vec![item("cup")],
    };

    let plan = t.db.plan_save(&order).unwrap();
    let actions = plan
        .actions
        .iter()
        .map(|action| action.name())
        .collect::<Vec<_>>();

    assert_eq!(actions, ["insert", "insert"]);
    assert!(t.log.is_empty());
}
