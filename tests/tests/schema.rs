use tests::prelude::*;
use tests::prelude::assert_eq;

use arbor::{
    driver::{operation::RawSql, Sqlite},
    schema::{app::TypeRef, NamingStrategy},
    Builder, Bytes, IsNewStrategy, Persistable,
};

#[derive(Debug, Clone, Copy, PartialEq, Enum)]
enum Status {
    Open,
    #[column("done")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Entity)]
#[table = "purchases"]
struct Purchase {
    #[id]
    id: Option<i64>,
    #[column("buyer_name")]
    buyer: String,
    status: Status,
    paid: bool,
    total: f64,
    note: Option<String>,
    receipt: Bytes,
    #[reverse_column("purchase_ref")]
    #[key_column("position")]
    lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Line {
    sku: String,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Order {
    #[id]
    id: Option<i64>,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Item {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Tagged {
    #[id]
    id: Option<i64>,
    tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Node {
    #[id]
    id: Option<i64>,
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Entity)]
struct Ticket {
    #[id]
    code: String,
    title: String,
    revision: i64,
}

impl Persistable for Ticket {
    fn is_new(&self) -> bool {
        self.revision == 0
    }
}

/// Pluralized table names
#[derive(Debug)]
struct Plural;

impl NamingStrategy for Plural {
    fn table_name(&self, ty: &TypeRef) -> String {
        format!("{}s", ty.short_name().to_lowercase())
    }
}

fn purchase() -> Purchase {
    Purchase {
        id: None,
        buyer: "alice".to_string(),
        status: Status::Closed,
        paid: true,
        total: 12.5,
        note: None,
        receipt: Bytes(vec![1, 2, 3]),
        lines: vec![
            Line {
                sku: "A-1".to_string(),
            },
            Line {
                sku: "B-2".to_string(),
            },
        ],
    }
}

fn ticket(revision: i64) -> Ticket {
    Ticket {
        code: "T-1".to_string(),
        title: format!("rev {revision}"),
        revision,
    }
}

#[tokio::test]
async fn pushed_tables_follow_the_mapping() {
    let mut t = Test::new(&mut entities!(Purchase)).await;

    let columns = t
        .rows(
            r#"SELECT "name", "type", "notnull", "pk" FROM pragma_table_info('purchases') ORDER BY "cid""#,
            vec![],
        )
        .await;

    let expected = [
        ("id", "INTEGER", 0, 1),
        ("buyer_name", "TEXT", 1, 0),
        ("status", "TEXT", 1, 0),
        ("paid", "BOOLEAN", 1, 0),
        ("total", "REAL", 1, 0),
        ("note", "TEXT", 0, 0),
        ("receipt", "BLOB", 1, 0),
    ]
    .into_iter()
    .map(|(name, ty, not_null, pk)| {
        vec![
            Value::from(name),
            Value::from(ty),
            Value::I64(not_null),
            Value::I64(pk),
        ]
    })
    .collect::<Vec<_>>();

    assert_eq!(columns, expected);

    let columns = t
        .rows(
            r#"SELECT "name" FROM pragma_table_info('line') ORDER BY "cid""#,
            vec![],
        )
        .await;
    assert_eq!(
        columns,
        [
            vec![Value::from("sku")],
            vec![Value::from("purchase_ref")],
            vec![Value::from("position")],
        ]
    );
}

#[tokio::test]
async fn scalar_types_round_trip() {
    let mut t = Test::new(&mut entities!(Purchase)).await;

    let mut saved = purchase();
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    let stored = t
        .rows(
            r#"SELECT "buyer_name", "status", "paid", "total", "note", "receipt" FROM "purchases""#,
            vec![],
        )
        .await;
    assert_eq!(
        stored,
        [vec![
            Value::from("alice"),
            Value::from("done"),
            Value::I64(1),
            Value::F64(12.5),
            Value::Null,
            Value::Bytes(vec![1, 2, 3]),
        ]]
    );

    let loaded = t
        .db
        .find_by_id::<Purchase>(&mut t.session, saved.id.unwrap())
        .await
        .unwrap();
    assert_eq!(loaded, Some(saved));
}

#[tokio::test]
async fn unknown_enum_variant_fails_to_load() {
    let mut t = Test::new(&mut entities!(Purchase)).await;

    let mut saved = purchase();
    t.db.save(&mut t.session, &mut saved).await.unwrap();
    t.session
        .exec(RawSql::new(r#"UPDATE "purchases" SET "status" = 'lost'"#, vec![]))
        .await
        .unwrap();

    let err = t
        .db
        .find_by_id::<Purchase>(&mut t.session, saved.id.unwrap())
        .await
        .unwrap_err();
    assert!(err.is_type_conversion());
}

#[tokio::test]
async fn reset_schema_drops_all_rows() {
    let mut t = Test::new(&mut entities!(Purchase)).await;

    let mut saved = purchase();
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    t.db.reset_schema(&mut t.session).await.unwrap();

    assert_eq!(t.row_count("purchases").await, 0);
    assert_eq!(t.row_count("line").await, 0);
}

#[tokio::test]
async fn table_name_prefix() {
    let mut builder = entities!(Order, Purchase);
    builder.table_name_prefix("app_");

    let t = Test::new(&mut builder).await;
    let schema = t.db.schema().unwrap();

    let mut tables = schema
        .tables
        .iter()
        .map(|table| table.name.as_str())
        .collect::<Vec<_>>();
    tables.sort();

    // Explicit table names are left alone
    assert_eq!(tables, ["app_item", "app_line", "app_order", "purchases"]);

    let item = schema.table("app_item").unwrap();
    assert!(item.column("app_order").is_some());
    assert!(item.column("app_order_key").is_some());
}

#[tokio::test]
async fn custom_naming_strategy() {
    let mut builder = entities!(Order);
    builder.naming_strategy(Plural);

    let mut t = Test::new(&mut builder).await;

    let mut saved = Order {
        id: None,
        items: vec![Item {
            name: "pen".to_string(),
        }],
    };
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    assert_eq!(
        t.log.sql(),
        [
            r#"INSERT INTO "orders" DEFAULT VALUES RETURNING "id";"#,
            r#"INSERT INTO "items" ("name", "orders", "orders_key") VALUES (?1, ?2, ?3);"#,
        ]
    );
}

fn mapping_error(builder: &mut Builder) -> arbor::Error {
    match builder.build(Sqlite::in_memory()) {
        Ok(_) => panic!("expected a mapping error"),
        Err(err) => err,
    }
}

#[test]
fn collections_of_scalars_are_rejected() {
    let err = mapping_error(&mut entities!(Tagged));
    assert!(err.is_mapping_configuration(), "{err}");
}

#[test]
fn cycles_are_rejected() {
    let err = mapping_error(&mut entities!(Node));
    assert!(err.is_mapping_configuration(), "{err}");
}

#[tokio::test]
async fn natural_keys_need_an_is_new_strategy() {
    let mut t = Test::new(&mut entities!(Ticket)).await;

    // A set identifier makes the default strategy update
    let err = t
        .db
        .save(&mut t.session, &mut ticket(0))
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn self_reported_is_new() {
    let mut builder = entities!(Ticket);
    builder.is_new::<Ticket>(IsNewStrategy::self_reported::<Ticket>());

    let mut t = Test::new(&mut builder).await;

    t.db.save(&mut t.session, &mut ticket(0)).await.unwrap();
    t.db.save(&mut t.session, &mut ticket(1)).await.unwrap();

    assert_eq!(
        t.log.sql(),
        [
            r#"INSERT INTO "ticket" ("code", "title", "revision") VALUES (?1, ?2, ?3);"#,
            r#"UPDATE "ticket" SET "title" = ?1, "revision" = ?2 WHERE "code" = ?3;"#,
        ]
    );

    let loaded = t.db.find_by_id::<Ticket>(&mut t.session, "T-1").await.unwrap();
    assert_eq!(loaded, Some(ticket(1)));
}

#[tokio::test]
async fn custom_is_new() {
    let mut builder = entities!(Ticket);
    builder.is_new::<Ticket>(IsNewStrategy::custom(|ticket: &Ticket| {
        ticket.title.starts_with("new")
    }));

    let mut t = Test::new(&mut builder).await;

    let mut fresh = Ticket {
        code: "T-9".to_string(),
        title: "new ticket".to_string(),
        revision: 4,
    };
    t.db.save(&mut t.session, &mut fresh).await.unwrap();

    assert_eq!(t.log.count_prefix("INSERT"), 1);
    assert!(t.db.exists_by_id::<Ticket>(&mut t.session, "T-9").await.unwrap());
}

#[tokio::test]
async fn connect_by_url() {
    let db = Db::builder()
        .register::<Order>()
        .connect("sqlite::memory:")
        .unwrap();

    let mut session = db.session().await.unwrap();
    db.push_schema(&mut session).await.unwrap();

    let mut saved = Order {
        id: None,
        items: vec![],
    };
    db.save(&mut session, &mut saved).await.unwrap();
    assert_eq!(db.count::<Order>(&mut session).await.unwrap(), 1);

    let Err(err) = Db::builder().connect("mysql://localhost/app") else {
        panic!("mysql is not supported");
    };
    assert!(err.to_string().contains("unsupported database"));
}
