use tests::prelude::*;
use tests::prelude::assert_eq;

use arbor::{schema::PersistentEntity, DbAction, Error, Listener, ValueRecord};
use std::sync::{Arc, Mutex};

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

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Listener for Recorder {
    fn before_save(&self, entity: &PersistentEntity, actions: &mut Vec<DbAction>) -> arbor::Result<()> {
        self.push(format!("before_save {} actions={}", entity.table, actions.len()));
        Ok(())
    }

    fn after_save(&self, entity: &PersistentEntity, instance: &ValueRecord) -> arbor::Result<()> {
        self.push(format!("after_save {} id={:?}", entity.table, entity.id_value(instance)));
        Ok(())
    }

    fn before_delete(&self, entity: &PersistentEntity, id: Option<&Value>) -> arbor::Result<()> {
        self.push(format!("before_delete {} id={id:?}", entity.table));
        Ok(())
    }

    fn after_delete(&self, entity: &PersistentEntity, id: Option<&Value>) -> arbor::Result<()> {
        self.push(format!("after_delete {} id={id:?}", entity.table));
        Ok(())
    }

    fn after_load(&self, entity: &PersistentEntity, instance: &ValueRecord) -> arbor::Result<()> {
        self.push(format!("after_load {} id={:?}", entity.table, entity.id_value(instance)));
        Ok(())
    }
}

/// Refuses to save orders without items
struct RequireItems;

impl Listener for RequireItems {
    fn before_save(&self, entity: &PersistentEntity, actions: &mut Vec<DbAction>) -> arbor::Result<()> {
        if !actions.iter().any(|action| !action.path().is_root()) {
            return Err(Error::invalid_statement(format!(
                "`{}` must have at least one item",
                entity.table
            )));
        }
        Ok(())
    }
}

/// Drops every write below the aggregate root
struct RootOnly;

impl Listener for RootOnly {
    fn before_save(&self, _: &PersistentEntity, actions: &mut Vec<DbAction>) -> arbor::Result<()> {
        actions.retain(|action| action.path().is_root());
        Ok(())
    }
}

#[tokio::test]
async fn hooks_run_around_each_operation() {
    let recorder = Recorder::default();

    let mut builder = entities!(Order);
    builder.listener(recorder.clone());

    let mut t = Test::new(&mut builder).await;

    let mut saved = order("alice", &["pen", "ink"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();
    t.db.find_all::<Order>(&mut t.session).await.unwrap();
    t.db.delete(&mut t.session, &saved).await.unwrap();
    t.db.delete_all::<Order>(&mut t.session).await.unwrap();

    assert_eq!(
        recorder.events(),
        [
            "before_save order actions=3",
            "after_save order id=Some(I64(1))",
            "after_load order id=Some(I64(1))",
            "before_delete order id=Some(I64(1))",
            "after_delete order id=Some(I64(1))",
            "before_delete order id=None",
            "after_delete order id=None",
        ]
    );
}

#[tokio::test]
async fn failing_hook_aborts_before_any_write() {
    let mut builder = entities!(Order);
    builder.listener(RequireItems);

    let mut t = Test::new(&mut builder).await;

    let mut empty = order("bob", &[]);
    let err = t.db.save(&mut t.session, &mut empty).await.unwrap_err();

    assert!(err.is_invalid_statement());
    assert!(t.log.is_empty());
    assert_eq!(empty.id, None);

    let mut full = order("bob", &["cup"]);
    t.db.save(&mut t.session, &mut full).await.unwrap();
    assert_eq!(t.row_count("order").await, 1);
}

#[tokio::test]
async fn hooks_may_rewrite_the_plan() {
    let mut builder = entities!(Order);
    builder.listener(RootOnly);

    let mut t = Test::new(&mut builder).await;

    let mut saved = order("carol", &["pen", "ink"]);
    t.db.save(&mut t.session, &mut saved).await.unwrap();

    assert_eq!(
        t.log.sql(),
        [r#"INSERT INTO "order" ("customer") VALUES (?1) RETURNING "id";"#]
    );
    assert_eq!(t.row_count("item").await, 0);
}
