mod exec_log;
pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingDriver};

pub mod prelude;

use arbor::{driver::Sqlite, Builder, Db, Session, Value};
use std::sync::Once;

/// A database on a fresh in-memory SQLite store, with the schema of every
/// registered entity pushed.
pub struct Test {
    pub db: Db,

    /// The only session on the store. In-memory SQLite gives every
    /// connection its own database.
    pub session: Session,

    /// Operations issued after setup
    pub log: ExecLog,
}

impl Test {
    pub async fn new(builder: &mut Builder) -> Test {
        init_tracing();

        let driver = LoggingDriver::new(Sqlite::in_memory());
        let log = ExecLog::new(driver.ops_log_handle());

        let db = builder.build(driver).unwrap();
        let mut session = db.session().await.unwrap();
        db.push_schema(&mut session).await.unwrap();

        log.clear();

        Test { db, session, log }
    }

    /// Runs SQL straight on the session, bypassing the mapping layer. The
    /// log is cleared afterwards.
    pub async fn rows(&mut self, sql: &str, params: Vec<Value>) -> Vec<Vec<Value>> {
        let rows = self
            .session
            .exec(arbor::driver::operation::RawSql::new(sql, params))
            .await
            .unwrap()
            .rows
            .into_values()
            .unwrap();

        self.log.clear();

        rows.into_iter().map(|row| row.into_values()).collect()
    }

    /// Number of rows in `table`
    pub async fn row_count(&mut self, table: &str) -> i64 {
        let rows = self
            .rows(&format!("SELECT COUNT(*) FROM \"{table}\""), vec![])
            .await;

        rows[0][0].as_i64().unwrap()
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[macro_export]
macro_rules! entities {
    (
        $( $entity:ty ),*
    ) => {{
        let mut builder = arbor::Db::builder();
        $( builder.register::<$entity>(); )*
        builder
    }};
}
