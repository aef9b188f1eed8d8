mod value;
pub(crate) use value::Value;

use arbor_core::{
    async_trait,
    driver::{
        operation::{Operation, RawSql},
        Capability, Driver, Response,
    },
    err,
    schema::db::{Schema, Table},
    stmt::{self, Row},
    Error, Result,
};
use arbor_sql::{self as sql, Serializer};
use rusqlite::Connection as RusqliteConnection;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a connection URL, either
    /// `sqlite::memory:` or `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(err!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database. Every connection opened on it
    /// sees its own, empty database.
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn connect(&self) -> Result<Box<dyn arbor_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl arbor_core::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let serializer = Serializer::sqlite();

        let RawSql { sql, params } = match op {
            Operation::QuerySql(op) => {
                let stmt = sql::Statement::from(op.stmt);
                let mut params = vec![];
                let sql = serializer.serialize(&stmt, &mut params);
                RawSql { sql, params }
            }
            Operation::RawSql(op) => op,
            Operation::Transaction(op) => {
                self.connection
                    .execute(&serializer.serialize_transaction(&op), [])
                    .map_err(Error::driver)?;
                return Ok(Response::count(0));
            }
        };

        tracing::trace!(%sql, params = params.len(), "sqlite exec");
        self.run(&sql, params)
    }

    async fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        for table in &schema.tables {
            self.create_table(table)?;
        }

        Ok(())
    }

    async fn reset_schema(&mut self, schema: &Schema) -> Result<()> {
        let serializer = Serializer::sqlite();

        // Child tables first
        for table in schema.tables.iter().rev() {
            let mut params: Vec<stmt::Value> = vec![];
            let drop = serializer.serialize(&sql::Statement::drop_table(&table.name), &mut params);
            self.connection
                .execute(&drop, [])
                .map_err(Error::driver)?;
        }

        for table in &schema.tables {
            self.create_table(table)?;
        }

        Ok(())
    }
}

impl Connection {
    fn create_table(&mut self, table: &Table) -> Result<()> {
        let mut params: Vec<stmt::Value> = vec![];
        let stmt = Serializer::sqlite().serialize(&sql::Statement::create_table(table), &mut params);

        if !params.is_empty() {
            return Err(Error::invalid_statement(format!(
                "`CREATE TABLE {}` must not bind parameters",
                table.name
            )));
        }

        self.connection
            .execute(&stmt, [])
            .map_err(Error::driver)?;

        Ok(())
    }

    fn run(&mut self, sql: &str, params: Vec<stmt::Value>) -> Result<Response> {
        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;

        let width = stmt.column_count();

        if width == 0 {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver)?;

            return Ok(Response::count(count as _));
        }

        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut items = Vec::with_capacity(width);

            for index in 0..width {
                items.push(Value::from_sql(row, index).map_err(Error::driver)?.into_inner());
            }

            ret.push(Row::new(columns.clone(), items));
        }

        Ok(Response::rows(ret))
    }
}
