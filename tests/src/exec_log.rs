use crate::logging_driver::DriverOp;

use arbor::Value;
use arbor_core::driver::{operation::Transaction, Operation, Response};
use arbor_sql::Serializer;
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log
    pub fn pop(&self) -> Option<(Operation, Response)> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            let op = ops.remove(0);
            Some((op.operation, op.response))
        }
    }

    /// Every logged operation rendered as SQLite text, with its parameters.
    /// The log is left untouched.
    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| render(&op.operation))
            .collect()
    }

    /// Like [`statements`](Self::statements), without the parameters.
    pub fn sql(&self) -> Vec<String> {
        self.statements().into_iter().map(|(sql, _)| sql).collect()
    }

    /// Number of logged statements starting with `prefix`
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.sql().iter().filter(|sql| sql.starts_with(prefix)).count()
    }

    pub fn has_transaction(&self, op: Transaction) -> bool {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .any(|logged| matches!(&logged.operation, Operation::Transaction(t) if *t == op))
    }
}

fn render(op: &Operation) -> (String, Vec<Value>) {
    let serializer = Serializer::sqlite();

    match op {
        Operation::QuerySql(op) => {
            let mut params = vec![];
            let sql = serializer.serialize(&op.stmt.clone().into(), &mut params);
            (sql, params)
        }
        Operation::RawSql(op) => (op.sql.clone(), op.params.clone()),
        Operation::Transaction(op) => (serializer.serialize_transaction(op), vec![]),
    }
}
