mod action;
pub use action::{DbAction, Plan};

mod aggregate;
pub use aggregate::{Aggregate, AggregateNode, NodeId};

mod dispatch;
pub(crate) use dispatch::Dispatcher;
pub use dispatch::statement_name;

mod exec;
pub(crate) use exec::Executor;

mod load;
pub(crate) use load::{Loader, Read};

mod planner;
pub use planner::{plan_delete, plan_delete_all, plan_save, relation_paths};
