use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseTransaction, DbConn};

/// Where a repository runs its statements: the pool, or an open transaction.
pub trait Executor: Send + Sync {
    type Conn: ConnectionTrait;

    fn conn(&self) -> &Self::Conn;
}

impl Executor for Arc<DbConn> {
    type Conn = DbConn;

    fn conn(&self) -> &DbConn {
        self
    }
}

impl Executor for &DatabaseTransaction {
    type Conn = DatabaseTransaction;

    fn conn(&self) -> &DatabaseTransaction {
        self
    }
}
