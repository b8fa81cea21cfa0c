//! Unit of work over SeaORM transactions.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, DbConn, TransactionTrait};

use quill_core::error::RepoError;
use quill_core::ports::{BlogRepository, ReplyRepository, Transaction, UnitOfWork};

use super::sea_base::map_db_err;
use super::sea_repo::{SeaBlogRepository, SeaReplyRepository};

/// Opens database transactions on the pool.
pub struct SeaUnitOfWork {
    db: Arc<DbConn>,
}

impl SeaUnitOfWork {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for SeaUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn Transaction>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Box::new(SeaTransaction { txn }))
    }
}

/// SeaORM rolls a [`DatabaseTransaction`] back when it is dropped unfinished.
struct SeaTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl Transaction for SeaTransaction {
    fn blogs(&self) -> Box<dyn BlogRepository + '_> {
        Box::new(SeaBlogRepository::new(&self.txn))
    }

    fn replies(&self) -> Box<dyn ReplyRepository + '_> {
        Box::new(SeaReplyRepository::new(&self.txn))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let SeaTransaction { txn } = *self;
        txn.commit().await.map_err(map_db_err)
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        let SeaTransaction { txn } = *self;
        txn.rollback().await.map_err(map_db_err)
    }
}
