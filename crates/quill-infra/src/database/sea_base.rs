use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait};

use quill_core::error::RepoError;

use super::executor::Executor;

/// Generic SeaORM repository for entity `E`, running on executor `X`.
pub struct SeaRepository<E, X = Arc<DbConn>>
where
    E: EntityTrait,
{
    pub(crate) db: X,
    _entity: PhantomData<E>,
}

impl<E, X> SeaRepository<E, X>
where
    E: EntityTrait,
{
    pub fn new(db: X) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<E, X> SeaRepository<E, X>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i64>,
    X: Executor,
{
    pub(crate) async fn find_model(&self, id: i64) -> Result<Option<E::Model>, RepoError> {
        E::find_by_id(id)
            .one(self.db.conn())
            .await
            .map_err(map_db_err)
    }

    pub(crate) async fn delete_model(&self, id: i64) -> Result<u64, RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.db.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

/// Translate a SeaORM error into the port's error type.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}
