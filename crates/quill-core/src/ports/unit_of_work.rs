use async_trait::async_trait;

use super::{BlogRepository, ReplyRepository};
use crate::error::RepoError;

/// Opens storage transactions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn Transaction>, RepoError>;
}

/// An open storage transaction.
///
/// Repositories handed out by [`blogs`](Self::blogs) and
/// [`replies`](Self::replies) run inside it. Writes become visible to other
/// readers only after [`commit`](Self::commit); dropping the transaction
/// without committing discards them.
#[async_trait]
pub trait Transaction: Send + Sync {
    fn blogs(&self) -> Box<dyn BlogRepository + '_>;

    fn replies(&self) -> Box<dyn ReplyRepository + '_>;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepoError>;
}
