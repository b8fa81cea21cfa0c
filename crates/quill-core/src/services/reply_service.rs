//! Reply use-cases.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{NewReply, Reply, ReplyUpdate};
use crate::error::{DomainError, RepoError};
use crate::ports::{ReplyRepository, Transaction, UnitOfWork};

#[async_trait]
pub trait ReplyService: Send + Sync {
    async fn find_all_by_blog_id(&self, blog_id: i64) -> Result<Vec<Reply>, DomainError>;

    /// `None` is an ordinary outcome for an unknown id.
    async fn find_by_reply_id(&self, reply_id: i64) -> Result<Option<Reply>, DomainError>;

    /// Create a reply. Fails with [`DomainError::NotFound`] if the post does not exist.
    async fn save(&self, reply: NewReply) -> Result<Reply, DomainError>;

    async fn update(&self, update: ReplyUpdate) -> Result<Reply, DomainError>;

    async fn delete_by_reply_id(&self, reply_id: i64) -> Result<(), DomainError>;
}

pub struct DefaultReplyService {
    replies: Arc<dyn ReplyRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DefaultReplyService {
    pub fn new(replies: Arc<dyn ReplyRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            replies,
            unit_of_work,
        }
    }
}

#[async_trait]
impl ReplyService for DefaultReplyService {
    async fn find_all_by_blog_id(&self, blog_id: i64) -> Result<Vec<Reply>, DomainError> {
        Ok(self.replies.find_all_by_blog_id(blog_id).await?)
    }

    async fn find_by_reply_id(&self, reply_id: i64) -> Result<Option<Reply>, DomainError> {
        Ok(self.replies.find_by_reply_id(reply_id).await?)
    }

    async fn save(&self, reply: NewReply) -> Result<Reply, DomainError> {
        let blog_id = reply.blog_id;
        let tx = self.unit_of_work.begin().await?;

        match save_under_existing_blog(tx.as_ref(), reply).await {
            Ok(Some(saved)) => {
                tx.commit().await?;
                tracing::info!(reply_id = saved.reply_id, blog_id, "Reply created");
                Ok(saved)
            }
            Ok(None) => {
                tx.rollback().await?;
                Err(DomainError::blog_not_found(blog_id))
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(blog_id, error = %rollback_err, "Rollback failed");
                }
                Err(e.into())
            }
        }
    }

    async fn update(&self, update: ReplyUpdate) -> Result<Reply, DomainError> {
        let reply_id = update.reply_id;
        match self.replies.update(update).await {
            Ok(updated) => {
                tracing::info!(reply_id, "Reply updated");
                Ok(updated)
            }
            Err(RepoError::NotFound) => Err(DomainError::reply_not_found(reply_id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_reply_id(&self, reply_id: i64) -> Result<(), DomainError> {
        let removed = self.replies.delete_by_reply_id(reply_id).await?;
        tracing::info!(reply_id, found = removed > 0, "Reply deleted");
        Ok(())
    }
}

/// Insert the reply only while holding a lock on its post; `None` if the post is gone.
async fn save_under_existing_blog(
    tx: &dyn Transaction,
    reply: NewReply,
) -> Result<Option<Reply>, RepoError> {
    if tx.blogs().find_by_id_for_update(reply.blog_id).await?.is_none() {
        return Ok(None);
    }
    tx.replies().save(reply).await.map(Some)
}
