//! Blog post use-cases.
//!
//! Reads and single-row writes go straight to the [`BlogRepository`]. Deleting
//! a post also deletes its replies inside one transaction. Counting a view
//! and reading the post back share a transaction as well.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{BlogPost, BlogPostUpdate, NewBlogPost};
use crate::error::{DomainError, RepoError};
use crate::ports::{BlogRepository, Transaction, UnitOfWork};

#[async_trait]
pub trait BlogService: Send + Sync {
    async fn find_all(&self) -> Result<Vec<BlogPost>, DomainError>;

    async fn find_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, DomainError>;

    /// Count a view of the post and return it, or `None` if it does not exist.
    async fn view_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, DomainError>;

    async fn save(&self, post: NewBlogPost) -> Result<BlogPost, DomainError>;

    async fn update(&self, update: BlogPostUpdate) -> Result<BlogPost, DomainError>;

    /// Delete the post together with all of its replies, or nothing at all.
    async fn delete_by_id(&self, blog_id: i64) -> Result<(), DomainError>;
}

pub struct DefaultBlogService {
    blogs: Arc<dyn BlogRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DefaultBlogService {
    pub fn new(blogs: Arc<dyn BlogRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            blogs,
            unit_of_work,
        }
    }
}

#[async_trait]
impl BlogService for DefaultBlogService {
    async fn find_all(&self) -> Result<Vec<BlogPost>, DomainError> {
        Ok(self.blogs.find_all().await?)
    }

    async fn find_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, DomainError> {
        Ok(self.blogs.find_by_id(blog_id).await?)
    }

    async fn view_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, DomainError> {
        let tx = self.unit_of_work.begin().await?;

        match count_view(tx.as_ref(), blog_id).await {
            Ok(Some(post)) => {
                tx.commit().await?;
                Ok(Some(post))
            }
            Ok(None) => {
                tx.rollback().await?;
                Ok(None)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(blog_id, error = %rollback_err, "Rollback failed");
                }
                Err(e.into())
            }
        }
    }

    async fn save(&self, post: NewBlogPost) -> Result<BlogPost, DomainError> {
        let saved = self.blogs.save(post).await?;
        tracing::info!(blog_id = saved.blog_id, "Blog post created");
        Ok(saved)
    }

    async fn update(&self, update: BlogPostUpdate) -> Result<BlogPost, DomainError> {
        let blog_id = update.blog_id;
        match self.blogs.update(update).await {
            Ok(updated) => {
                tracing::info!(blog_id, "Blog post updated");
                Ok(updated)
            }
            Err(RepoError::NotFound) => Err(DomainError::blog_not_found(blog_id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, blog_id: i64) -> Result<(), DomainError> {
        let tx = self.unit_of_work.begin().await?;

        match delete_with_replies(tx.as_ref(), blog_id).await {
            Ok((replies_removed, blogs_removed)) => {
                tx.commit().await?;
                tracing::info!(
                    blog_id,
                    replies_removed,
                    found = blogs_removed > 0,
                    "Blog post deleted"
                );
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(blog_id, error = %rollback_err, "Rollback failed");
                }
                tracing::warn!(blog_id, error = %e, "Blog post delete rolled back");
                Err(e.into())
            }
        }
    }
}

/// Lock the post, then remove its replies and the post itself.
///
/// The lock makes a concurrent reply insert for the same post either finish
/// before the replies are removed or see the post gone.
async fn delete_with_replies(
    tx: &dyn Transaction,
    blog_id: i64,
) -> Result<(u64, u64), RepoError> {
    tx.blogs().find_by_id_for_update(blog_id).await?;
    let replies_removed = tx.replies().delete_by_blog_id(blog_id).await?;
    let blogs_removed = tx.blogs().delete_by_id(blog_id).await?;
    Ok((replies_removed, blogs_removed))
}

/// Bump the view counter and read the post back under the same row lock.
async fn count_view(tx: &dyn Transaction, blog_id: i64) -> Result<Option<BlogPost>, RepoError> {
    if tx.blogs().increment_blog_count(blog_id).await? == 0 {
        return Ok(None);
    }
    tx.blogs().find_by_id(blog_id).await
}
