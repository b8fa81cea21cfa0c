use async_trait::async_trait;

use crate::domain::{BlogPost, BlogPostUpdate, NewBlogPost, NewReply, Reply, ReplyUpdate};
use crate::error::RepoError;

/// Blog post repository.
///
/// Row-level operations only; cross-entity rules live in the services.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All posts in creation order.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    async fn find_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError>;

    /// Like [`find_by_id`](Self::find_by_id), but holds a row lock until the
    /// enclosing transaction ends. Outside a transaction it is a plain read.
    async fn find_by_id_for_update(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError>;

    /// Persist a new post, assigning its id and timestamps.
    async fn save(&self, post: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// Overwrite title and content and refresh `updated_at`.
    ///
    /// Returns [`RepoError::NotFound`] when no post has the given id.
    async fn update(&self, update: BlogPostUpdate) -> Result<BlogPost, RepoError>;

    /// Remove a post. Returns the number of rows removed (0 if absent).
    async fn delete_by_id(&self, blog_id: i64) -> Result<u64, RepoError>;

    /// Bump the view counter. Returns the number of rows touched (0 if absent).
    async fn increment_blog_count(&self, blog_id: i64) -> Result<u64, RepoError>;
}

/// Reply repository.
#[async_trait]
pub trait ReplyRepository: Send + Sync {
    /// Replies of one post in creation order; empty when there are none.
    async fn find_all_by_blog_id(&self, blog_id: i64) -> Result<Vec<Reply>, RepoError>;

    async fn find_by_reply_id(&self, reply_id: i64) -> Result<Option<Reply>, RepoError>;

    async fn save(&self, reply: NewReply) -> Result<Reply, RepoError>;

    /// Overwrite writer and content and refresh `updated_at`.
    ///
    /// Returns [`RepoError::NotFound`] when no reply has the given id.
    async fn update(&self, update: ReplyUpdate) -> Result<Reply, RepoError>;

    async fn delete_by_reply_id(&self, reply_id: i64) -> Result<u64, RepoError>;

    /// Remove every reply of a post. Returns the number of rows removed.
    async fn delete_by_blog_id(&self, blog_id: i64) -> Result<u64, RepoError>;
}
