//! SeaORM repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use quill_core::domain::{self, BlogPost, BlogPostUpdate, NewBlogPost, NewReply, Reply, ReplyUpdate};
use quill_core::error::RepoError;
use quill_core::ports::{BlogRepository, ReplyRepository};

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::reply::{self, Entity as ReplyEntity};
use super::executor::Executor;
use super::sea_base::{SeaRepository, map_db_err};

/// SeaORM blog repository.
pub type SeaBlogRepository<X = Arc<sea_orm::DbConn>> = SeaRepository<BlogEntity, X>;

/// SeaORM reply repository.
pub type SeaReplyRepository<X = Arc<sea_orm::DbConn>> = SeaRepository<ReplyEntity, X>;

#[async_trait]
impl<X: Executor> BlogRepository for SeaBlogRepository<X> {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogEntity::find()
            .order_by_asc(blog::Column::BlogId)
            .all(self.db.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.find_model(blog_id).await?.map(Into::into))
    }

    async fn find_by_id_for_update(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError> {
        let conn = self.db.conn();
        let mut query = BlogEntity::find_by_id(blog_id);
        // SQLite has no row locks; its transactions already serialize writers.
        if conn.get_database_backend() != DbBackend::Sqlite {
            query = query.lock_exclusive();
        }

        let result = query.one(conn).await.map_err(map_db_err)?;
        Ok(result.map(Into::into))
    }

    async fn save(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let model = blog::ActiveModel::from(post)
            .insert(self.db.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, update: BlogPostUpdate) -> Result<BlogPost, RepoError> {
        let existing = self
            .find_model(update.blog_id)
            .await?
            .ok_or(RepoError::NotFound)?;
        let published_at: DateTime<Utc> = existing.published_at.into();

        let mut active = existing.into_active_model();
        active.title = Set(update.title);
        active.content = Set(update.content);
        active.updated_at = Set(domain::touched_at(published_at).into());

        let model = active.update(self.db.conn()).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete_by_id(&self, blog_id: i64) -> Result<u64, RepoError> {
        self.delete_model(blog_id).await
    }

    async fn increment_blog_count(&self, blog_id: i64) -> Result<u64, RepoError> {
        let result = BlogEntity::update_many()
            .col_expr(
                blog::Column::BlogCount,
                Expr::col(blog::Column::BlogCount).add(1),
            )
            .filter(blog::Column::BlogId.eq(blog_id))
            .exec(self.db.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl<X: Executor> ReplyRepository for SeaReplyRepository<X> {
    async fn find_all_by_blog_id(&self, blog_id: i64) -> Result<Vec<Reply>, RepoError> {
        tracing::debug!(blog_id, "Finding replies by blog id");

        let result = ReplyEntity::find()
            .filter(reply::Column::BlogId.eq(blog_id))
            .order_by_asc(reply::Column::ReplyId)
            .all(self.db.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_reply_id(&self, reply_id: i64) -> Result<Option<Reply>, RepoError> {
        Ok(self.find_model(reply_id).await?.map(Into::into))
    }

    async fn save(&self, reply: NewReply) -> Result<Reply, RepoError> {
        let model = reply::ActiveModel::from(reply)
            .insert(self.db.conn())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, update: ReplyUpdate) -> Result<Reply, RepoError> {
        let existing = self
            .find_model(update.reply_id)
            .await?
            .ok_or(RepoError::NotFound)?;
        let published_at: DateTime<Utc> = existing.published_at.into();

        let mut active = existing.into_active_model();
        active.reply_writer = Set(update.reply_writer);
        active.reply_content = Set(update.reply_content);
        active.updated_at = Set(domain::touched_at(published_at).into());

        let model = active.update(self.db.conn()).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete_by_reply_id(&self, reply_id: i64) -> Result<u64, RepoError> {
        self.delete_model(reply_id).await
    }

    async fn delete_by_blog_id(&self, blog_id: i64) -> Result<u64, RepoError> {
        let result = ReplyEntity::delete_many()
            .filter(reply::Column::BlogId.eq(blog_id))
            .exec(self.db.conn())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(blog_id, removed = result.rows_affected, "Deleted replies of blog");
        Ok(result.rows_affected)
    }
}
