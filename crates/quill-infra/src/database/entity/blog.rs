//! Blog entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{self, BlogPost, NewBlogPost};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub blog_id: i64,
    pub writer: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub published_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    #[sea_orm(default_value = 0)]
    pub blog_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            blog_id: model.blog_id,
            writer: model.writer,
            title: model.title,
            content: model.content,
            published_at: model.published_at.into(),
            updated_at: model.updated_at.into(),
            blog_count: model.blog_count,
        }
    }
}

/// Insertable row for a new post; the id is left to the database.
impl From<NewBlogPost> for ActiveModel {
    fn from(post: NewBlogPost) -> Self {
        let now = domain::now();
        Self {
            blog_id: NotSet,
            writer: Set(post.writer),
            title: Set(post.title),
            content: Set(post.content),
            published_at: Set(now.into()),
            updated_at: Set(now.into()),
            blog_count: Set(0),
        }
    }
}
