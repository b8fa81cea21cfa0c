//! Reply entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::{self, NewReply, Reply};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reply")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub reply_id: i64,
    #[sea_orm(indexed)]
    pub blog_id: i64,
    pub reply_writer: String,
    #[sea_orm(column_type = "Text")]
    pub reply_content: String,
    pub published_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Reply.
impl From<Model> for Reply {
    fn from(model: Model) -> Self {
        Self {
            reply_id: model.reply_id,
            blog_id: model.blog_id,
            reply_writer: model.reply_writer,
            reply_content: model.reply_content,
            published_at: model.published_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewReply> for ActiveModel {
    fn from(reply: NewReply) -> Self {
        let now = domain::now();
        Self {
            reply_id: NotSet,
            blog_id: Set(reply.blog_id),
            reply_writer: Set(reply.reply_writer),
            reply_content: Set(reply.reply_content),
            published_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
