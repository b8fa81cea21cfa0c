use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reply entity - a comment attached to exactly one blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub reply_id: i64,
    pub blog_id: i64,
    pub reply_writer: String,
    pub reply_content: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reply to be created under `blog_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReply {
    pub blog_id: i64,
    pub reply_writer: String,
    pub reply_content: String,
}

impl NewReply {
    pub fn new(blog_id: i64, writer: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            blog_id,
            reply_writer: writer.into(),
            reply_content: content.into(),
        }
    }
}

/// New writer and content for an existing reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyUpdate {
    pub reply_id: i64,
    pub reply_writer: String,
    pub reply_content: String,
}

impl ReplyUpdate {
    pub fn new(reply_id: i64, writer: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            reply_id,
            reply_writer: writer.into(),
            reply_content: content.into(),
        }
    }
}
