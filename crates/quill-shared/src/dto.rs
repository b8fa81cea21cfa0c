//! Data Transfer Objects - request bodies accepted by the API.

use serde::{Deserialize, Serialize};

/// Body of `POST /blog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    pub writer: String,
    pub title: String,
    pub content: String,
}

/// Body of `PUT /blog/{blogId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: String,
    pub content: String,
}

/// Body of `POST /reply`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    pub blog_id: i64,
    pub reply_writer: String,
    pub reply_content: String,
}

/// Body of `PUT /reply/{replyId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReplyRequest {
    pub reply_writer: String,
    pub reply_content: String,
}
