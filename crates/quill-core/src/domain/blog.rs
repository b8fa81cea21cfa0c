use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog post entity - a single article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub blog_id: i64,
    pub writer: String,
    pub title: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of times the post has been viewed.
    pub blog_count: i64,
}

/// Fields supplied when publishing a post; storage assigns the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlogPost {
    pub writer: String,
    pub title: String,
    pub content: String,
}

impl NewBlogPost {
    pub fn new(
        writer: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            writer: writer.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Replacement title and content for an existing post. The writer never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPostUpdate {
    pub blog_id: i64,
    pub title: String,
    pub content: String,
}

impl BlogPostUpdate {
    pub fn new(blog_id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            blog_id,
            title: title.into(),
            content: content.into(),
        }
    }
}
