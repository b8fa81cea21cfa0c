//! The tables behind [`InMemoryStore`](super::InMemoryStore).

use std::collections::BTreeMap;

use quill_core::domain::{
    self, BlogPost, BlogPostUpdate, NewBlogPost, NewReply, Reply, ReplyUpdate,
};
use quill_core::error::RepoError;

/// Both tables plus their id sequences. Maps are keyed by id, so iteration
/// order is creation order.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    blogs: BTreeMap<i64, BlogPost>,
    replies: BTreeMap<i64, Reply>,
    last_blog_id: i64,
    last_reply_id: i64,
}

impl MemoryState {
    pub(crate) fn blogs(&self) -> Vec<BlogPost> {
        self.blogs.values().cloned().collect()
    }

    pub(crate) fn blog(&self, blog_id: i64) -> Option<BlogPost> {
        self.blogs.get(&blog_id).cloned()
    }

    pub(crate) fn insert_blog(&mut self, post: NewBlogPost) -> BlogPost {
        self.last_blog_id += 1;
        let now = domain::now();
        let saved = BlogPost {
            blog_id: self.last_blog_id,
            writer: post.writer,
            title: post.title,
            content: post.content,
            published_at: now,
            updated_at: now,
            blog_count: 0,
        };
        self.blogs.insert(saved.blog_id, saved.clone());
        saved
    }

    pub(crate) fn update_blog(&mut self, update: BlogPostUpdate) -> Result<BlogPost, RepoError> {
        let post = self
            .blogs
            .get_mut(&update.blog_id)
            .ok_or(RepoError::NotFound)?;
        post.title = update.title;
        post.content = update.content;
        post.updated_at = domain::touched_at(post.published_at);
        Ok(post.clone())
    }

    pub(crate) fn remove_blog(&mut self, blog_id: i64) -> u64 {
        u64::from(self.blogs.remove(&blog_id).is_some())
    }

    pub(crate) fn count_view(&mut self, blog_id: i64) -> u64 {
        match self.blogs.get_mut(&blog_id) {
            Some(post) => {
                post.blog_count += 1;
                1
            }
            None => 0,
        }
    }

    pub(crate) fn replies_of(&self, blog_id: i64) -> Vec<Reply> {
        self.replies
            .values()
            .filter(|reply| reply.blog_id == blog_id)
            .cloned()
            .collect()
    }

    pub(crate) fn reply(&self, reply_id: i64) -> Option<Reply> {
        self.replies.get(&reply_id).cloned()
    }

    pub(crate) fn insert_reply(&mut self, reply: NewReply) -> Reply {
        self.last_reply_id += 1;
        let now = domain::now();
        let saved = Reply {
            reply_id: self.last_reply_id,
            blog_id: reply.blog_id,
            reply_writer: reply.reply_writer,
            reply_content: reply.reply_content,
            published_at: now,
            updated_at: now,
        };
        self.replies.insert(saved.reply_id, saved.clone());
        saved
    }

    pub(crate) fn update_reply(&mut self, update: ReplyUpdate) -> Result<Reply, RepoError> {
        let reply = self
            .replies
            .get_mut(&update.reply_id)
            .ok_or(RepoError::NotFound)?;
        reply.reply_writer = update.reply_writer;
        reply.reply_content = update.reply_content;
        reply.updated_at = domain::touched_at(reply.published_at);
        Ok(reply.clone())
    }

    pub(crate) fn remove_reply(&mut self, reply_id: i64) -> u64 {
        u64::from(self.replies.remove(&reply_id).is_some())
    }

    pub(crate) fn remove_replies_of(&mut self, blog_id: i64) -> u64 {
        let before = self.replies.len();
        self.replies.retain(|_, reply| reply.blog_id != blog_id);
        (before - self.replies.len()) as u64
    }
}
