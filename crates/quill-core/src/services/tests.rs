use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    self, BlogPost, BlogPostUpdate, NewBlogPost, NewReply, Reply, ReplyUpdate,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{BlogRepository, ReplyRepository, Transaction, UnitOfWork};
use crate::services::{BlogService, DefaultBlogService, DefaultReplyService, ReplyService};

#[derive(Debug, Clone, Default)]
struct Tables {
    blogs: BTreeMap<i64, BlogPost>,
    replies: BTreeMap<i64, Reply>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Storage fake that records each call and can be told to fail one of them.
#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<&'static str>>>,
    fail_on: Arc<Mutex<Option<&'static str>>>,
}

impl Recorder {
    fn record(&self, event: &'static str) -> Result<(), RepoError> {
        self.events.lock().unwrap().push(event);
        if *self.fail_on.lock().unwrap() == Some(event) {
            return Err(RepoError::Query(format!("injected failure in {event}")));
        }
        Ok(())
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    fn fail_on(&self, event: &'static str) {
        *self.fail_on.lock().unwrap() = Some(event);
    }
}

#[derive(Clone)]
struct FakeRepo {
    tables: Arc<Mutex<Tables>>,
    recorder: Recorder,
}

#[async_trait]
impl BlogRepository for FakeRepo {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        self.recorder.record("blogs.find_all")?;
        Ok(self.tables.lock().unwrap().blogs.values().cloned().collect())
    }

    async fn find_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError> {
        self.recorder.record("blogs.find_by_id")?;
        Ok(self.tables.lock().unwrap().blogs.get(&blog_id).cloned())
    }

    async fn find_by_id_for_update(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError> {
        self.recorder.record("blogs.find_by_id_for_update")?;
        Ok(self.tables.lock().unwrap().blogs.get(&blog_id).cloned())
    }

    async fn save(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        self.recorder.record("blogs.save")?;
        let mut tables = self.tables.lock().unwrap();
        let now = domain::now();
        let saved = BlogPost {
            blog_id: tables.next_id(),
            writer: post.writer,
            title: post.title,
            content: post.content,
            published_at: now,
            updated_at: now,
            blog_count: 0,
        };
        tables.blogs.insert(saved.blog_id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, update: BlogPostUpdate) -> Result<BlogPost, RepoError> {
        self.recorder.record("blogs.update")?;
        let mut tables = self.tables.lock().unwrap();
        let post = tables
            .blogs
            .get_mut(&update.blog_id)
            .ok_or(RepoError::NotFound)?;
        post.title = update.title;
        post.content = update.content;
        post.updated_at = domain::touched_at(post.published_at);
        Ok(post.clone())
    }

    async fn delete_by_id(&self, blog_id: i64) -> Result<u64, RepoError> {
        self.recorder.record("blogs.delete_by_id")?;
        let removed = self.tables.lock().unwrap().blogs.remove(&blog_id);
        Ok(removed.map_or(0, |_| 1))
    }

    async fn increment_blog_count(&self, blog_id: i64) -> Result<u64, RepoError> {
        self.recorder.record("blogs.increment_blog_count")?;
        match self.tables.lock().unwrap().blogs.get_mut(&blog_id) {
            Some(post) => {
                post.blog_count += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl ReplyRepository for FakeRepo {
    async fn find_all_by_blog_id(&self, blog_id: i64) -> Result<Vec<Reply>, RepoError> {
        self.recorder.record("replies.find_all_by_blog_id")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .replies
            .values()
            .filter(|r| r.blog_id == blog_id)
            .cloned()
            .collect())
    }

    async fn find_by_reply_id(&self, reply_id: i64) -> Result<Option<Reply>, RepoError> {
        self.recorder.record("replies.find_by_reply_id")?;
        Ok(self.tables.lock().unwrap().replies.get(&reply_id).cloned())
    }

    async fn save(&self, reply: NewReply) -> Result<Reply, RepoError> {
        self.recorder.record("replies.save")?;
        let mut tables = self.tables.lock().unwrap();
        let now = domain::now();
        let saved = Reply {
            reply_id: tables.next_id(),
            blog_id: reply.blog_id,
            reply_writer: reply.reply_writer,
            reply_content: reply.reply_content,
            published_at: now,
            updated_at: now,
        };
        tables.replies.insert(saved.reply_id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, update: ReplyUpdate) -> Result<Reply, RepoError> {
        self.recorder.record("replies.update")?;
        let mut tables = self.tables.lock().unwrap();
        let reply = tables
            .replies
            .get_mut(&update.reply_id)
            .ok_or(RepoError::NotFound)?;
        reply.reply_writer = update.reply_writer;
        reply.reply_content = update.reply_content;
        reply.updated_at = domain::touched_at(reply.published_at);
        Ok(reply.clone())
    }

    async fn delete_by_reply_id(&self, reply_id: i64) -> Result<u64, RepoError> {
        self.recorder.record("replies.delete_by_reply_id")?;
        let removed = self.tables.lock().unwrap().replies.remove(&reply_id);
        Ok(removed.map_or(0, |_| 1))
    }

    async fn delete_by_blog_id(&self, blog_id: i64) -> Result<u64, RepoError> {
        self.recorder.record("replies.delete_by_blog_id")?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.replies.len();
        tables.replies.retain(|_, r| r.blog_id != blog_id);
        Ok((before - tables.replies.len()) as u64)
    }
}

/// Transactions work on a private copy that replaces the committed tables on commit.
struct FakeTransaction {
    staged: FakeRepo,
    committed: Arc<Mutex<Tables>>,
}

#[async_trait]
impl Transaction for FakeTransaction {
    fn blogs(&self) -> Box<dyn BlogRepository + '_> {
        Box::new(self.staged.clone())
    }

    fn replies(&self) -> Box<dyn ReplyRepository + '_> {
        Box::new(self.staged.clone())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        self.staged.recorder.record("commit")?;
        let staged = self.staged.tables.lock().unwrap().clone();
        *self.committed.lock().unwrap() = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        self.staged.recorder.record("rollback")
    }
}

#[async_trait]
impl UnitOfWork for FakeRepo {
    async fn begin(&self) -> Result<Box<dyn Transaction>, RepoError> {
        self.recorder.record("begin")?;
        let snapshot = self.tables.lock().unwrap().clone();
        Ok(Box::new(FakeTransaction {
            staged: FakeRepo {
                tables: Arc::new(Mutex::new(snapshot)),
                recorder: self.recorder.clone(),
            },
            committed: self.tables.clone(),
        }))
    }
}

struct Fixture {
    store: FakeRepo,
    blogs: DefaultBlogService,
    replies: DefaultReplyService,
}

impl Fixture {
    /// Three posts; post 2 carries four replies, post 1 carries one.
    async fn seeded() -> Self {
        let store = FakeRepo {
            tables: Arc::default(),
            recorder: Recorder::default(),
        };
        for n in 1..=3 {
            BlogRepository::save(
                &store,
                NewBlogPost::new(format!("writer {n}"), format!("title {n}"), "body"),
            )
            .await
            .unwrap();
        }
        for writer in ["a", "b", "c", "d"] {
            ReplyRepository::save(&store, NewReply::new(2, writer, "reply"))
                .await
                .unwrap();
        }
        ReplyRepository::save(&store, NewReply::new(1, "e", "reply"))
            .await
            .unwrap();
        store.recorder.events.lock().unwrap().clear();

        let shared = Arc::new(store.clone());
        Self {
            blogs: DefaultBlogService::new(shared.clone(), shared.clone()),
            replies: DefaultReplyService::new(shared.clone(), shared),
            store,
        }
    }
}

#[tokio::test]
async fn delete_by_id_removes_post_and_its_replies() {
    let fx = Fixture::seeded().await;

    fx.blogs.delete_by_id(2).await.unwrap();

    assert!(fx.blogs.find_by_id(2).await.unwrap().is_none());
    assert!(fx.replies.find_all_by_blog_id(2).await.unwrap().is_empty());
    assert_eq!(fx.replies.find_all_by_blog_id(1).await.unwrap().len(), 1);
    assert_eq!(fx.blogs.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_by_id_locks_then_deletes_replies_before_post() {
    let fx = Fixture::seeded().await;

    fx.blogs.delete_by_id(2).await.unwrap();

    assert_eq!(
        fx.store.recorder.events(),
        vec![
            "begin",
            "blogs.find_by_id_for_update",
            "replies.delete_by_blog_id",
            "blogs.delete_by_id",
            "commit",
        ]
    );
}

#[tokio::test]
async fn delete_by_id_rolls_back_when_post_delete_fails() {
    let fx = Fixture::seeded().await;
    fx.store.recorder.fail_on("blogs.delete_by_id");

    let err = fx.blogs.delete_by_id(2).await.unwrap_err();

    assert!(matches!(err, DomainError::Repository(RepoError::Query(_))));
    assert_eq!(fx.store.recorder.events().last(), Some(&"rollback"));
    assert!(fx.blogs.find_by_id(2).await.unwrap().is_some());
    assert_eq!(fx.replies.find_all_by_blog_id(2).await.unwrap().len(), 4);
}

#[tokio::test]
async fn delete_by_id_rolls_back_when_reply_delete_fails() {
    let fx = Fixture::seeded().await;
    fx.store.recorder.fail_on("replies.delete_by_blog_id");

    assert!(fx.blogs.delete_by_id(2).await.is_err());

    assert!(!fx.store.recorder.events().contains(&"blogs.delete_by_id"));
    assert!(fx.blogs.find_by_id(2).await.unwrap().is_some());
    assert_eq!(fx.replies.find_all_by_blog_id(2).await.unwrap().len(), 4);
}

#[tokio::test]
async fn delete_by_id_of_missing_post_is_not_an_error() {
    let fx = Fixture::seeded().await;

    fx.blogs.delete_by_id(99).await.unwrap();

    assert_eq!(fx.blogs.find_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn update_of_missing_post_is_not_found() {
    let fx = Fixture::seeded().await;

    let err = fx
        .blogs
        .update(BlogPostUpdate::new(99, "t", "c"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "BlogPost",
            id: 99
        }
    ));
}

#[tokio::test]
async fn update_keeps_writer_and_refreshes_updated_at() {
    let fx = Fixture::seeded().await;

    let updated = fx
        .blogs
        .update(BlogPostUpdate::new(2, "new title", "new body"))
        .await
        .unwrap();

    assert_eq!(updated.writer, "writer 2");
    assert_eq!(updated.title, "new title");
    assert!(updated.updated_at > updated.published_at);
}

#[tokio::test]
async fn view_by_id_counts_views() {
    let fx = Fixture::seeded().await;

    fx.blogs.view_by_id(3).await.unwrap();
    let viewed = fx.blogs.view_by_id(3).await.unwrap().unwrap();

    assert_eq!(viewed.blog_count, 2);
    assert_eq!(fx.blogs.find_by_id(3).await.unwrap().unwrap().blog_count, 2);
    assert!(fx.blogs.view_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
async fn view_by_id_counts_and_reads_in_one_transaction() {
    let fx = Fixture::seeded().await;

    fx.blogs.view_by_id(3).await.unwrap();

    assert_eq!(
        fx.store.recorder.events(),
        vec![
            "begin",
            "blogs.increment_blog_count",
            "blogs.find_by_id",
            "commit",
        ]
    );
}

#[tokio::test]
async fn view_by_id_discards_count_when_read_fails() {
    let fx = Fixture::seeded().await;
    fx.store.recorder.fail_on("blogs.find_by_id");

    assert!(fx.blogs.view_by_id(3).await.is_err());

    assert_eq!(fx.store.recorder.events().last(), Some(&"rollback"));
    assert_eq!(fx.store.tables.lock().unwrap().blogs[&3].blog_count, 0);
}

#[tokio::test]
async fn reply_save_under_missing_post_is_refused() {
    let fx = Fixture::seeded().await;

    let err = fx
        .replies
        .save(NewReply::new(99, "w", "c"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "BlogPost",
            id: 99
        }
    ));
    assert!(fx.replies.find_all_by_blog_id(99).await.unwrap().is_empty());
    assert!(fx.store.recorder.events().contains(&"rollback"));
}

#[tokio::test]
async fn reply_save_assigns_matching_timestamps() {
    let fx = Fixture::seeded().await;

    let saved = fx.replies.save(NewReply::new(1, "W", "C")).await.unwrap();

    let replies = fx.replies.find_all_by_blog_id(1).await.unwrap();
    assert_eq!(replies.len(), 2);
    let last = replies.last().unwrap();
    assert_eq!(last.reply_id, saved.reply_id);
    assert_eq!(last.reply_writer, "W");
    assert_eq!(last.reply_content, "C");
    assert_eq!(last.published_at, last.updated_at);
}

#[tokio::test]
async fn reply_lookups_of_missing_ids_are_not_errors() {
    let fx = Fixture::seeded().await;

    assert!(fx.replies.find_by_reply_id(999).await.unwrap().is_none());
    fx.replies.delete_by_reply_id(999).await.unwrap();
}

#[tokio::test]
async fn reply_update_of_missing_reply_is_not_found() {
    let fx = Fixture::seeded().await;

    let err = fx
        .replies
        .update(ReplyUpdate::new(999, "w", "c"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Reply",
            id: 999
        }
    ));
}
