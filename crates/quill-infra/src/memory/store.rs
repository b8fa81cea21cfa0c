//! In-memory store implementing every storage port.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use quill_core::domain::{BlogPost, BlogPostUpdate, NewBlogPost, NewReply, Reply, ReplyUpdate};
use quill_core::error::RepoError;
use quill_core::ports::{BlogRepository, ReplyRepository, Transaction, UnitOfWork};

use super::state::MemoryState;

/// Blog posts and replies kept in process memory.
///
/// Transactions take the write lock for their whole lifetime, so they run one
/// at a time and readers never see a half-finished one.
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository over the committed state, usable as both
    /// [`BlogRepository`] and [`ReplyRepository`].
    pub fn repository(&self) -> MemoryRepository<'static> {
        MemoryRepository {
            access: Access::Shared(self.state.clone()),
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn Transaction>, RepoError> {
        let guard = self.state.clone().write_owned().await;
        let snapshot = guard.clone();
        Ok(Box::new(InMemoryTransaction {
            guard: Mutex::new(guard),
            snapshot: Some(snapshot),
        }))
    }
}

/// Holds the store's write lock. Changes are applied in place; the snapshot
/// taken at `begin` is put back unless the transaction commits.
struct InMemoryTransaction {
    guard: Mutex<OwnedRwLockWriteGuard<MemoryState>>,
    snapshot: Option<MemoryState>,
}

impl InMemoryTransaction {
    fn repository(&self) -> MemoryRepository<'_> {
        MemoryRepository {
            access: Access::Transaction(&self.guard),
        }
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    fn blogs(&self) -> Box<dyn BlogRepository + '_> {
        Box::new(self.repository())
    }

    fn replies(&self) -> Box<dyn ReplyRepository + '_> {
        Box::new(self.repository())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let mut tx = self;
        tx.snapshot = None;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        Ok(())
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            let guard = self.guard.get_mut().unwrap_or_else(PoisonError::into_inner);
            **guard = snapshot;
            tracing::debug!("In-memory transaction rolled back");
        }
    }
}

enum Access<'a> {
    Shared(Arc<RwLock<MemoryState>>),
    Transaction(&'a Mutex<OwnedRwLockWriteGuard<MemoryState>>),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Access<'_> {
    async fn read<R>(&self, f: impl FnOnce(&MemoryState) -> R) -> R {
        match self {
            Access::Shared(state) => f(&*state.read().await),
            Access::Transaction(guard) => f(&lock(guard)),
        }
    }

    async fn write<R>(&self, f: impl FnOnce(&mut MemoryState) -> R) -> R {
        match self {
            Access::Shared(state) => f(&mut *state.write().await),
            Access::Transaction(guard) => f(&mut lock(guard)),
        }
    }
}

/// Repository view over an [`InMemoryStore`], either committed state or an
/// open transaction.
pub struct MemoryRepository<'a> {
    access: Access<'a>,
}

#[async_trait]
impl BlogRepository for MemoryRepository<'_> {
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self.access.read(MemoryState::blogs).await)
    }

    async fn find_by_id(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.access.read(|state| state.blog(blog_id)).await)
    }

    async fn find_by_id_for_update(&self, blog_id: i64) -> Result<Option<BlogPost>, RepoError> {
        // A transaction already holds the store's write lock.
        self.find_by_id(blog_id).await
    }

    async fn save(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        Ok(self.access.write(|state| state.insert_blog(post)).await)
    }

    async fn update(&self, update: BlogPostUpdate) -> Result<BlogPost, RepoError> {
        self.access.write(|state| state.update_blog(update)).await
    }

    async fn delete_by_id(&self, blog_id: i64) -> Result<u64, RepoError> {
        Ok(self.access.write(|state| state.remove_blog(blog_id)).await)
    }

    async fn increment_blog_count(&self, blog_id: i64) -> Result<u64, RepoError> {
        Ok(self.access.write(|state| state.count_view(blog_id)).await)
    }
}

#[async_trait]
impl ReplyRepository for MemoryRepository<'_> {
    async fn find_all_by_blog_id(&self, blog_id: i64) -> Result<Vec<Reply>, RepoError> {
        Ok(self.access.read(|state| state.replies_of(blog_id)).await)
    }

    async fn find_by_reply_id(&self, reply_id: i64) -> Result<Option<Reply>, RepoError> {
        Ok(self.access.read(|state| state.reply(reply_id)).await)
    }

    async fn save(&self, reply: NewReply) -> Result<Reply, RepoError> {
        Ok(self.access.write(|state| state.insert_reply(reply)).await)
    }

    async fn update(&self, update: ReplyUpdate) -> Result<Reply, RepoError> {
        self.access.write(|state| state.update_reply(update)).await
    }

    async fn delete_by_reply_id(&self, reply_id: i64) -> Result<u64, RepoError> {
        Ok(self.access.write(|state| state.remove_reply(reply_id)).await)
    }

    async fn delete_by_blog_id(&self, blog_id: i64) -> Result<u64, RepoError> {
        Ok(self.access.write(|state| state.remove_replies_of(blog_id)).await)
    }
}
