//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{BlogRepository, ReplyRepository, UnitOfWork};
use quill_core::services::{BlogService, DefaultBlogService, DefaultReplyService, ReplyService};
use quill_infra::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use quill_infra::{SeaBlogRepository, SeaReplyRepository, SeaUnitOfWork, database::connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogService>,
    pub replies: Arc<dyn ReplyService>,
    /// Which storage backend is serving requests.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match connect(config).await {
                    Ok(db) => {
                        tracing::info!("Connected to database");
                        let db = Arc::new(db);
                        return Self::from_ports(
                            Arc::new(SeaBlogRepository::new(db.clone())),
                            Arc::new(SeaReplyRepository::new(db.clone())),
                            Arc::new(SeaUnitOfWork::new(db)),
                            "postgres",
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        if db_config.is_some() {
            tracing::warn!("Built without postgres support. Ignoring DATABASE_URL.");
        }

        Self::in_memory()
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self::from_ports(
            Arc::new(store.repository()),
            Arc::new(store.repository()),
            Arc::new(store),
            "memory",
        )
    }

    fn from_ports(
        blogs: Arc<dyn BlogRepository>,
        replies: Arc<dyn ReplyRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        storage: &'static str,
    ) -> Self {
        Self {
            blogs: Arc::new(DefaultBlogService::new(blogs, unit_of_work.clone())),
            replies: Arc::new(DefaultReplyService::new(replies, unit_of_work)),
            storage,
        }
    }
}
