//! In-memory storage - used when no database is configured, and in tests.

mod state;
mod store;

pub use store::{InMemoryStore, MemoryRepository};
