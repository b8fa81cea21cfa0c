//! Database connection management and SeaORM-backed repositories.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod executor;
#[cfg(feature = "postgres")]
mod sea_base;
#[cfg(feature = "postgres")]
mod sea_repo;
#[cfg(feature = "postgres")]
mod transaction;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use executor::Executor;
#[cfg(feature = "postgres")]
pub use sea_base::SeaRepository;
#[cfg(feature = "postgres")]
pub use sea_repo::{SeaBlogRepository, SeaReplyRepository};
#[cfg(feature = "postgres")]
pub use transaction::SeaUnitOfWork;
