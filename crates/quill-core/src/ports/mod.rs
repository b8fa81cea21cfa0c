//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod unit_of_work;

pub use repository::{BlogRepository, ReplyRepository};
pub use unit_of_work::{Transaction, UnitOfWork};
