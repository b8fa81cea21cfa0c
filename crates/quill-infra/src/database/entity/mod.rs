//! SeaORM entities for the `blog` and `reply` tables.
//!
//! `reply.blog_id` points at `blog.blog_id` but no foreign-key constraint
//! exists; the services keep the two tables consistent.

pub mod blog;
pub mod reply;
