//! Domain services - use-cases orchestrating the repository ports.

mod blog_service;
mod reply_service;

pub use blog_service::{BlogService, DefaultBlogService};
pub use reply_service::{DefaultReplyService, ReplyService};

#[cfg(test)]
mod tests;
