//! Domain entities - the core business objects.

mod blog;
mod clock;
mod reply;

pub use blog::{BlogPost, BlogPostUpdate, NewBlogPost};
pub use clock::{now, touched_at};
pub use reply::{NewReply, Reply, ReplyUpdate};
