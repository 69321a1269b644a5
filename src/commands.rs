mod list_posts;
mod new_post;

pub(crate) use list_posts::list_posts;
pub(crate) use new_post::{new_post, Outcome};
