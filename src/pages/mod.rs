//! Page state for the list and post routes

mod detail;
mod list;

pub use detail::{PostPage, PostView, RenderedSection};
pub use list::PostList;
