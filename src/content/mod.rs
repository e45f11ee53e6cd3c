//! Content handling - posts, front-matter, markdown rendering

mod frontmatter;
mod loader;
mod markdown;
mod post;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::Post;
