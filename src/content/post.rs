//! Post model

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date (the sole sort key)
    pub date: DateTime<Utc>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Post categories
    pub categories: Vec<String>,

    /// Layout template to use
    pub layout: String,

    /// Source file path (relative to the input root)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Root-relative URL; unique per post, used for equality/lookup
    pub url: String,

    /// Full permalink URL
    pub permalink: String,

    /// Whether the post is a draft
    pub draft: bool,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Utc>, source: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            title,
            date,
            raw: String::new(),
            content: String::new(),
            categories: Vec::new(),
            layout: "post".to_string(),
            source: source.clone(),
            full_source: PathBuf::from(&source),
            url: String::new(),
            permalink: String::new(),
            draft: false,
            slug,
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_post_slug() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let post = Post::new(
            "Hello World".to_string(),
            date,
            "posts/hello-world.md".to_string(),
        );
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.layout, "post");
        assert!(!post.draft);
    }
}
