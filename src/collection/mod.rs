//! The posts collection - a newest-first ordered view of all posts
//!
//! Every consumer (templates, navigation, listings) reads from one shared
//! ordering, so neighbor lookups and slices stay consistent with each other.

use std::collections::BTreeSet;

use crate::content::Post;

/// Posts sorted newest-first, with neighbor navigation by url.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    /// Build the collection from loaded posts.
    ///
    /// Sorting is stable and descending by date, so posts sharing a date
    /// keep their discovery order relative to each other.
    pub fn build(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts belonging to `category`, in collection order.
    /// Category names match exactly, case included.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.categories.iter().any(|c| c == category))
            .collect()
    }

    /// Every category used by at least one post, sorted and deduplicated
    pub fn categories(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.categories.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The post one position before `url` in newest-first order, which is
    /// the chronologically newer neighbor. None at the newest post or when
    /// `url` is not in the collection.
    pub fn previous(&self, url: &str) -> Option<&Post> {
        let index = self.position(url)?;
        if index > 0 {
            self.posts.get(index - 1)
        } else {
            None
        }
    }

    /// The post one position after `url` in newest-first order, which is
    /// the chronologically older neighbor. None at the oldest post or when
    /// `url` is not in the collection.
    pub fn next(&self, url: &str) -> Option<&Post> {
        let index = self.position(url)?;
        self.posts.get(index + 1)
    }

    /// Index of the first post whose url matches
    fn position(&self, url: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.url == url)
    }
}
