//! Content loader - discovers and loads posts from the input directory

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::Path;

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::Eleventy;

/// Loads content selected by the configured posts glob
pub struct ContentLoader<'a> {
    app: &'a Eleventy,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(app: &'a Eleventy) -> Self {
        Self {
            app,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all posts matched by the posts glob, in discovery order.
    ///
    /// The returned sequence is deliberately unsorted; ordering is the
    /// collection's concern and discovery order breaks sort ties.
    pub fn load_posts(&self, include_drafts: bool) -> Result<Vec<Post>> {
        // The base path is literal; only the configured pattern is glob syntax
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&self.app.input_dir.to_string_lossy()),
            self.app.config.posts.trim_start_matches('/')
        );

        let mut posts = Vec::new();
        let render_drafts = include_drafts || self.app.config.render_drafts;

        for path in glob::glob(&pattern)?.filter_map(|e| e.ok()) {
            if !path.is_file() {
                continue;
            }
            match self.load_post(&path) {
                Ok(post) => {
                    if post.draft && !render_drafts {
                        tracing::debug!("Skipping draft: {}", post.source);
                        continue;
                    }
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        // Source path relative to the input root
        let source = path
            .strip_prefix(&self.app.input_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        let (filename_date, clean_stem) = split_date_prefix(stem);

        // Date resolution: front-matter, then filename prefix, then mtime
        let file_modified = fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);
        let date = fm
            .parse_date()
            .or(filename_date)
            .or(file_modified)
            .unwrap_or_else(Utc::now);

        let title = fm
            .title
            .clone()
            .unwrap_or_else(|| clean_stem.replace('-', " "));

        let url = match fm.permalink.as_deref() {
            Some(p) if p.starts_with('/') => p.to_string(),
            Some(p) => format!("/{}", p),
            None => self.derive_url(&source, clean_stem),
        };
        let permalink = format!("{}{}", self.app.config.url.trim_end_matches('/'), url);

        let mut post = Post::new(title, date, source);
        post.raw = body.to_string();
        post.content = self.renderer.render(body);
        post.categories = fm.categories;
        post.layout = fm.layout.unwrap_or_else(|| "post".to_string());
        post.full_source = path.to_path_buf();
        post.url = url;
        post.permalink = permalink;
        post.draft = fm.draft;
        post.slug = clean_stem.to_string();
        post.extra = fm.extra;

        Ok(post)
    }

    /// Derive a root-relative url from the source path.
    ///
    /// `posts/hello.md` becomes `/posts/hello/`; an `index.md` maps to its
    /// directory; a `YYYY-MM-DD-` filename prefix is dropped.
    fn derive_url(&self, source: &str, clean_stem: &str) -> String {
        let without_ext = source.trim_end_matches(".md").trim_end_matches(".markdown");

        let dir = match without_ext.rfind('/') {
            Some(i) => &without_ext[..i + 1],
            None => "",
        };

        let path = if clean_stem == "index" {
            dir.to_string()
        } else {
            format!("{}{}/", dir, clean_stem)
        };

        format!(
            "{}/{}",
            self.app.config.root.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Split a Jekyll-style `YYYY-MM-DD-` prefix off a file stem.
/// Returns the parsed date (midnight UTC) and the remaining stem.
fn split_date_prefix(stem: &str) -> (Option<DateTime<Utc>>, &str) {
    if let (Some(prefix), Some(rest)) = (stem.get(..10), stem.get(10..)) {
        if let Some(rest) = rest.strip_prefix('-') {
            if !rest.is_empty() {
                if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                    let date = d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
                    return (date, rest);
                }
            }
        }
    }
    (None, stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Eleventy) {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("posts")).unwrap();
        for (name, content) in posts {
            fs::write(tmp.path().join("posts").join(name), content).unwrap();
        }
        let app = Eleventy::new(tmp.path()).unwrap();
        (tmp, app)
    }

    #[test]
    fn test_load_posts_fields() {
        let (_tmp, app) = site_with_posts(&[(
            "hello.md",
            "---\ntitle: Hello\ndate: 2024-01-15\ncategories: faith\n---\n\n# Heading\n\nBody text.\n",
        )]);

        let posts = ContentLoader::new(&app).load_posts(false).unwrap();
        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.title, "Hello");
        assert_eq!(post.url, "/posts/hello/");
        assert_eq!(post.permalink, "http://example.com/posts/hello/");
        assert_eq!(post.categories, vec!["faith"]);
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert!(post.content.contains("<h1>Heading</h1>"));
        assert!(post.raw.contains("Body text."));
    }

    #[test]
    fn test_drafts_skipped_unless_enabled() {
        let (_tmp, app) = site_with_posts(&[
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nA.\n"),
            ("b.md", "---\ntitle: B\ndate: 2024-01-02\ndraft: true\n---\nB.\n"),
        ]);

        let loader = ContentLoader::new(&app);
        let posts = loader.load_posts(false).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "A");

        let posts = loader.load_posts(true).unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_date_and_slug_from_filename() {
        let (_tmp, app) = site_with_posts(&[(
            "2024-03-09-spring-notes.md",
            "---\ntitle: Spring Notes\n---\nBody.\n",
        )]);

        let posts = ContentLoader::new(&app).load_posts(false).unwrap();
        assert_eq!(posts[0].date.format("%Y-%m-%d").to_string(), "2024-03-09");
        assert_eq!(posts[0].slug, "spring-notes");
        assert_eq!(posts[0].url, "/posts/spring-notes/");
    }

    #[test]
    fn test_index_maps_to_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("posts/deep-dive")).unwrap();
        fs::write(
            tmp.path().join("posts/deep-dive/index.md"),
            "---\ntitle: Deep Dive\ndate: 2024-01-01\n---\nBody.\n",
        )
        .unwrap();
        let app = Eleventy::new(tmp.path()).unwrap();

        let posts = ContentLoader::new(&app).load_posts(false).unwrap();
        assert_eq!(posts[0].url, "/posts/deep-dive/");
    }

    #[test]
    fn test_permalink_override() {
        let (_tmp, app) = site_with_posts(&[(
            "hello.md",
            "---\ntitle: Hello\ndate: 2024-01-01\npermalink: /special/place/\n---\nBody.\n",
        )]);

        let posts = ContentLoader::new(&app).load_posts(false).unwrap();
        assert_eq!(posts[0].url, "/special/place/");
        assert_eq!(
            posts[0].permalink,
            "http://example.com/special/place/"
        );
    }

    #[test]
    fn test_base_dir_with_glob_metacharacters() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("site[1]");
        fs::create_dir_all(base.join("posts")).unwrap();
        fs::write(
            base.join("posts/hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\n---\nBody.\n",
        )
        .unwrap();
        let app = Eleventy::new(&base).unwrap();

        let posts = ContentLoader::new(&app).load_posts(false).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "/posts/hello/");
    }

    #[test]
    fn test_unreadable_post_is_skipped() {
        let (tmp, app) = site_with_posts(&[(
            "good.md",
            "---\ntitle: Good\ndate: 2024-01-01\n---\nBody.\n",
        )]);
        // Invalid UTF-8 makes read_to_string fail; the loader warns and moves on
        fs::write(tmp.path().join("posts/bad.md"), [0xff, 0xfe, 0x00]).unwrap();

        let posts = ContentLoader::new(&app).load_posts(false).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");
    }

    #[test]
    fn test_split_date_prefix() {
        let (date, rest) = split_date_prefix("2024-01-15-hello-world");
        assert_eq!(date.unwrap().format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(rest, "hello-world");

        let (date, rest) = split_date_prefix("hello-world");
        assert!(date.is_none());
        assert_eq!(rest, "hello-world");

        // A bare date is a name, not a prefix
        let (date, rest) = split_date_prefix("2024-01-15");
        assert!(date.is_none());
        assert_eq!(rest, "2024-01-15");
    }
}
