//! Generator module - renders the site into the output directory

use anyhow::Result;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::collection::PostCollection;
use crate::content::Post;
use crate::filters::FilterBindings;
use crate::Eleventy;

/// Static site generator backed by Tera templates
pub struct Generator {
    app: Eleventy,
    tera: Tera,
    layout_prefix: String,
    page_templates: Vec<String>,
}

/// Collections exposed to every template
#[derive(Serialize)]
struct Collections<'a> {
    posts: &'a [Post],
}

/// Minimal page data for site pages that are not posts
#[derive(Serialize)]
struct PageRef {
    url: String,
}

impl Generator {
    /// Create a new generator with the given filter set installed
    pub fn new(app: &Eleventy, bindings: &FilterBindings) -> Result<Self> {
        let pattern = format!("{}/**/*.html", app.includes_dir.display());
        let mut tera = Tera::new(&pattern)
            .map_err(|e| anyhow::anyhow!("Failed to load templates from {:?}: {}", pattern, e))?;
        tera.autoescape_on(vec![]);

        // Layout templates are addressed relative to the includes directory
        let layout_prefix = match app.layouts_dir.strip_prefix(&app.includes_dir) {
            Ok(rel) if rel.as_os_str().is_empty() => String::new(),
            Ok(rel) => format!("{}/", rel.display()),
            Err(_) => {
                // Layouts configured outside the includes tree get loaded separately
                let mut files = Vec::new();
                for entry in WalkDir::new(&app.layouts_dir)
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let path = entry.path();
                    if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("html") {
                        let name = path
                            .strip_prefix(&app.layouts_dir)
                            .unwrap_or(path)
                            .to_string_lossy()
                            .to_string();
                        files.push((path.to_path_buf(), Some(format!("layouts/{}", name))));
                    }
                }
                tera.add_template_files(files)
                    .map_err(|e| anyhow::anyhow!("Failed to load layouts: {}", e))?;
                "layouts/".to_string()
            }
        };

        bindings.install(&mut tera);

        let page_templates = load_page_templates(app, &mut tera)?;

        Ok(Self {
            app: app.clone(),
            tera,
            layout_prefix,
            page_templates,
        })
    }

    /// Generate the entire site from a built posts collection
    pub fn generate(&self, collection: &PostCollection) -> Result<()> {
        fs::create_dir_all(&self.app.output_dir)?;

        self.copy_passthrough()?;
        self.generate_post_pages(collection)?;
        self.generate_site_pages(collection)?;

        Ok(())
    }

    /// Create the context every template starts from
    fn base_context(&self, collection: &PostCollection) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.app.config);
        context.insert(
            "collections",
            &Collections {
                posts: collection.posts(),
            },
        );
        context
    }

    /// Render each post through its layout to url/index.html
    fn generate_post_pages(&self, collection: &PostCollection) -> Result<()> {
        for post in collection.posts() {
            let template = format!("{}{}.html", self.layout_prefix, post.layout);

            let mut context = self.base_context(collection);
            context.insert("page", post);
            context.insert("content", &post.content);

            let html = self.tera.render(&template, &context).map_err(|e| {
                anyhow::anyhow!("Failed to render {} with layout {:?}: {}", post.source, template, e)
            })?;

            let output_path = self
                .app
                .output_dir
                .join(post.url.trim_start_matches('/'))
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        tracing::info!("Generated {} post pages", collection.len());
        Ok(())
    }

    /// Render standalone pages, each to its pretty url
    fn generate_site_pages(&self, collection: &PostCollection) -> Result<()> {
        for name in &self.page_templates {
            let url = page_url(name);

            let mut context = self.base_context(collection);
            context.insert("page", &PageRef { url: url.clone() });

            let html = self
                .tera
                .render(name, &context)
                .map_err(|e| anyhow::anyhow!("Failed to render page {:?}: {}", name, e))?;

            let output_path = self
                .app
                .output_dir
                .join(url.trim_start_matches('/'))
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated page: {:?}", output_path);
        }

        if !self.page_templates.is_empty() {
            tracing::info!("Generated {} pages", self.page_templates.len());
        }
        Ok(())
    }

    /// Copy passthrough entries into the output, structure preserved
    fn copy_passthrough(&self) -> Result<()> {
        let mut copied = 0;

        for entry_name in &self.app.config.passthrough {
            let source = self.app.input_dir.join(entry_name);
            if !source.exists() {
                tracing::debug!("Passthrough entry {:?} does not exist, skipping", source);
                continue;
            }

            for entry in WalkDir::new(&source)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }

                let relative = path.strip_prefix(&self.app.input_dir)?;
                let dest = self.app.output_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
                copied += 1;
            }
        }

        if copied > 0 {
            tracing::info!("Copied {} passthrough files", copied);
        }
        Ok(())
    }
}

/// Find standalone html templates in the input tree and register them.
///
/// Underscore-prefixed and hidden directories, the output directory and
/// passthrough entries are not template sources.
fn load_page_templates(app: &Eleventy, tera: &mut Tera) -> Result<Vec<String>> {
    if !app.input_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut names = Vec::new();
    let walker = WalkDir::new(&app.input_dir)
        .into_iter()
        .filter_entry(|e| e.path() == app.input_dir || !is_excluded(app, e.path()));
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("html") {
            let name = path
                .strip_prefix(&app.input_dir)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();
            files.push((path.to_path_buf(), Some(name.clone())));
            names.push(name);
        }
    }
    names.sort();

    tera.add_template_files(files)
        .map_err(|e| anyhow::anyhow!("Failed to load page templates: {}", e))?;
    Ok(names)
}

fn is_excluded(app: &Eleventy, path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.starts_with('_') || name.starts_with('.') || name == "node_modules" {
        return true;
    }
    if path == app.output_dir {
        return true;
    }
    app.config
        .passthrough
        .iter()
        .any(|entry| app.input_dir.join(entry) == path)
}

/// Pretty url for a standalone page template: `about.html` serves from
/// `/about/`, an `index.html` from its directory.
fn page_url(template_name: &str) -> String {
    let without_ext = template_name.trim_end_matches(".html");
    if without_ext == "index" {
        return "/".to_string();
    }
    match without_ext.strip_suffix("/index") {
        Some(dir) => format!("/{}/", dir),
        None => format!("/{}/", without_ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use crate::filters;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn scaffold_site() -> (tempfile::TempDir, Eleventy) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        write(
            &root.join("_includes/layouts/base.html"),
            "<!doctype html>\n<title>{% block title %}{{ site.title }}{% endblock %}</title>\n\
             <main>{% block content %}{% endblock %}</main>\n",
        );
        write(
            &root.join("_includes/layouts/post.html"),
            "{% extends \"layouts/base.html\" %}\n\
             {% block title %}{{ page.title }}{% endblock %}\n\
             {% block content %}<article>{{ content }}</article>\
             <p>{{ page.date | date }} · {{ content | readingTime }}</p>{% endblock %}\n",
        );
        write(
            &root.join("index.html"),
            "{% extends \"layouts/base.html\" %}\n\
             {% block content %}<ul>\
             {% for post in collections.posts | slice(start=0, end=5) %}\
             <li><a href=\"{{ post.url }}\">{{ post.title }}</a></li>\
             {% endfor %}</ul>{% endblock %}\n",
        );
        write(
            &root.join("posts/2024-01-15-first.md"),
            "---\ntitle: First Post\ndate: 2024-01-15\ncategories: faith\n---\n\nHello world.\n",
        );
        write(
            &root.join("posts/2024-02-20-second.md"),
            "---\ntitle: Second Post\ndate: 2024-02-20\n---\n\nMore words here.\n",
        );
        write(&root.join("assets/css/style.css"), "body { margin: 0; }\n");

        let app = Eleventy::new(root).unwrap();
        (tmp, app)
    }

    fn build_collection(app: &Eleventy) -> PostCollection {
        let posts = ContentLoader::new(app).load_posts(false).unwrap();
        PostCollection::build(posts)
    }

    #[test]
    fn test_generate_writes_post_pages() {
        let (_tmp, app) = scaffold_site();
        let collection = build_collection(&app);
        let generator = Generator::new(&app, &filters::bindings()).unwrap();
        generator.generate(&collection).unwrap();

        let first = app.output_dir.join("posts/first/index.html");
        let html = fs::read_to_string(&first).unwrap();
        assert!(html.contains("<title>First Post</title>"));
        assert!(html.contains("Hello world."));
        assert!(html.contains("Jan 15, 2024"));
        assert!(html.contains("1 min read"));

        assert!(app.output_dir.join("posts/second/index.html").exists());
    }

    #[test]
    fn test_generate_renders_index_with_newest_first() {
        let (_tmp, app) = scaffold_site();
        let collection = build_collection(&app);
        let generator = Generator::new(&app, &filters::bindings()).unwrap();
        generator.generate(&collection).unwrap();

        let html = fs::read_to_string(app.output_dir.join("index.html")).unwrap();
        let second = html.find("Second Post").unwrap();
        let first = html.find("First Post").unwrap();
        assert!(second < first, "newest post should be listed first");
    }

    #[test]
    fn test_generate_copies_passthrough_assets() {
        let (_tmp, app) = scaffold_site();
        let collection = build_collection(&app);
        let generator = Generator::new(&app, &filters::bindings()).unwrap();
        generator.generate(&collection).unwrap();

        let css = app.output_dir.join("assets/css/style.css");
        assert_eq!(fs::read_to_string(css).unwrap(), "body { margin: 0; }\n");
    }

    #[test]
    fn test_missing_layout_is_an_error() {
        let (tmp, app) = scaffold_site();
        write(
            &tmp.path().join("posts/odd.md"),
            "---\ntitle: Odd\ndate: 2024-03-01\nlayout: missing\n---\nBody.\n",
        );

        let collection = build_collection(&app);
        let generator = Generator::new(&app, &filters::bindings()).unwrap();
        let err = generator.generate(&collection).unwrap_err();
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn test_page_url() {
        assert_eq!(page_url("index.html"), "/");
        assert_eq!(page_url("about.html"), "/about/");
        assert_eq!(page_url("notes/index.html"), "/notes/");
        assert_eq!(page_url("notes/plan.html"), "/notes/plan/");
    }
}
