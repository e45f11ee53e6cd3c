//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Eleventy;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("_includes/layouts"))?;
    fs::create_dir_all(target_dir.join("assets/css"))?;

    // Create default eleventy.yml
    let config_content = r#"# Site
title: Eleventy
subtitle: ''
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
dir:
  input: ''
  includes: _includes
  layouts: _includes/layouts
  output: _site

# Content
posts: posts/**/*.md
passthrough:
  - assets

# Writing
render_drafts: false
"#;

    fs::write(target_dir.join("eleventy.yml"), config_content)?;

    // Base layout shared by every page
    let base_layout = r#"<!doctype html>
<html lang="{{ site.language }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}{{ site.title }}{% endblock %}</title>
  <link rel="stylesheet" href="/assets/css/style.css">
</head>
<body>
  <header>
    <a href="/">{{ site.title }}</a>
  </header>
  <main>
    {% block content %}{% endblock %}
  </main>
  <footer>
    <p>{{ site.author }}</p>
  </footer>
</body>
</html>
"#;

    // Post layout with date, reading time and neighbor navigation
    let post_layout = r#"{% extends "layouts/base.html" %}

{% block title %}{{ page.title }} - {{ site.title }}{% endblock %}

{% block content %}
<article>
  <h1>{{ page.title }}</h1>
  <p class="meta">
    <time>{{ page.date | date(format="MMMM d, yyyy") }}</time>
    &middot; {{ content | readingTime }}
  </p>
  {{ content }}
</article>
<nav class="post-nav">
  {% set newer = collections.posts | getPrevious(page=page) %}
  {% set older = collections.posts | getNext(page=page) %}
  {% if newer %}<a href="{{ newer.url }}">&larr; {{ newer.title }}</a>{% endif %}
  {% if older %}<a href="{{ older.url }}">{{ older.title }} &rarr;</a>{% endif %}
</nav>
{% endblock %}
"#;

    // Home page listing recent posts and one category
    let index_page = r#"{% extends "layouts/base.html" %}

{% block content %}
<h1>Latest posts</h1>
<ul class="post-list">
  {% for post in collections.posts | slice(start=0, end=10) %}
  <li>
    <a href="{{ post.url }}">{{ post.title }}</a>
    <time>{{ post.date | date }}</time>
  </li>
  {% endfor %}
</ul>

<h2>Notes</h2>
<ul class="post-list">
  {% for post in collections.posts | filterByCategory(category="notes") %}
  <li><a href="{{ post.url }}">{{ post.title }}</a></li>
  {% endfor %}
</ul>
{% endblock %}
"#;

    let stylesheet = r#"body {
  max-width: 42rem;
  margin: 0 auto;
  padding: 1rem;
  font-family: system-ui, sans-serif;
  line-height: 1.6;
}

.meta {
  color: #666;
}

.post-list {
  list-style: none;
  padding: 0;
}

.post-nav {
  display: flex;
  justify-content: space-between;
  margin-top: 2rem;
}
"#;

    fs::write(
        target_dir.join("_includes/layouts/base.html"),
        base_layout,
    )?;
    fs::write(
        target_dir.join("_includes/layouts/post.html"),
        post_layout,
    )?;
    fs::write(target_dir.join("index.html"), index_page)?;
    fs::write(target_dir.join("assets/css/style.css"), stylesheet)?;

    // Create a sample post
    let now = chrono::Utc::now();
    let sample_post = format!(
        r#"---
title: Welcome
date: {}
categories: notes
---

This is your first post. Edit it, or add more markdown files under
`posts/`.

Build the site with:

```bash
$ eleventy-rs build
```

Or preview it locally with:

```bash
$ eleventy-rs serve
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("posts/welcome.md"), sample_post)?;

    Ok(())
}

/// Run the init command against an existing instance
pub fn run(app: &Eleventy) -> Result<()> {
    init_site(&app.base_dir)
}
