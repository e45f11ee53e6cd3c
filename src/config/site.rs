//! Site configuration (eleventy.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the site configuration file, looked up in the base directory.
pub const CONFIG_FILE: &str = "eleventy.yml";

/// Errors raised while loading a site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory roles
    pub dir: DirConfig,

    /// Glob selecting the posts collection, relative to the input root
    pub posts: String,

    /// Directories copied verbatim into the output root
    pub passthrough: Vec<String>,

    /// Render posts marked `draft: true`
    pub render_drafts: bool,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Eleventy".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            dir: DirConfig::default(),

            posts: "posts/**/*.md".to_string(),
            passthrough: vec!["assets".to_string()],
            render_drafts: false,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Directory mapping with fixed roles.
///
/// `input` and `output` are relative to the base directory; `includes`
/// and `layouts` are relative to the input directory, with `layouts`
/// conventionally a subpath of `includes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirConfig {
    pub input: String,
    pub includes: String,
    pub layouts: String,
    pub output: String,
}

impl Default for DirConfig {
    fn default() -> Self {
        Self {
            input: String::new(),
            includes: "_includes".to_string(),
            layouts: "_includes/layouts".to_string(),
            output: "_site".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Eleventy");
        assert_eq!(config.posts, "posts/**/*.md");
        assert_eq!(config.passthrough, vec!["assets"]);
        assert!(!config.render_drafts);
    }

    #[test]
    fn test_default_dirs() {
        let dir = DirConfig::default();
        assert_eq!(dir.input, "");
        assert_eq!(dir.includes, "_includes");
        assert_eq!(dir.layouts, "_includes/layouts");
        assert_eq!(dir.output, "_site");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
url: https://blog.example.com
posts: writing/**/*.md
passthrough:
  - assets
  - static
dir:
  output: dist
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.posts, "writing/**/*.md");
        assert_eq!(config.passthrough, vec!["assets", "static"]);
        assert_eq!(config.dir.output, "dist");
        // Unlisted roles keep their defaults
        assert_eq!(config.dir.includes, "_includes");
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let yaml = r#"
title: My Blog
github_username: someone
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.extra.get("github_username").and_then(|v| v.as_str()),
            Some("someone")
        );
    }
}
