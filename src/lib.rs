//! eleventy-rs: A fast static site generator for Eleventy-flavored blogs
//!
//! This crate renders a markdown blog through Tera templates, exposing the
//! filters and the newest-first posts collection those templates expect.

pub mod collection;
pub mod commands;
pub mod config;
pub mod content;
pub mod filters;
pub mod generator;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application
#[derive(Clone)]
pub struct Eleventy {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Input (content) directory
    pub input_dir: PathBuf,
    /// Includes directory, where templates live
    pub includes_dir: PathBuf,
    /// Layouts directory
    pub layouts_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Eleventy {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        // An empty input maps content directly onto the base directory
        let input_dir = if config.dir.input.is_empty() {
            base_dir.clone()
        } else {
            base_dir.join(&config.dir.input)
        };
        // Includes and layouts hang off the input tree; output hangs off the root
        let includes_dir = input_dir.join(&config.dir.includes);
        let layouts_dir = input_dir.join(&config.dir.layouts);
        let output_dir = base_dir.join(&config.dir.output);

        Ok(Self {
            config,
            base_dir,
            input_dir,
            includes_dir,
            layouts_dir,
            output_dir,
        })
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Build the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
