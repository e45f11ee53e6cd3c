//! List site content

use anyhow::Result;

use crate::collection::PostCollection;
use crate::content::ContentLoader;
use crate::Eleventy;

/// List site content by type
pub fn run(app: &Eleventy, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(app);
    let collection = PostCollection::build(loader.load_posts(true)?);

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", collection.len());
            for post in collection.posts() {
                println!(
                    "  {} - {}{} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    if post.draft { " (draft)" } else { "" },
                    post.source
                );
            }
        }
        "category" | "categories" => {
            let categories = collection.categories();
            println!("Categories ({}):", categories.len());
            for category in categories {
                let count = collection.filter_by_category(&category).len();
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}
