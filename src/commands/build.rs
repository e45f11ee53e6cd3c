//! Build the site into the output directory

use anyhow::Result;

use crate::collection::PostCollection;
use crate::content::ContentLoader;
use crate::filters;
use crate::generator::Generator;
use crate::Eleventy;

/// Build the site
pub fn run(app: &Eleventy) -> Result<()> {
    run_with_options(app, false)
}

/// Build the site, optionally including drafts
pub fn run_with_options(app: &Eleventy, include_drafts: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(app);
    let posts = loader.load_posts(include_drafts)?;
    tracing::info!("Loaded {} posts", posts.len());

    let collection = PostCollection::build(posts);

    let bindings = filters::bindings();
    let generator = Generator::new(app, &bindings)?;
    generator.generate(&collection)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}
