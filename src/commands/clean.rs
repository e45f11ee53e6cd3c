//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Eleventy;

/// Remove the output directory
pub fn run(app: &Eleventy) -> Result<()> {
    if app.output_dir.exists() {
        fs::remove_dir_all(&app.output_dir)?;
        tracing::info!("Deleted: {:?}", app.output_dir);
    }

    Ok(())
}
