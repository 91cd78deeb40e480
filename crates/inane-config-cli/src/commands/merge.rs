//! Merge command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use inane_config::OptionsLoader;
use tracing::debug;

pub fn execute(files: &[PathBuf]) -> Result<()> {
    let loader = files
        .iter()
        .fold(OptionsLoader::new(), |loader, file| loader.layer(file));
    let options = loader.load().context("Failed to merge options files")?;

    debug!(layers = files.len(), entries = options.len(), "merged options");
    super::print_json(&options)
}
