//! Defaults command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use inane_config::OptionsLoader;
use tracing::debug;

pub fn execute(file: &Path, models: &[PathBuf]) -> Result<()> {
    let loader = models
        .iter()
        .fold(OptionsLoader::new().layer(file), |loader, model| loader.defaults(model));
    let options = loader
        .load()
        .with_context(|| format!("Failed to apply defaults to {}", file.display()))?;

    debug!(models = models.len(), "applied defaults");
    super::print_json(&options)
}
