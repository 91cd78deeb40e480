//! Get command implementation

use std::path::Path;

use anyhow::{Context, Result, bail};

pub fn execute(file: &Path, path: &str, default: Option<&str>) -> Result<()> {
    let options = super::load(file)?;
    let segments: Vec<&str> = path.split('.').collect();

    match (options.get_path(segments.as_slice()), default) {
        (Some(value), _) => super::print_json(value),
        (None, Some(default)) => {
            let default: serde_json::Value = serde_json::from_str(default)
                .with_context(|| format!("Invalid JSON for --default: {}", default))?;
            super::print_json(&default)
        }
        (None, None) => bail!("No value at `{}` in {}", path, file.display()),
    }
}
