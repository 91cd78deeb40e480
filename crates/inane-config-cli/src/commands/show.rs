//! Show command implementation

use std::path::Path;

use anyhow::Result;

pub fn execute(file: &Path) -> Result<()> {
    let options = super::load(file)?;
    super::print_json(&options)
}
