//! Command implementations for the inane CLI
//!
//! Each command loads its input files through `inane_config` and prints the
//! result as pretty JSON on stdout.

pub mod defaults;
pub mod get;
pub mod merge;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};
use inane_config::Options;
use serde::Serialize;

/// Load a single options file, attaching the path to any error.
pub(crate) fn load(path: &Path) -> Result<Options> {
    inane_config::load_file(path)
        .with_context(|| format!("Failed to load options from {}", path.display()))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize options")?;
    println!("{}", json);
    Ok(())
}
