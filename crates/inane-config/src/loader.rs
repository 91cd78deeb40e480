//! Loading options from configuration files.
//!
//! Files are parsed according to their extension (`.json`, `.yaml`/`.yml`,
//! `.toml`). [`OptionsLoader`] composes several files: layers are merged in
//! order, then defaults files backfill whatever is still missing.
//!
//! # Example
//!
//! ```rust,no_run
//! use inane_config::OptionsLoader;
//!
//! let options = OptionsLoader::new()
//!     .layer("config/app.yaml")
//!     .layer("config/local.toml")
//!     .defaults("config/defaults.json")
//!     .lock(true)
//!     .load()?;
//! # Ok::<(), inane_config::LoadError>(())
//! ```

use crate::convert;
use crate::options::Options;
use crate::types::OptionsError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use yaml_rust2::YamlLoader;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let format = match extension.as_str() {
            "json" => Format::Json,
            "yaml" | "yml" => Format::Yaml,
            "toml" => Format::Toml,
            _ => return None,
        };
        tracing::trace!(path = %path.display(), ?format, "detected options format");
        Some(format)
    }
}

/// Errors that can occur while loading options.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported options file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] yaml_rust2::ScanError),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// Parse a document into options.
pub fn parse_str(source: &str, format: Format) -> Result<Options, LoadError> {
    let options = match format {
        Format::Json => convert::from_json(serde_json::from_str(source)?)?,
        Format::Yaml => {
            let documents = YamlLoader::load_from_str(source)?;
            match documents.first() {
                Some(document) => convert::from_yaml(document)?,
                None => Options::default(),
            }
        }
        Format::Toml => convert::from_toml(toml::from_str(source)?),
    };
    Ok(options)
}

/// Read and parse a single file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Options, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let options = parse_str(&source, format)?;
    tracing::debug!(path = %path.display(), entries = options.len(), "loaded options file");
    Ok(options)
}

/// Builder composing options from several files.
#[derive(Debug, Clone, Default)]
pub struct OptionsLoader {
    layers: Vec<PathBuf>,
    defaults: Vec<PathBuf>,
    lock: bool,
}

impl OptionsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer. Later layers are merged over earlier ones.
    pub fn layer(mut self, path: impl Into<PathBuf>) -> Self {
        self.layers.push(path.into());
        self
    }

    /// Add a defaults file. Earlier defaults files take precedence.
    pub fn defaults(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults.push(path.into());
        self
    }

    /// Lock the result after loading.
    pub fn lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    /// Load all files and compose them.
    pub fn load(&self) -> Result<Options, LoadError> {
        let mut options = Options::default();
        for path in &self.layers {
            let layer = load_file(path)?;
            options.merge(&layer)?;
            tracing::debug!(path = %path.display(), "merged options layer");
        }

        let models = self
            .defaults
            .iter()
            .map(load_file)
            .collect::<Result<Vec<_>, _>>()?;
        if !models.is_empty() {
            let models: Vec<&Options> = models.iter().collect();
            options.defaults(&models)?;
            tracing::debug!(count = models.len(), "applied options defaults");
        }

        if self.lock {
            options.lock();
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.YML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("dir/a.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("a.ini")), None);
        assert_eq!(Format::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_parse_str_formats_agree() {
        let expected = options! { "db" => options! { "host" => "h", "port" => 1 } };

        let json = parse_str(r#"{"db": {"host": "h", "port": 1}}"#, Format::Json).unwrap();
        let yaml = parse_str("db:\n  host: h\n  port: 1\n", Format::Yaml).unwrap();
        let toml = parse_str("[db]\nhost = \"h\"\nport = 1\n", Format::Toml).unwrap();

        assert_eq!(json.to_map(), expected);
        assert_eq!(yaml.to_map(), expected);
        assert_eq!(toml.to_map(), expected);
    }

    #[test]
    fn test_parse_str_empty_yaml() {
        assert!(parse_str("", Format::Yaml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_str_errors() {
        assert!(matches!(parse_str("{", Format::Json), Err(LoadError::Json(_))));
        assert!(matches!(parse_str("a: [", Format::Yaml), Err(LoadError::Yaml(_))));
        assert!(matches!(parse_str("a = ", Format::Toml), Err(LoadError::Toml(_))));
        assert!(matches!(
            parse_str("42", Format::Json),
            Err(LoadError::Options(OptionsError::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn test_load_file_unsupported() {
        let err = load_file("settings.ini").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_empty_loader() {
        let options = OptionsLoader::new().load().unwrap();
        assert!(options.is_empty());
        assert!(!options.is_locked());
    }
}
