//! Hierarchical, ordered options containers.
//!
//! This crate provides [`Options`], a configuration tree built from nested
//! mappings, with explicit merge rules, defaults backfilling and an
//! irreversible read-only lock.
//!
//! # Key Features
//!
//! - **Ordered**: entries keep insertion order, iteration never sorts
//! - **Merge**: integer keys append, string keys merge recursively or overwrite
//! - **Defaults**: only absent, empty-string or null entries are filled
//! - **Lock**: cascades to every child present when the lock is taken
//! - **Formats**: JSON, YAML and TOML documents load into the same tree
//!
//! # Architecture
//!
//! - [`Options`]: the container (one node of the tree)
//! - [`Value`]: plain nested mapping used to build and export trees
//! - [`OptionValue`]: what a node stores, a [`Scalar`] or a child node
//! - [`OptionsLoader`]: composes options from files
//!
//! # Example
//!
//! ```rust
//! use inane_config::{Options, options};
//!
//! let mut base = Options::from(options! { "plugins" => options! { 0 => "auth" } });
//! let extra = Options::from(options! { "plugins" => options! { 0 => "cache" } });
//! base.merge(&extra)?;
//!
//! assert_eq!(
//!     base.to_map(),
//!     options! { "plugins" => options! { 0 => "auth", 1 => "cache" } }
//! );
//! # Ok::<(), inane_config::OptionsError>(())
//! ```

mod aware;
mod convert;
mod loader;
mod options;
mod types;

pub use types::{
    Mutation,
    OptionKey,
    OptionValue,
    OptionsError,
    Scalar,
    Value,
};

pub use options::Options;

pub use convert::{
    from_json,
    from_toml,
    from_yaml,
    to_json,
    value_from_json,
    value_from_toml,
    value_from_yaml,
};

pub use loader::{
    Format,
    LoadError,
    OptionsLoader,
    load_file,
    parse_str,
};

pub use aware::{
    ConfigAware,
    ConfigSource,
    OptionsAware,
};

// Re-export for convenience
pub use indexmap::IndexMap;

/// Build an `IndexMap<OptionKey, Value>` literal.
///
/// Keys go through `OptionKey::from`, values through `Value::from`, so nested
/// `options!` calls produce nested maps.
///
/// ```rust
/// use inane_config::{OptionKey, Value, options};
///
/// let map = options! { "name" => "app", 0 => true, "db" => options! {} };
/// assert_eq!(map[&OptionKey::from("name")], Value::from("app"));
/// ```
#[macro_export]
macro_rules! options {
    () => {
        $crate::IndexMap::<$crate::OptionKey, $crate::Value>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::IndexMap::<$crate::OptionKey, $crate::Value>::new();
        $(
            map.insert($crate::OptionKey::from($key), $crate::Value::from($value));
        )+
        map
    }};
}
