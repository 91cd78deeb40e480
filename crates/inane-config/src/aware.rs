//! Traits for components that receive their options from outside.

use crate::options::Options;
use crate::types::{OptionKey, Value};
use indexmap::IndexMap;

/// A component that accepts its options once.
///
/// The first call to [`OptionsAware::set_options`] stores the options; later
/// calls are ignored and return the options already stored.
pub trait OptionsAware {
    /// Storage slot for the options.
    fn options_slot(&mut self) -> &mut Option<Options>;

    fn set_options(&mut self, options: Options) -> &Options {
        self.options_slot().get_or_insert(options)
    }
}

/// Configuration handed to a [`ConfigAware`] component.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    Map(IndexMap<OptionKey, Value>),
    Options(Options),
}

impl From<IndexMap<OptionKey, Value>> for ConfigSource {
    fn from(map: IndexMap<OptionKey, Value>) -> Self {
        ConfigSource::Map(map)
    }
}

impl From<Options> for ConfigSource {
    fn from(options: Options) -> Self {
        ConfigSource::Options(options)
    }
}

impl From<ConfigSource> for Options {
    fn from(source: ConfigSource) -> Self {
        match source {
            ConfigSource::Map(map) => Options::from(map),
            ConfigSource::Options(options) => options,
        }
    }
}

/// A component whose configuration can be replaced at any time.
pub trait ConfigAware {
    fn config_slot(&mut self) -> &mut Options;

    /// Replace the configuration, wrapping plain maps into [`Options`].
    fn set_config(&mut self, config: impl Into<ConfigSource>) {
        *self.config_slot() = Options::from(config.into());
    }
}
