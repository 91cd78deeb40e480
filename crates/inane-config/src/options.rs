//! The hierarchical options container.
//!
//! `Options` is an ordered tree of key/value entries. Nested mappings are
//! always wrapped into child nodes, so a tree is built from, and converts back
//! into, a plain nested [`Value`] map.
//!
//! # Merge semantics
//!
//! - [`Options::merge`]: integer keys append, string keys recurse into nested
//!   nodes or overwrite. Nothing from the other tree is dropped.
//! - [`Options::defaults`]: fills only absent or replaceable (`""`/null)
//!   entries. With several models the first one wins.
//!
//! # Locking
//!
//! [`Options::lock`] is irreversible and cascades to every child present at
//! that moment. Mutations on a locked node fail with
//! [`OptionsError::ReadOnly`].
//!
//! # Example
//!
//! ```rust
//! use inane_config::{Options, OptionsError, options};
//!
//! let mut config = Options::from(options! {
//!     "db" => options! { "host" => "", "port" => 5432 },
//! });
//! let model = Options::from(options! {
//!     "db" => options! { "host" => "localhost", "port" => 9999 },
//! });
//!
//! config.defaults(&[&model])?.lock();
//! assert_eq!(config.get_path(&["db", "host"]).and_then(|v| v.as_str()), Some("localhost"));
//! assert!(config.set("debug", true).unwrap_err().is_read_only());
//! # Ok::<(), OptionsError>(())
//! ```

use crate::types::{Mutation, OptionKey, OptionValue, OptionsError, Value};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// One level of a hierarchical configuration tree.
#[derive(Debug, Clone, Default)]
pub struct Options {
    data: IndexMap<OptionKey, OptionValue>,

    locked: bool,

    /// Index used by the next append (one past the largest non-negative
    /// integer key ever stored here). Reaches `i64::MAX + 1` once the last
    /// index is taken, which is why it is unsigned.
    next_index: u64,
}

impl Options {
    /// Build a node from a plain mapping.
    ///
    /// Nested maps become child nodes sharing the same `allow_modifications`
    /// setting. Passing `false` produces a tree that is locked from the start.
    pub fn new(data: IndexMap<OptionKey, Value>, allow_modifications: bool) -> Self {
        let mut options = Options::default();
        for (key, value) in data {
            options.insert(key, OptionValue::wrap(value, allow_modifications));
        }
        options.locked = !allow_modifications;
        options
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the node has no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if a key is present (a stored null counts as present).
    pub fn contains_key(&self, key: impl Into<OptionKey>) -> bool {
        self.data.contains_key(&key.into().normalize())
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: impl Into<OptionKey>) -> Option<&OptionValue> {
        self.data.get(&key.into().normalize())
    }

    /// Get the value stored under `key`, or `default` when it is absent.
    pub fn get_or<'a>(&'a self, key: impl Into<OptionKey>, default: &'a OptionValue) -> &'a OptionValue {
        self.get(key).unwrap_or(default)
    }

    /// Walk nested nodes along `path`.
    ///
    /// An empty path yields `None`; there is no value for the node itself.
    pub fn get_path<K>(&self, path: &[K]) -> Option<&OptionValue>
    where
        K: Clone + Into<OptionKey>,
    {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.node(key.clone())?;
        }
        current.get(last.clone())
    }

    /// Get a child node.
    pub fn node(&self, key: impl Into<OptionKey>) -> Option<&Options> {
        self.get(key).and_then(OptionValue::as_node)
    }

    /// Get a child node for mutation.
    ///
    /// Returns `None` when this node is locked. An unlocked node may still
    /// hold a locked child, which then rejects mutations itself.
    pub fn node_mut(&mut self, key: impl Into<OptionKey>) -> Option<&mut Options> {
        if self.locked {
            return None;
        }
        match self.data.get_mut(&key.into().normalize()) {
            Some(OptionValue::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Assign `value` to `key`.
    ///
    /// Nested maps are wrapped into a new, modifiable child node. Replacing an
    /// existing key keeps its position.
    pub fn set(&mut self, key: impl Into<OptionKey>, value: impl Into<Value>) -> Result<&mut Self, OptionsError> {
        let key = key.into().normalize();
        self.ensure_unlocked(Mutation::Set, &key)?;
        self.insert(key, OptionValue::wrap(value.into(), true));
        Ok(self)
    }

    /// Append `value` under the next free integer index.
    ///
    /// Fails with [`OptionsError::InvalidArgument`] once `i64::MAX` has been
    /// used as a key, since there is no index left to append to.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<&mut Self, OptionsError> {
        let key = i64::try_from(self.next_index)
            .map(OptionKey::Index)
            .map_err(|_| OptionsError::invalid("no integer index left to append to"))?;
        self.ensure_unlocked(Mutation::Push, &key)?;
        self.insert(key, OptionValue::wrap(value.into(), true));
        Ok(self)
    }

    /// Remove `key`. Absent keys are ignored.
    pub fn unset(&mut self, key: impl Into<OptionKey>) -> Result<&mut Self, OptionsError> {
        let key = key.into().normalize();
        self.ensure_unlocked(Mutation::Unset, &key)?;
        self.data.shift_remove(&key);
        Ok(self)
    }

    /// Iterate over direct children in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, OptionKey, OptionValue> {
        self.data.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, OptionKey, OptionValue> {
        self.data.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, OptionKey, OptionValue> {
        self.data.values()
    }

    /// Convert the tree back into a plain nested map.
    pub fn to_map(&self) -> IndexMap<OptionKey, Value> {
        self.data
            .iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect()
    }

    /// Like [`Options::to_map`], consuming the tree.
    pub fn into_map(self) -> IndexMap<OptionKey, Value> {
        self.data
            .into_iter()
            .map(|(key, value)| (key, value.into_value()))
            .collect()
    }

    /// Convert the tree into a [`Value::Map`].
    pub fn to_value(&self) -> Value {
        Value::Map(self.to_map())
    }

    /// Backfill absent or replaceable entries from `models`.
    ///
    /// For every key of a model:
    /// - both sides are nodes: recurse
    /// - absent here, or stored value is `""`/null: take a copy of the model's value
    /// - otherwise the existing value is kept
    ///
    /// Models are listed in decreasing importance, so when several models
    /// provide the same missing key the first one wins.
    ///
    /// Either every fill is applied or, on error, none is.
    pub fn defaults(&mut self, models: &[&Options]) -> Result<&mut Self, OptionsError> {
        let mut staged = self.clone();
        for model in models {
            staged.backfill(model)?;
        }
        *self = staged;
        Ok(self)
    }

    /// Merge another tree into this one.
    ///
    /// For duplicate keys:
    /// - non-negative integer keys: the incoming value is appended
    /// - both values are nodes: merged recursively
    /// - otherwise: the incoming value overwrites the current one
    ///
    /// Incoming nodes are deep copied. Either the whole merge is applied or,
    /// on error, nothing is.
    pub fn merge(&mut self, other: &Options) -> Result<&mut Self, OptionsError> {
        let mut staged = self.clone();
        staged.merge_from(other)?;
        *self = staged;
        Ok(self)
    }

    /// Make this node and all of its current children read-only.
    pub fn lock(&mut self) -> &mut Self {
        self.locked = true;
        for value in self.data.values_mut() {
            if let OptionValue::Node(node) = value {
                node.lock();
            }
        }
        self
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn backfill(&mut self, model: &Options) -> Result<(), OptionsError> {
        for (key, value) in model.iter() {
            if let OptionValue::Node(model_node) = value {
                if let Some(OptionValue::Node(node)) = self.data.get_mut(key) {
                    node.backfill(model_node)?;
                    continue;
                }
            }

            let fill = self
                .data
                .get(key)
                .is_none_or(OptionValue::is_replaceable);
            if fill {
                self.set(key, value.to_value())?;
            }
        }
        Ok(())
    }

    fn merge_from(&mut self, other: &Options) -> Result<(), OptionsError> {
        for (key, value) in other.iter() {
            if !self.data.contains_key(key) {
                self.set(key, value.to_value())?;
                continue;
            }

            if key.is_index() {
                self.push(value.to_value())?;
                continue;
            }

            if let OptionValue::Node(theirs) = value {
                if let Some(OptionValue::Node(ours)) = self.data.get_mut(key) {
                    ours.merge_from(theirs)?;
                    continue;
                }
            }

            self.set(key, value.to_value())?;
        }
        Ok(())
    }

    fn ensure_unlocked(&self, operation: Mutation, key: &OptionKey) -> Result<(), OptionsError> {
        if self.locked {
            return Err(OptionsError::ReadOnly {
                operation,
                key: key.clone(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, key: OptionKey, value: OptionValue) {
        let key = key.normalize();
        if let OptionKey::Index(index) = key {
            if let Ok(index) = u64::try_from(index) {
                self.next_index = self.next_index.max(index + 1);
            }
        }
        self.data.insert(key, value);
    }
}

/// Two nodes are equal when they hold the same entries and lock state. The
/// append cursor is bookkeeping and does not take part.
impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.locked == other.locked && self.data == other.data
    }
}

impl From<IndexMap<OptionKey, Value>> for Options {
    fn from(data: IndexMap<OptionKey, Value>) -> Self {
        Options::new(data, true)
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a OptionKey, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, OptionKey, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Options {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.data)
    }
}
