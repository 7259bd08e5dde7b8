//! The table type: an ordered map of string keys to values.
//!
//! [`Table`] backs every `[section]` of a document, every inline table, and
//! the document root itself. It wraps an [`IndexMap`] so that iteration and
//! serialization follow insertion order — the TOML data model leaves key
//! order unspecified, so a deterministic order is a permitted refinement
//! and makes output and tests reproducible.
//!
//! ## Qualified keys
//!
//! A *qualified key* is a dot-separated path such as `server.http.port`
//! that descends through nested tables. Resolution is strict: every
//! intermediate component must be a table, otherwise the key is simply not
//! present.
//!
//! ```rust
//! let doc = tomldoc::from_str(r#"
//! [server.http]
//! port = 8080
//! "#).unwrap();
//!
//! assert!(doc.contains_qualified("server.http.port"));
//! assert_eq!(doc.get_qualified_as::<u16>("server.http.port").unwrap(), Some(8080));
//! assert_eq!(doc.get_qualified_as::<u16>("server.tcp.port").unwrap(), None);
//! ```

use crate::value::{Array, FromValue, TableArray, Value};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered map of string keys to TOML values.
///
/// Keys may be any UTF-8 string; the serializer quotes the ones that are
/// not bare-key safe. [`insert`](Table::insert) overwrites; key uniqueness
/// is therefore structural.
///
/// Two private flags (`explicit`, `inline`) record how the parser first saw
/// the table — declared by a `[header]` or inline literal, and whether it
/// is an inline table closed to later extension. They constrain the parser
/// only: user-code mutation ignores them and equality does not compare
/// them.
#[derive(Clone, Debug, Default)]
pub struct Table {
    items: IndexMap<String, Value>,
    pub(crate) explicit: bool,
    pub(crate) inline: bool,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Table {
            items: IndexMap::new(),
            explicit: false,
            inline: false,
        }
    }

    /// Creates an empty table with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            items: IndexMap::with_capacity(capacity),
            explicit: false,
            inline: false,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Determines if this table contains the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Returns a reference to the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// Returns a mutable reference to the value for `key`, if present.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.items.get_mut(key)
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    pub fn insert(&mut self, key: String, value: impl Into<Value>) -> Option<Value> {
        self.items.insert(key, value.into())
    }

    /// Removes an entry, returning its value if the key was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.items.shift_remove(key)
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.items.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.items.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.items.iter()
    }

    /// Returns a mutable iterator over the entries, in insertion order.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.items.iter_mut()
    }

    /// Determines if this table contains the given qualified key
    /// (`"grandparent.parent.child"`).
    #[must_use]
    pub fn contains_qualified(&self, key: &str) -> bool {
        self.resolve_qualified(key).is_some()
    }

    /// Returns the value for a qualified key.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] when the key does not resolve —
    /// either a component is missing or an intermediate is not a table.
    pub fn get_qualified(&self, key: &str) -> Result<&Value> {
        self.resolve_qualified(key)
            .ok_or_else(|| Error::not_found(key))
    }

    /// Returns the table for `key`, if present as a table.
    #[must_use]
    pub fn get_table(&self, key: &str) -> Option<&Table> {
        self.get(key).and_then(Value::as_table)
    }

    /// Returns the array for `key`, if present as an array.
    #[must_use]
    pub fn get_array(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(Value::as_array)
    }

    /// Returns the table array for `key`, if present as a table array.
    #[must_use]
    pub fn get_table_array(&self, key: &str) -> Option<&TableArray> {
        self.get(key).and_then(Value::as_table_array)
    }

    /// Returns the table for a qualified key, if it resolves to a table.
    #[must_use]
    pub fn get_table_qualified(&self, key: &str) -> Option<&Table> {
        self.resolve_qualified(key).and_then(Value::as_table)
    }

    /// Returns the array for a qualified key, if it resolves to an array.
    #[must_use]
    pub fn get_array_qualified(&self, key: &str) -> Option<&Array> {
        self.resolve_qualified(key).and_then(Value::as_array)
    }

    /// Returns the table array for a qualified key, if it resolves to one.
    #[must_use]
    pub fn get_table_array_qualified(&self, key: &str) -> Option<&TableArray> {
        self.resolve_qualified(key).and_then(Value::as_table_array)
    }

    /// Attempts to fetch the value for `key` as a `T`.
    ///
    /// A missing key or a variant mismatch yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Range`] when the entry is an integer that does
    /// not fit the requested integer target type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let doc = tomldoc::from_str("port = 8080\nname = \"srv\"").unwrap();
    /// assert_eq!(doc.get_as::<u16>("port").unwrap(), Some(8080));
    /// assert_eq!(doc.get_as::<String>("name").unwrap().as_deref(), Some("srv"));
    /// assert_eq!(doc.get_as::<bool>("port").unwrap(), None);
    /// assert!(doc.get_as::<u8>("port").is_err());
    /// ```
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(value) => T::from_value(value),
            None => Ok(None),
        }
    }

    /// Attempts to fetch the value for a qualified key as a `T`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Range`] under the same rules as
    /// [`get_as`](Table::get_as); an unresolved path yields `Ok(None)`.
    pub fn get_qualified_as<T: FromValue>(&self, key: &str) -> Result<Option<T>> {
        match self.resolve_qualified(key) {
            Some(value) => T::from_value(value),
            None => Ok(None),
        }
    }

    /// Fetches the array for `key` and extracts every element as a `T`.
    ///
    /// Absent when the key is missing, is not an array, or any element
    /// fails the extraction.
    #[must_use]
    pub fn get_vec<T: FromValue>(&self, key: &str) -> Option<Vec<T>> {
        self.get_array(key).and_then(Array::as_vec)
    }

    /// Fetches the array for a qualified key and extracts every element as
    /// a `T`.
    #[must_use]
    pub fn get_qualified_vec<T: FromValue>(&self, key: &str) -> Option<Vec<T>> {
        self.get_array_qualified(key).and_then(Array::as_vec)
    }

    /// Returns `true` when any entry is a scalar or an array. The parser
    /// uses this to decide whether a `[header]` may reopen the table.
    pub(crate) fn has_direct_values(&self) -> bool {
        self.items
            .values()
            .any(|v| !matches!(v, Value::Table(_) | Value::TableArray(_)))
    }

    fn resolve_qualified(&self, key: &str) -> Option<&Value> {
        let mut current = self;
        let mut parts = key.split('.').peekable();
        loop {
            let part = parts.next()?;
            if parts.peek().is_none() {
                return current.items.get(part);
            }
            current = current.items.get(part)?.as_table()?;
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        // the explicit/inline flags are parser bookkeeping, not content
        self.items == other.items
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table {
            items: IndexMap::from_iter(iter),
            explicit: false,
            inline: false,
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, value) in &self.items {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
