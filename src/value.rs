//! The document tree value representation.
//!
//! This module provides [`Value`], the tagged sum over every node shape a
//! TOML document can contain, together with the two sequence containers
//! [`Array`] (homogeneous values) and [`TableArray`] (sequences of tables),
//! and the [`FromValue`] trait for typed scalar extraction.
//!
//! ## Core Types
//!
//! - [`Value`]: any TOML node — one of eight scalar shapes, an array, a
//!   table, or a table array
//! - [`Kind`]: the fieldless discriminant of a `Value`, used for
//!   homogeneity checks and error messages
//! - [`Array`]: an ordered sequence of values whose mutators enforce the
//!   TOML homogeneity rule
//! - [`TableArray`]: an ordered sequence of tables, tracking whether it was
//!   declared inline (`[{...}]`) or with `[[name]]` headers
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use tomldoc::Value;
//!
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! assert!(number.is_integer());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use tomldoc::Value;
//!
//! let value = Value::from(42);
//! assert_eq!(value.as_integer(), Some(42));
//! // integers widen losslessly to floats
//! assert_eq!(value.as_float(), Some(42.0));
//! assert_eq!(value.as_str(), None);
//! ```
//!
//! ### Homogeneous Arrays
//!
//! ```rust
//! use tomldoc::{Array, Value};
//!
//! let mut arr = Array::new();
//! arr.push(Value::from(1)).unwrap();
//! arr.push(Value::from(2)).unwrap();
//! assert!(arr.push(Value::from("three")).is_err());
//! assert_eq!(arr.as_vec::<i64>(), Some(vec![1, 2]));
//! ```

use crate::datetime::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
use crate::table::Table;
use crate::{Error, Result};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single node of a TOML document tree.
///
/// The eight scalar variants are the "leaves"; [`Array`], [`Table`], and
/// [`TableArray`] carry the tree structure. Every parent owns its children,
/// and [`Clone`] produces a structurally independent deep copy.
///
/// # Examples
///
/// ```rust
/// use tomldoc::{Kind, Value};
///
/// let v = Value::from(1.5);
/// assert_eq!(v.kind(), Kind::Float);
/// assert!(v.is_scalar());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(LocalDate),
    Time(LocalTime),
    DateTime(LocalDateTime),
    OffsetDateTime(OffsetDateTime),
    Array(Array),
    Table(Table),
    TableArray(TableArray),
}

/// The discriminant of a [`Value`], without its payload.
///
/// Two values may share an array exactly when their kinds are equal, with
/// the one exception that nested arrays need not agree on their inner
/// element kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Float,
    Bool,
    Date,
    Time,
    DateTime,
    OffsetDateTime,
    Array,
    Table,
    TableArray,
}

impl Kind {
    /// Returns the human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Bool => "boolean",
            Kind::Date => "local date",
            Kind::Time => "local time",
            Kind::DateTime => "local datetime",
            Kind::OffsetDateTime => "offset datetime",
            Kind::Array => "array",
            Kind::Table => "table",
            Kind::TableArray => "table array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the [`Kind`] of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Date(_) => Kind::Date,
            Value::Time(_) => Kind::Time,
            Value::DateTime(_) => Kind::DateTime,
            Value::OffsetDateTime(_) => Kind::OffsetDateTime,
            Value::Array(_) => Kind::Array,
            Value::Table(_) => Kind::Table,
            Value::TableArray(_) => Kind::TableArray,
        }
    }

    /// Returns `true` if the value is one of the eight scalar shapes.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Array(_) | Value::Table(_) | Value::TableArray(_)
        )
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// Returns `true` if the value is a table array.
    #[inline]
    #[must_use]
    pub const fn is_table_array(&self) -> bool {
        matches!(self, Value::TableArray(_))
    }

    /// If the value is a string, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. An integer widens losslessly.
    /// Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomldoc::Value;
    ///
    /// assert_eq!(Value::from(1.5).as_float(), Some(1.5));
    /// assert_eq!(Value::from(3).as_float(), Some(3.0));
    /// assert_eq!(Value::from(true).as_float(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a local date, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&LocalDate> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// If the value is a local time, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_time(&self) -> Option<&LocalTime> {
        match self {
            Value::Time(t) => Some(t),
            _ => None,
        }
    }

    /// If the value is a local datetime, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&LocalDateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is an offset datetime, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_offset_datetime(&self) -> Option<&OffsetDateTime> {
        match self {
            Value::OffsetDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an array, returns a mutable reference to it.
    #[inline]
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a table, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// If the value is a table, returns a mutable reference to it.
    #[inline]
    #[must_use]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// If the value is a table array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table_array(&self) -> Option<&TableArray> {
        match self {
            Value::TableArray(ta) => Some(ta),
            _ => None,
        }
    }

    /// If the value is a table array, returns a mutable reference to it.
    #[inline]
    #[must_use]
    pub fn as_table_array_mut(&mut self) -> Option<&mut TableArray> {
        match self {
            Value::TableArray(ta) => Some(ta),
            _ => None,
        }
    }
}

/// An ordered, homogeneous sequence of values.
///
/// The first element fixes the element kind; later [`push`](Array::push) and
/// [`insert`](Array::insert) calls with a different kind fail with
/// [`Error::Homogeneity`]. Arrays of arrays are the sole exception: the
/// nested arrays may differ in their own element kinds. Tables never appear
/// in an `Array` — the tree keeps sequences of tables in [`TableArray`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Array {
    values: Vec<Value>,
}

impl Array {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Array { values: Vec::new() }
    }

    /// Creates an empty array with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Returns the element kind, or `None` for an empty array.
    #[must_use]
    pub fn element_kind(&self) -> Option<Kind> {
        self.values.first().map(Value::kind)
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the array contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a reference to the element at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns a mutable reference to the element at `index`, if any.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    /// Appends a value to the end of the array.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Homogeneity`] when the value's kind does not
    /// match the existing element kind, or when the value is a table or
    /// table array.
    pub fn push(&mut self, value: Value) -> Result<()> {
        self.check_kind(&value)?;
        self.values.push(value);
        Ok(())
    }

    /// Inserts a value at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Homogeneity`] under the same rules as
    /// [`push`](Array::push).
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<()> {
        self.check_kind(&value)?;
        self.values.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Value {
        self.values.remove(index)
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Reserves capacity for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Extracts every element as `T`.
    ///
    /// Returns `None` if any element fails the extraction — there are no
    /// partial results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let doc = tomldoc::from_str("ports = [8000, 8001, 8002]").unwrap();
    /// let arr = doc.get_array("ports").unwrap();
    /// assert_eq!(arr.as_vec::<i64>(), Some(vec![8000, 8001, 8002]));
    /// assert_eq!(arr.as_vec::<String>(), None);
    /// ```
    #[must_use]
    pub fn as_vec<T: FromValue>(&self) -> Option<Vec<T>> {
        let mut result = Vec::with_capacity(self.values.len());
        for value in &self.values {
            match T::from_value(value) {
                Ok(Some(v)) => result.push(v),
                _ => return None,
            }
        }
        Some(result)
    }

    fn check_kind(&self, value: &Value) -> Result<()> {
        if matches!(value, Value::Table(_) | Value::TableArray(_)) {
            return Err(Error::homogeneity(
                "scalars or arrays",
                value.kind().as_str(),
            ));
        }
        match self.values.first() {
            Some(first) if first.kind() != value.kind() => Err(Error::homogeneity(
                first.kind().as_str(),
                value.kind().as_str(),
            )),
            _ => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl TryFrom<Vec<Value>> for Array {
    type Error = Error;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        let mut arr = Array::with_capacity(values.len());
        for value in values {
            arr.push(value)?;
        }
        Ok(arr)
    }
}

/// An ordered sequence of tables.
///
/// The `inline` flag records how the sequence was declared: `false` for the
/// `[[name]]` header form, `true` for an array of inline tables
/// (`a = [{...}, {...}]`). Only non-inline table arrays may be extended by a
/// later `[[name]]` header. The flag is parser bookkeeping and does not
/// participate in equality — the serializer re-emits every table array in
/// header form.
#[derive(Clone, Debug, Default)]
pub struct TableArray {
    tables: Vec<Table>,
    inline: bool,
}

impl TableArray {
    /// Creates an empty table array in the `[[name]]` header form.
    #[must_use]
    pub fn new() -> Self {
        TableArray {
            tables: Vec::new(),
            inline: false,
        }
    }

    /// Creates an empty inline ("static") table array.
    #[must_use]
    pub fn new_inline() -> Self {
        TableArray {
            tables: Vec::new(),
            inline: true,
        }
    }

    /// Whether the table array was declared inline. Inline table arrays
    /// cannot be appended to with `[[name]]` headers.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Returns the number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the table array contains no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns a reference to the table at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Returns a mutable reference to the table at `index`, if any.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables.get_mut(index)
    }

    /// Returns a reference to the last table, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Table> {
        self.tables.last()
    }

    /// Returns a mutable reference to the last table, if any.
    #[must_use]
    pub fn last_mut(&mut self) -> Option<&mut Table> {
        self.tables.last_mut()
    }

    /// Appends a table to the end of the sequence.
    pub fn push(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Inserts a table at `index`, shifting later tables right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, table: Table) {
        self.tables.insert(index, table);
    }

    /// Removes and returns the table at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Table {
        self.tables.remove(index)
    }

    /// Removes all tables.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Reserves capacity for at least `additional` more tables.
    pub fn reserve(&mut self, additional: usize) {
        self.tables.reserve(additional);
    }

    /// Returns an iterator over the tables.
    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.tables.iter()
    }

    /// Returns a mutable iterator over the tables.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Table> {
        self.tables.iter_mut()
    }
}

impl PartialEq for TableArray {
    fn eq(&self, other: &Self) -> bool {
        // the inline flag is parser bookkeeping, not document content
        self.tables == other.tables
    }
}

impl<'a> IntoIterator for &'a TableArray {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

impl FromIterator<Table> for TableArray {
    fn from_iter<T: IntoIterator<Item = Table>>(iter: T) -> Self {
        TableArray {
            tables: iter.into_iter().collect(),
            inline: false,
        }
    }
}

/// Typed extraction of a scalar from a [`Value`].
///
/// `Ok(None)` means the value is not of the requested shape; `Err` is
/// reserved for integer narrowing that is out of range for the target type
/// (including negative values for unsigned targets). A plain variant
/// mismatch is never an error.
///
/// # Examples
///
/// ```rust
/// use tomldoc::{FromValue, Value};
///
/// assert_eq!(u8::from_value(&Value::from(200)).unwrap(), Some(200));
/// assert!(u8::from_value(&Value::from(300)).is_err());
/// assert_eq!(u8::from_value(&Value::from("nope")).unwrap(), None);
/// ```
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Option<Self>>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_str().map(str::to_owned))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_bool())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_integer())
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_float())
    }
}

macro_rules! from_value_narrowing {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Option<Self>> {
                match value.as_integer() {
                    Some(i) => <$ty>::try_from(i)
                        .map(Some)
                        .map_err(|_| Error::range(i, stringify!($ty))),
                    None => Ok(None),
                }
            }
        }
    )*};
}

from_value_narrowing!(i8, i16, i32, u8, u16, u32, u64);

impl FromValue for LocalDate {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_date().copied())
    }
}

impl FromValue for LocalTime {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_time().copied())
    }
}

impl FromValue for LocalDateTime {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_datetime().copied())
    }
}

impl FromValue for OffsetDateTime {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_offset_datetime().copied())
    }
}

impl FromValue for Array {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        Ok(value.as_array().cloned())
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<LocalDate> for Value {
    fn from(value: LocalDate) -> Self {
        Value::Date(value)
    }
}

impl From<LocalTime> for Value {
    fn from(value: LocalTime) -> Self {
        Value::Time(value)
    }
}

impl From<LocalDateTime> for Value {
    fn from(value: LocalDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(value: OffsetDateTime) -> Self {
        Value::OffsetDateTime(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

impl From<TableArray> for Value {
    fn from(value: TableArray) -> Self {
        Value::TableArray(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Date(d) => d.serialize(serializer),
            Value::Time(t) => t.serialize(serializer),
            Value::DateTime(dt) => dt.serialize(serializer),
            Value::OffsetDateTime(dt) => dt.serialize(serializer),
            Value::Array(arr) => arr.serialize(serializer),
            Value::Table(t) => t.serialize(serializer),
            Value::TableArray(ta) => ta.serialize(serializer),
        }
    }
}

impl Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for element in &self.values {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl Serialize for TableArray {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.tables.len()))?;
        for table in &self.tables {
            seq.serialize_element(table)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a TOML-representable value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| E::custom("integer out of the 64-bit signed range"))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut arr = Array::new();
                while let Some(elem) = seq.next_element::<Value>()? {
                    arr.push(elem).map_err(de::Error::custom)?;
                }
                Ok(Value::Array(arr))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    table.insert(key, value);
                }
                Ok(Value::Table(table))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
