//! The TOML serializer.
//!
//! [`Writer`] emits a document tree as TOML text that parses back to an
//! equal tree. Two disciplines make that round-trip safe:
//!
//! - **Entry ordering.** Within each table, scalar and array entries are
//!   written before child tables and table arrays. A `[child]` header
//!   switches the parser's current table, so any scalar written after it
//!   would re-parse as belonging to the child.
//! - **Header paths.** `[a.b.c]` and `[[a.b.c]]` headers are rebuilt from a
//!   path stack as the writer descends; components that are not bare-key
//!   safe are emitted as quoted basic strings.
//!
//! The writer tracks whether its output currently ends on a bare newline so
//! separator lines between entries never double up.
//!
//! ```rust
//! use tomldoc::{to_string, Value};
//!
//! let mut doc = tomldoc::from_str("b = 2\n[t]\nx = 1").unwrap();
//! doc.insert("a".to_string(), Value::from("hi"));
//! let text = to_string(&doc);
//! assert_eq!(text, "b = 2\na = \"hi\"\n[t]\nx = 1\n");
//! let reparsed = tomldoc::from_str(&text).unwrap();
//! assert_eq!(reparsed, doc);
//! ```

use crate::table::Table;
use crate::value::{Array, TableArray, Value};
use std::fmt;

/// Serializes document trees to TOML text.
///
/// Construct with [`Writer::new`] (tab indentation) or
/// [`Writer::with_indent`], feed it a tree, and take the text with
/// [`Writer::into_string`]. The crate-level [`to_string`](crate::to_string)
/// and [`to_writer`](crate::to_writer) helpers cover the common cases.
pub struct Writer {
    out: String,
    indent: String,
    path: Vec<String>,
    naked_newline: bool,
}

impl Writer {
    /// Creates a writer with the default tab indent unit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent("\t")
    }

    /// Creates a writer that indents each level below the root with the
    /// given unit.
    #[must_use]
    pub fn with_indent(indent: &str) -> Self {
        Writer {
            out: String::with_capacity(256),
            indent: indent.to_string(),
            path: Vec::new(),
            naked_newline: false,
        }
    }

    /// Writes a whole document: the table's entries without a root header.
    pub fn write_document(&mut self, table: &Table) {
        self.visit_table(table, false);
    }

    /// Writes any single node. Scalars and arrays render inline; tables
    /// and table arrays render in document form.
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::String(s) => self.write_quoted(s),
            Value::Integer(i) => self.write(&i.to_string()),
            Value::Float(f) => self.write_float(*f),
            Value::Bool(b) => self.write(if *b { "true" } else { "false" }),
            Value::Date(d) => self.write(&d.to_string()),
            Value::Time(t) => self.write(&t.to_string()),
            Value::DateTime(dt) => self.write(&dt.to_string()),
            Value::OffsetDateTime(dt) => self.write(&dt.to_string()),
            Value::Array(arr) => self.visit_array(arr),
            Value::Table(t) => self.visit_table(t, false),
            Value::TableArray(ta) => self.visit_table_array(ta),
        }
    }

    /// Consumes the writer and returns the accumulated text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    fn visit_table(&mut self, table: &Table, in_array: bool) {
        self.write_table_header(in_array);

        let mut scalars: Vec<(&String, &Value)> = Vec::new();
        let mut subtables: Vec<(&String, &Value)> = Vec::new();
        for (key, value) in table {
            match value {
                Value::Table(_) | Value::TableArray(_) => subtables.push((key, value)),
                _ => scalars.push((key, value)),
            }
        }

        for (i, &(key, value)) in scalars.iter().enumerate() {
            if i > 0 {
                self.endline();
            }
            self.write_indent(self.path.len());
            self.write_key(key);
            self.write(" = ");
            self.write_value(value);
        }

        for (i, &(key, value)) in subtables.iter().enumerate() {
            self.path.push(key.clone());
            if !scalars.is_empty() || i > 0 {
                self.endline();
            }
            match value {
                Value::Table(t) => self.visit_table(t, false),
                Value::TableArray(ta) => self.visit_table_array(ta),
                _ => {}
            }
            self.path.pop();
        }

        self.endline();
    }

    fn visit_table_array(&mut self, array: &TableArray) {
        for (i, table) in array.iter().enumerate() {
            if i > 0 {
                self.endline();
            }
            self.visit_table(table, true);
        }
        self.endline();
    }

    fn visit_array(&mut self, array: &Array) {
        self.write("[");
        for (i, value) in array.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write_value(value);
        }
        self.write("]");
    }

    fn write_table_header(&mut self, in_array: bool) {
        if self.path.is_empty() {
            return;
        }
        let mut header = String::new();
        header.push('[');
        if in_array {
            header.push('[');
        }
        for (i, part) in self.path.iter().enumerate() {
            if i > 0 {
                header.push('.');
            }
            if is_bare_key(part) {
                header.push_str(part);
            } else {
                header.push('"');
                header.push_str(&escape_string(part));
                header.push('"');
            }
        }
        header.push(']');
        if in_array {
            header.push(']');
        }
        self.write_indent(self.path.len() - 1);
        self.write(&header);
        self.endline();
    }

    fn write_key(&mut self, key: &str) {
        if is_bare_key(key) {
            self.write(key);
        } else {
            self.write_quoted(key);
        }
    }

    fn write_quoted(&mut self, s: &str) {
        let escaped = escape_string(s);
        self.write("\"");
        self.write(&escaped);
        self.write("\"");
    }

    fn write_float(&mut self, f: f64) {
        if f.is_nan() {
            self.write(if f.is_sign_negative() { "-nan" } else { "nan" });
        } else if f.is_infinite() {
            self.write(if f < 0.0 { "-inf" } else { "inf" });
        } else {
            let mut s = f.to_string();
            // a float literal must stay a float on re-parse
            if !s.contains(['.', 'e', 'E']) {
                s.push_str(".0");
            }
            self.write(&s);
        }
    }

    fn write_indent(&mut self, levels: usize) {
        if levels == 0 {
            return;
        }
        for _ in 0..levels {
            self.out.push_str(&self.indent);
        }
        self.naked_newline = false;
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
        self.naked_newline = false;
    }

    fn endline(&mut self) {
        if !self.naked_newline {
            self.out.push('\n');
            self.naked_newline = true;
        }
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys made only of `A-Z a-z 0-9 _ -` are emitted without quotes.
fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Escapes a string for a basic (`"..."`) string body. Control characters
/// without a named escape become `\uXXXX` with four lowercase hex digits.
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) <= 0x1f => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new();
        writer.write_value(self);
        f.write_str(&writer.into_string())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new();
        writer.write_document(self);
        f.write_str(&writer.into_string())
    }
}
