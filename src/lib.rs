//! # tomldoc
//!
//! A TOML v0.5 document library: a typed value tree, a recursive-descent
//! parser that builds it, and a serializer that round-trips it back to
//! text.
//!
//! ## Key Features
//!
//! - **Typed document tree**: [`Value`] covers strings, integers, floats,
//!   booleans, the four date/time shapes, homogeneous arrays, tables, and
//!   arrays of tables
//! - **Full v0.5 input grammar**: dotted keys, `[[arrays of tables]]`,
//!   inline tables, basic/literal/multi-line strings, hex/octal/binary
//!   integers, `inf`/`nan`, offset datetimes
//! - **Line-accurate errors**: every parse failure carries the 1-based
//!   line number of the offending token
//! - **Round-trip serialization**: writing a parsed tree and re-parsing the
//!   output yields an equal tree
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tomldoc = "0.1"
//! ```
//!
//! ### Parsing a document
//!
//! ```rust
//! let doc = tomldoc::from_str(r#"
//! title = "example"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! tags = ["web", "prod"]
//! "#).unwrap();
//!
//! assert_eq!(doc.get_as::<String>("title").unwrap().as_deref(), Some("example"));
//! assert_eq!(doc.get_qualified_as::<u16>("server.port").unwrap(), Some(8080));
//! assert_eq!(
//!     doc.get_qualified_vec::<String>("server.tags"),
//!     Some(vec!["web".to_string(), "prod".to_string()])
//! );
//! ```
//!
//! ### Building and writing a document
//!
//! ```rust
//! use tomldoc::{to_string, Table, Value};
//!
//! let mut server = Table::new();
//! server.insert("port".to_string(), Value::from(8080));
//!
//! let mut doc = Table::new();
//! doc.insert("title".to_string(), Value::from("example"));
//! doc.insert("server".to_string(), Value::Table(server));
//!
//! let text = to_string(&doc);
//! assert_eq!(tomldoc::from_str(&text).unwrap(), doc);
//! ```
//!
//! ## Error Reporting
//!
//! ```rust
//! let err = tomldoc::from_str("[s]\nk = 2\n[s]\n").unwrap_err();
//! assert_eq!(err.line(), Some(3));
//! assert!(err.to_string().contains("redefinition"));
//! ```
//!
//! ## Scope
//!
//! This crate implements TOML v0.5 semantics (not v1.0), parses whole
//! documents (no streaming), and discards comments and formatting. See the
//! [`spec`] module for the precise dialect, including the handful of
//! documented divergences inherited from the C++ library this design
//! descends from.

pub mod datetime;
pub mod error;
pub mod parser;
pub mod spec;
pub mod table;
pub mod value;
pub mod writer;

pub use datetime::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
pub use error::{Error, Result};
pub use parser::Parser;
pub use table::Table;
pub use value::{Array, FromValue, Kind, TableArray, Value};
pub use writer::Writer;

use std::io;
use std::path::Path;

/// Parses a TOML document from a string, returning the root table.
///
/// # Examples
///
/// ```rust
/// let doc = tomldoc::from_str("answer = 42").unwrap();
/// assert_eq!(doc.get_as::<i64>("answer").unwrap(), Some(42));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with the offending line number on the first
/// syntactic or semantic error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<Table> {
    Parser::new(input).parse()
}

/// Parses a TOML document from an I/O stream.
///
/// The stream is read to the end before parsing begins.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not UTF-8, and
/// [`Error::Parse`] for parse failures.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Table> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(e.to_string()))?;
    from_str(&input)
}

/// Parses the TOML file at `path`, returning the root table.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and
/// [`Error::Parse`] for parse failures.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)
        .map_err(|_| Error::io(format!("{} could not be opened for parsing", path.display())))?;
    from_str(&input)
}

/// Serializes a document to a TOML string with tab indentation.
///
/// # Examples
///
/// ```rust
/// let doc = tomldoc::from_str("a = 1").unwrap();
/// assert_eq!(tomldoc::to_string(&doc), "a = 1\n");
/// ```
#[must_use]
pub fn to_string(table: &Table) -> String {
    let mut writer = Writer::new();
    writer.write_document(table);
    writer.into_string()
}

/// Serializes a document to a TOML string with a custom indent unit.
#[must_use]
pub fn to_string_with_indent(table: &Table, indent: &str) -> String {
    let mut writer = Writer::with_indent(indent);
    writer.write_document(table);
    writer.into_string()
}

/// Serializes a document to an I/O writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(mut writer: W, table: &Table) -> Result<()> {
    let text = to_string(table);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_and_to_string_round_trip() {
        let doc = from_str("a = 1\nb = \"x\"\n[t]\nc = true\n").unwrap();
        let text = to_string(&doc);
        let reparsed = from_str(&text).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_from_reader() {
        let input = b"a = 1\n";
        let doc = from_reader(&input[..]).unwrap();
        assert_eq!(doc.get_as::<i64>("a").unwrap(), Some(1));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/definitely/not/a/real/file.toml").unwrap_err();
        assert!(err.to_string().contains("could not be opened"));
    }

    #[test]
    fn test_to_writer() {
        let doc = from_str("a = 1\n").unwrap();
        let mut out = Vec::new();
        to_writer(&mut out, &doc).unwrap();
        assert_eq!(out, b"a = 1\n");
    }
}
