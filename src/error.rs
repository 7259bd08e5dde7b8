//! Error types for TOML parsing, tree access, and serialization.
//!
//! Everything in this crate reports failures through the single [`Error`]
//! enum. The variants fall into three groups:
//!
//! - **Parse errors**: any syntactic or semantic problem found while
//!   parsing. These always carry the 1-based line number at which the
//!   offending token was being read. The first error aborts the parse.
//! - **Tree errors**: violations raised by the document tree itself —
//!   inserting a mismatched element kind into an array
//!   ([`Error::Homogeneity`]), narrowing an integer out of range for the
//!   requested target type ([`Error::Range`]), or resolving a qualified key
//!   whose intermediate components are missing or not tables
//!   ([`Error::NotFound`]).
//! - **I/O errors**: file or writer failures from the convenience entry
//!   points.
//!
//! ## Examples
//!
//! ```rust
//! let err = tomldoc::from_str("a = 1\na = 2\n").unwrap_err();
//! assert!(err.to_string().contains("line 2"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing, accessing,
/// or serializing a TOML document.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Syntactic or semantic parse failure, with the 1-based line number
    #[error("{msg} at line {line}")]
    Parse { msg: String, line: usize },

    /// Array insert whose element kind does not match the existing elements
    #[error("arrays must be homogeneous: cannot insert {found} into an array of {expected}")]
    Homogeneity {
        expected: &'static str,
        found: &'static str,
    },

    /// Typed integer fetch out of range for the requested target type
    #[error("{target} cannot represent the value {value}")]
    Range { value: i64, target: &'static str },

    /// Qualified-key fetch where an intermediate component does not exist
    /// or is not a table
    #[error("{0} is not a valid key")]
    NotFound(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Generic message, used by the serde bridges
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a parse error at the given 1-based line number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomldoc::Error;
    ///
    /// let err = Error::parse(10, "unterminated string literal");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            msg: msg.into(),
            line,
        }
    }

    /// Creates a homogeneity error for an array insert of the wrong kind.
    pub fn homogeneity(expected: &'static str, found: &'static str) -> Self {
        Error::Homogeneity { expected, found }
    }

    /// Creates a range error for an integer that does not fit the target type.
    pub fn range(value: i64, target: &'static str) -> Self {
        Error::Range { value, target }
    }

    /// Creates a not-found error for a failed qualified-key lookup.
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound(key.into())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// Returns the 1-based line number for parse errors, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomldoc::Error;
    ///
    /// assert_eq!(Error::parse(3, "redefinition of table s").line(), Some(3));
    /// assert_eq!(Error::io("disk on fire").line(), None);
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
