//! The TOML parser.
//!
//! A single-pass, lexer-free recursive-descent parser. The input is
//! consumed a line at a time (`\n`, `\r\n`, and bare `\r` all terminate a
//! line); within the current line a character cursor drives the
//! sub-parsers directly — there is no token stream. Values that may span
//! lines (multi-line strings, arrays) pull further lines themselves.
//!
//! The parser owns the root [`Table`] it is building and a pointer — here a
//! key path resolved on demand — to the *current table* that bare
//! `key = value` lines populate. `[section]` and `[[section]]` headers
//! reset that path, enforcing the table-scoping rules along the way:
//! implicit tables created as dotted prefixes may later be claimed by a
//! header; explicit tables may not be declared twice; inline tables are
//! closed to any further insertion.
//!
//! Errors abort at the first failure and carry the 1-based line number of
//! the offending token; there is no recovery.
//!
//! ```rust
//! let doc = tomldoc::from_str(r#"
//! [package]
//! name = "demo"
//! authors = ["alice", "bob"]
//! "#).unwrap();
//!
//! assert_eq!(doc.get_qualified_as::<String>("package.name").unwrap().as_deref(), Some("demo"));
//! ```

use crate::datetime::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
use crate::table::Table;
use crate::value::{Array, TableArray, Value};
use crate::{Error, Result};

/// Line-at-a-time character cursor over the input document.
struct Scanner<'a> {
    input: &'a str,
    /// byte offset of the next unread line
    offset: usize,
    /// current line, without its terminator
    line: Vec<char>,
    /// cursor within `line`
    pos: usize,
    /// 1-based; 0 until the first line is read
    line_number: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            input,
            offset: 0,
            line: Vec::new(),
            pos: 0,
            line_number: 0,
        }
    }

    /// Loads the next line, returning `false` at end of input. Accepts
    /// `LF`, `CRLF`, and bare `CR` terminators.
    fn next_line(&mut self) -> bool {
        if self.offset >= self.input.len() {
            return false;
        }
        let bytes = self.input.as_bytes();
        let start = self.offset;
        let mut end = start;
        while end < bytes.len() && bytes[end] != b'\n' && bytes[end] != b'\r' {
            end += 1;
        }
        self.line = self.input[start..end].chars().collect();
        self.offset = if end < bytes.len() {
            if bytes[end] == b'\r' && end + 1 < bytes.len() && bytes[end + 1] == b'\n' {
                end + 2
            } else {
                end + 1
            }
        } else {
            end
        };
        self.pos = 0;
        self.line_number += 1;
        true
    }

    fn peek(&self) -> Option<char> {
        self.line.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.line.get(self.pos + n).copied()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.line.get(index).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn at_eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.pos += 1;
        }
    }

    /// Does the current line continue with exactly `word` at the cursor?
    fn starts_with(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.line[start..end].iter().collect()
    }
}

/// The TOML parser. Construct with [`Parser::new`], consume with
/// [`Parser::parse`].
pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Parser {
            scanner: Scanner::new(input),
        }
    }

    /// Parses the input to completion and returns the root table.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Parse`] on the first syntactic or semantic
    /// error; the partially built tree is discarded.
    pub fn parse(mut self) -> Result<Table> {
        let mut root = Table::new();
        let mut current: Vec<String> = Vec::new();

        while self.scanner.next_line() {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                None | Some('#') => continue,
                Some('[') => {
                    current.clear();
                    self.scanner.bump();
                    if self.scanner.at_eol() {
                        return Err(self.err("unexpected end of table declaration"));
                    }
                    if self.scanner.peek() == Some('[') {
                        self.scanner.bump();
                        self.parse_table_array_header(&mut root, &mut current)?;
                    } else {
                        self.parse_single_table_header(&mut root, &mut current)?;
                    }
                }
                Some(_) => {
                    let table = table_at_path(&mut root, &current);
                    self.parse_key_value(table)?;
                    self.scanner.skip_whitespace();
                    self.eol_or_comment()?;
                }
            }
        }
        Ok(root)
    }

    fn err(&self, msg: impl Into<String>) -> Error {
        Error::parse(self.scanner.line_number, msg)
    }

    fn eol_or_comment(&self) -> Result<()> {
        match self.scanner.peek() {
            None | Some('#') => Ok(()),
            Some(c) => Err(self.err(format!(
                "unidentified trailing character '{c}', did you forget a '#'?"
            ))),
        }
    }

    // ---------------------------------------------------------------
    // headers
    // ---------------------------------------------------------------

    fn parse_single_table_header(
        &mut self,
        root: &mut Table,
        current: &mut Vec<String>,
    ) -> Result<()> {
        if matches!(self.scanner.peek(), None | Some(']')) {
            return Err(self.err("table name cannot be empty"));
        }
        let path = self.parse_key_path(']')?;
        if self.scanner.peek() != Some(']') {
            return Err(self.err("unterminated table declaration, did you forget a ']'?"));
        }
        self.scanner.bump();

        let mut table: &mut Table = root;
        let mut full = String::new();
        for (i, part) in path.iter().enumerate() {
            if !full.is_empty() {
                full.push('.');
            }
            full.push_str(part);

            if i + 1 < path.len() {
                table = self.descend_header(table, part, &full)?;
                continue;
            }

            // final component: declare or claim the table
            if !table.contains(part) {
                if table.inline {
                    return Err(self.err(format!("inline table {full} cannot be extended")));
                }
                let mut child = Table::new();
                child.explicit = true;
                table.insert(part.clone(), Value::Table(child));
            } else {
                match table.get_mut(part) {
                    Some(Value::Table(child)) => {
                        if child.explicit || child.has_direct_values() {
                            return Err(self.err(format!("redefinition of table {full}")));
                        }
                        child.explicit = true;
                    }
                    Some(Value::TableArray(_)) => {
                        return Err(
                            self.err(format!("key {full} already exists as a table array"))
                        );
                    }
                    _ => {
                        return Err(self.err(format!("key {full} already exists as a value")));
                    }
                }
            }
        }

        *current = path;
        self.scanner.skip_whitespace();
        self.eol_or_comment()
    }

    fn parse_table_array_header(
        &mut self,
        root: &mut Table,
        current: &mut Vec<String>,
    ) -> Result<()> {
        if matches!(self.scanner.peek(), None | Some(']')) {
            return Err(self.err("table array name cannot be empty"));
        }
        let path = self.parse_key_path(']')?;
        for _ in 0..2 {
            if self.scanner.peek() != Some(']') {
                return Err(self.err("unterminated table array name"));
            }
            self.scanner.bump();
        }

        let mut table: &mut Table = root;
        let mut full = String::new();
        for (i, part) in path.iter().enumerate() {
            if !full.is_empty() {
                full.push('.');
            }
            full.push_str(part);

            if i + 1 < path.len() {
                table = self.descend_header(table, part, &full)?;
                continue;
            }

            // final component: open a new element of the table array
            if !table.contains(part) {
                if table.inline {
                    return Err(self.err(format!("inline table {full} cannot be extended")));
                }
                let mut element = Table::new();
                element.explicit = true;
                let mut array = TableArray::new();
                array.push(element);
                table.insert(part.clone(), Value::TableArray(array));
            } else {
                match table.get_mut(part) {
                    Some(Value::TableArray(array)) => {
                        if array.is_inline() {
                            return Err(
                                self.err(format!("static array {full} cannot be appended to"))
                            );
                        }
                        let mut element = Table::new();
                        element.explicit = true;
                        array.push(element);
                    }
                    _ => {
                        return Err(self.err(format!("key {full} is not a table array")));
                    }
                }
            }
        }

        *current = path;
        self.scanner.skip_whitespace();
        self.eol_or_comment()
    }

    /// Walks one intermediate component of a dotted header, creating an
    /// implicit table when the component is missing. A table array
    /// intermediate resolves to its last element.
    fn descend_header<'t>(
        &self,
        table: &'t mut Table,
        part: &str,
        full: &str,
    ) -> Result<&'t mut Table> {
        if !table.contains(part) {
            if table.inline {
                return Err(self.err(format!("inline table {full} cannot be extended")));
            }
            table.insert(part.to_string(), Value::Table(Table::new()));
        }
        match table.get_mut(part) {
            Some(Value::Table(child)) => Ok(child),
            Some(Value::TableArray(array)) => array
                .last_mut()
                .ok_or_else(|| self.err(format!("table array {full} is empty"))),
            _ => Err(self.err(format!("key {full} already exists as a value"))),
        }
    }

    // ---------------------------------------------------------------
    // keys
    // ---------------------------------------------------------------

    /// Parses a dotted key path up to (but not including) `terminator`.
    /// Stops at end of line as well; the caller validates the terminator.
    fn parse_key_path(&mut self, terminator: char) -> Result<Vec<String>> {
        let mut parts = Vec::new();
        loop {
            self.scanner.skip_whitespace();
            let part = match self.scanner.peek() {
                None => return Err(self.err("unexpected end of key")),
                Some(quote @ ('"' | '\'')) => self.parse_quoted(quote)?,
                Some(_) => self.parse_bare_key()?,
            };
            parts.push(part);
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some('.') => {
                    self.scanner.bump();
                }
                Some(c) if c == terminator => return Ok(parts),
                None => return Ok(parts),
                Some(c) => {
                    return Err(self.err(format!("unexpected character in key: '{c}'")));
                }
            }
        }
    }

    fn parse_bare_key(&mut self) -> Result<String> {
        let start = self.scanner.pos;
        while let Some(c) = self.scanner.peek() {
            if c == '.' || c == '=' || c == ']' {
                break;
            }
            self.scanner.bump();
        }
        let mut end = self.scanner.pos;
        while end > start && matches!(self.scanner.char_at(end - 1), Some(' ') | Some('\t')) {
            end -= 1;
        }
        if end == start {
            return Err(self.err("bare key missing name"));
        }
        let key = self.scanner.slice(start, end);
        for c in key.chars() {
            if c == ' ' || c == '\t' {
                return Err(self.err(format!("bare key \"{key}\" cannot contain whitespace")));
            }
            if c == '#' {
                return Err(self.err(format!("bare key \"{key}\" cannot contain '#'")));
            }
            if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
                return Err(self.err(format!(
                    "bare key \"{key}\" contains forbidden character '{c}'"
                )));
            }
        }
        Ok(key)
    }

    // ---------------------------------------------------------------
    // key/value pairs
    // ---------------------------------------------------------------

    fn parse_key_value(&mut self, table: &mut Table) -> Result<()> {
        let path = self.parse_key_path('=')?;

        // dotted prefixes create implicit tables; existing components must
        // themselves be tables
        let mut target: &mut Table = table;
        for part in &path[..path.len() - 1] {
            if !target.contains(part) {
                if target.inline {
                    return Err(self.err(format!("inline table {part} cannot be extended")));
                }
                target.insert(part.clone(), Value::Table(Table::new()));
            }
            target = match target.get_mut(part) {
                Some(Value::Table(child)) => child,
                _ => {
                    return Err(self.err(format!("key {part} already exists as a value")));
                }
            };
        }

        let key = &path[path.len() - 1];
        if target.inline {
            return Err(self.err(format!("inline table cannot accept key {key}")));
        }
        if target.contains(key) {
            return Err(self.err(format!("key {key} already present")));
        }
        if self.scanner.peek() != Some('=') {
            return Err(self.err("value must follow after a '='"));
        }
        self.scanner.bump();
        self.scanner.skip_whitespace();

        let value = self.parse_value()?;
        target.insert(key.clone(), value);
        self.scanner.skip_whitespace();
        Ok(())
    }

    // ---------------------------------------------------------------
    // values
    // ---------------------------------------------------------------

    /// Classifies the upcoming value from a bounded lookahead, then
    /// dispatches to the matching sub-parser.
    fn parse_value(&mut self) -> Result<Value> {
        match self.scanner.peek() {
            None => Err(self.err("failed to parse value type")),
            Some(quote @ ('"' | '\'')) => self.parse_string_value(quote),
            Some(c) => {
                if self.is_time_at(self.scanner.pos, self.scanner.line.len()) {
                    self.parse_time_value()
                } else if self.date_kind_at(self.scanner.pos).is_some() {
                    self.parse_date_value()
                } else if c.is_ascii_digit()
                    || c == '+'
                    || c == '-'
                    || self.scanner.starts_with("inf")
                    || self.scanner.starts_with("nan")
                {
                    self.parse_number()
                } else if c == 't' || c == 'f' {
                    self.parse_bool()
                } else if c == '[' {
                    self.parse_array()
                } else if c == '{' {
                    self.parse_inline_table()
                } else {
                    Err(self.err("failed to parse value type"))
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // strings
    // ---------------------------------------------------------------

    fn parse_string_value(&mut self, quote: char) -> Result<Value> {
        if self.scanner.peek_at(1) == Some(quote) && self.scanner.peek_at(2) == Some(quote) {
            self.scanner.pos += 3;
            self.parse_multiline_string(quote).map(Value::String)
        } else {
            self.parse_quoted(quote).map(Value::String)
        }
    }

    /// A single-line quoted string or quoted key. Basic strings (`"`)
    /// process escapes; literal strings (`'`) are raw. Consumes trailing
    /// whitespace after the closing quote.
    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        self.scanner.bump();
        let mut out = String::new();
        while let Some(c) = self.scanner.peek() {
            if quote == '"' && c == '\\' {
                out.push(self.parse_escape_code()?);
            } else if c == quote {
                self.scanner.bump();
                self.scanner.skip_whitespace();
                return Ok(out);
            } else {
                out.push(c);
                self.scanner.bump();
            }
        }
        Err(self.err("unterminated string literal"))
    }

    fn parse_multiline_string(&mut self, quote: char) -> Result<String> {
        let mut out = String::new();
        let mut consuming = false;
        let mut first = true;
        loop {
            if self.multiline_segment(&mut out, &mut consuming, quote)? {
                return Ok(out);
            }
            if !self.scanner.next_line() {
                return Err(self.err("unterminated multi-line string"));
            }
            // a newline immediately after the opening delimiter is dropped;
            // every other line boundary contributes one, unless a
            // line-ending backslash is eating whitespace
            if !consuming && !(first && out.is_empty()) {
                out.push('\n');
            }
            first = false;
        }
    }

    /// Consumes the rest of the current line of a multi-line string.
    /// Returns `true` when the closing delimiter was found.
    fn multiline_segment(
        &mut self,
        out: &mut String,
        consuming: &mut bool,
        quote: char,
    ) -> Result<bool> {
        if *consuming {
            self.scanner.skip_whitespace();
            if self.scanner.at_eol() {
                return Ok(false);
            }
        }
        *consuming = false;

        while let Some(c) = self.scanner.peek() {
            if quote == '"' && c == '\\' {
                if self.rest_is_whitespace(self.scanner.pos + 1) {
                    *consuming = true;
                    self.scanner.pos = self.scanner.line.len();
                    return Ok(false);
                }
                out.push(self.parse_escape_code()?);
                continue;
            }
            if c == quote
                && self.scanner.peek_at(1) == Some(quote)
                && self.scanner.peek_at(2) == Some(quote)
            {
                self.scanner.pos += 3;
                return Ok(true);
            }
            out.push(c);
            self.scanner.bump();
        }
        Ok(false)
    }

    fn rest_is_whitespace(&self, from: usize) -> bool {
        self.scanner.line[from..]
            .iter()
            .all(|c| *c == ' ' || *c == '\t')
    }

    fn parse_escape_code(&mut self) -> Result<char> {
        self.scanner.bump(); // backslash
        let c = self
            .scanner
            .peek()
            .ok_or_else(|| self.err("invalid escape sequence"))?;
        let decoded = match c {
            'b' => '\u{0008}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{000C}',
            'r' => '\r',
            '"' => '"',
            '\\' => '\\',
            'u' => return self.parse_unicode(4),
            'U' => return self.parse_unicode(8),
            _ => return Err(self.err("invalid escape sequence")),
        };
        self.scanner.bump();
        Ok(decoded)
    }

    /// Decodes a `\uXXXX` or `\UXXXXXXXX` escape to a Unicode scalar
    /// value. Surrogates and code points above `U+10FFFF` are rejected.
    fn parse_unicode(&mut self, digits: u32) -> Result<char> {
        self.scanner.bump(); // 'u' or 'U'
        let mut codepoint: u32 = 0;
        for _ in 0..digits {
            let c = self
                .scanner
                .peek()
                .ok_or_else(|| self.err("unexpected end of unicode sequence"))?;
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.err("invalid unicode escape sequence"))?;
            codepoint = codepoint * 16 + digit;
            self.scanner.bump();
        }
        if (0xd800..=0xdfff).contains(&codepoint) || codepoint > 0x10ffff {
            return Err(self.err("unicode escape sequence is not a Unicode scalar value"));
        }
        char::from_u32(codepoint)
            .ok_or_else(|| self.err("unicode escape sequence is not a Unicode scalar value"))
    }

    // ---------------------------------------------------------------
    // numbers and booleans
    // ---------------------------------------------------------------

    fn parse_number(&mut self) -> Result<Value> {
        let bound = self.find_end_of_number();

        // radix-prefixed integers carry no sign
        if self.scanner.peek() == Some('0') && self.scanner.pos + 1 < bound {
            if let Some(radix_char @ ('x' | 'o' | 'b')) = self.scanner.peek_at(1) {
                self.scanner.pos += 2;
                let radix = match radix_char {
                    'x' => 16,
                    'o' => 8,
                    _ => 2,
                };
                let digits = self.eat_digits_radix(bound, radix)?;
                let value = i64::from_str_radix(&digits, radix)
                    .map_err(|_| self.err("malformed number (out of range)"))?;
                return Ok(Value::Integer(value));
            }
        }

        let mut text = String::new();
        let negative = self.scanner.peek() == Some('-');
        if matches!(self.scanner.peek(), Some('+') | Some('-')) {
            text.push(self.scanner.bump().unwrap_or('+'));
        }

        if self.scanner.starts_with("inf") {
            self.scanner.pos += 3;
            return Ok(Value::Float(if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }));
        }
        if self.scanner.starts_with("nan") {
            self.scanner.pos += 3;
            return Ok(Value::Float(if negative { -f64::NAN } else { f64::NAN }));
        }

        self.check_no_leading_zero(bound)?;
        self.eat_digits_decimal(&mut text, bound)?;

        let mut is_float = false;
        if self.scanner.pos < bound && self.scanner.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.scanner.bump();
            if self.scanner.pos >= bound {
                return Err(self.err("floats must have trailing digits"));
            }
            self.eat_digits_decimal(&mut text, bound)?;
        }
        if self.scanner.pos < bound && matches!(self.scanner.peek(), Some('e') | Some('E')) {
            is_float = true;
            text.push('e');
            self.scanner.bump();
            if matches!(self.scanner.peek(), Some('+') | Some('-')) && self.scanner.pos < bound {
                text.push(self.scanner.bump().unwrap_or('+'));
            }
            if self.scanner.pos >= bound {
                return Err(self.err("floats must have trailing digits"));
            }
            self.check_no_leading_zero(bound)?;
            self.eat_digits_decimal(&mut text, bound)?;
        }

        if is_float {
            let value: f64 = text.parse().map_err(|_| self.err("malformed number"))?;
            if value.is_infinite() {
                return Err(self.err("malformed number (out of range)"));
            }
            Ok(Value::Float(value))
        } else {
            let value: i64 = text
                .parse()
                .map_err(|_| self.err("malformed number (out of range)"))?;
            Ok(Value::Integer(value))
        }
    }

    /// Leading zeros are forbidden: a `0` may only stand alone or be
    /// followed by `.`, an exponent marker, or the end of the number.
    fn check_no_leading_zero(&self, bound: usize) -> Result<()> {
        if self.scanner.peek() == Some('0') && self.scanner.pos + 1 < bound {
            if let Some(next) = self.scanner.peek_at(1) {
                if next.is_ascii_digit() || next == '_' {
                    return Err(self.err("numbers may not have leading zeros"));
                }
            }
        }
        Ok(())
    }

    /// Consumes a run of decimal digits with optional `_` separators that
    /// must sit between two digits, appending the digits to `text`.
    fn eat_digits_decimal(&mut self, text: &mut String, bound: usize) -> Result<()> {
        let mut any = false;
        while self.scanner.pos < bound {
            match self.scanner.peek() {
                Some(c) if c.is_ascii_digit() => {
                    text.push(c);
                    self.scanner.bump();
                    any = true;
                    if self.scanner.pos < bound && self.scanner.peek() == Some('_') {
                        match self.scanner.peek_at(1) {
                            Some(d) if d.is_ascii_digit() && self.scanner.pos + 1 < bound => {
                                self.scanner.bump();
                            }
                            _ => return Err(self.err("malformed number")),
                        }
                    }
                }
                _ => break,
            }
        }
        if !any {
            return Err(self.err("malformed number"));
        }
        Ok(())
    }

    /// Like [`eat_digits_decimal`](Parser::eat_digits_decimal) for a given
    /// radix, returning the digits with separators stripped.
    fn eat_digits_radix(&mut self, bound: usize, radix: u32) -> Result<String> {
        let mut digits = String::new();
        while self.scanner.pos < bound {
            match self.scanner.peek() {
                Some(c) if c.is_digit(radix) => {
                    digits.push(c);
                    self.scanner.bump();
                    if self.scanner.pos < bound && self.scanner.peek() == Some('_') {
                        match self.scanner.peek_at(1) {
                            Some(d) if d.is_digit(radix) && self.scanner.pos + 1 < bound => {
                                self.scanner.bump();
                            }
                            _ => return Err(self.err("malformed number")),
                        }
                    }
                }
                _ => break,
            }
        }
        if digits.is_empty() {
            return Err(self.err("malformed number"));
        }
        Ok(digits)
    }

    /// Scans forward over every character that could belong to a number,
    /// extending over a trailing `inf`/`nan` so signed specials stay in
    /// bounds.
    fn find_end_of_number(&self) -> usize {
        let line = &self.scanner.line;
        let mut i = self.scanner.pos;
        while i < line.len() {
            match line[i] {
                '0'..='9' | '_' | '.' | 'e' | 'E' | '-' | '+' | 'x' | 'o' | 'b' => i += 1,
                _ => break,
            }
        }
        if i + 2 < line.len() {
            let tail: String = line[i..i + 3].iter().collect();
            if tail == "inf" || tail == "nan" {
                i += 3;
            }
        }
        i
    }

    fn parse_bool(&mut self) -> Result<Value> {
        let word = if self.scanner.peek() == Some('t') {
            "true"
        } else {
            "false"
        };
        if !self.scanner.starts_with(word) {
            return Err(self.err("attempted to parse invalid boolean value"));
        }
        self.scanner.pos += word.len();
        Ok(Value::Bool(word == "true"))
    }

    // ---------------------------------------------------------------
    // dates and times
    // ---------------------------------------------------------------

    fn find_end_of_time(&self, from: usize, limit: usize) -> usize {
        let mut i = from;
        while i < limit {
            match self.scanner.line[i] {
                '0'..='9' | ':' | '.' => i += 1,
                _ => break,
            }
        }
        i
    }

    /// Probes for the `HH:MM:SS[.frac]` shape within `[from, limit)`.
    fn is_time_at(&self, from: usize, limit: usize) -> bool {
        let end = self.find_end_of_time(from, limit);
        let len = end - from;
        if len < 8 {
            return false;
        }
        if self.scanner.char_at(from + 2) != Some(':') || self.scanner.char_at(from + 5) != Some(':')
        {
            return false;
        }
        if len > 8 {
            return self.scanner.char_at(from + 8) == Some('.') && len > 9;
        }
        true
    }

    fn find_end_of_date(&self, from: usize) -> usize {
        let line = &self.scanner.line;
        let mut i = from;
        while i < line.len() && (line[i].is_ascii_digit() || line[i] == '-') {
            i += 1;
        }
        // a space may separate the date from the time
        if i < line.len()
            && line[i] == ' '
            && i + 1 < line.len()
            && line[i + 1].is_ascii_digit()
        {
            i += 1;
        }
        while i < line.len() {
            match line[i] {
                '0'..='9' | 'T' | 'Z' | ':' | '-' | '+' | '.' => i += 1,
                _ => break,
            }
        }
        i
    }

    /// Probes for the date family. `Some(DateKind::..)` when the cursor
    /// sits on `YYYY-MM-DD` optionally followed by a time and offset.
    fn date_kind_at(&self, from: usize) -> Option<DateKind> {
        let date_end = self.find_end_of_date(from);
        let len = date_end - from;
        if len < 10 {
            return None;
        }
        if self.scanner.char_at(from + 4) != Some('-') || self.scanner.char_at(from + 7) != Some('-')
        {
            return None;
        }
        if len >= 19
            && matches!(self.scanner.char_at(from + 10), Some('T') | Some(' '))
            && self.is_time_at(from + 11, date_end)
        {
            let time_end = self.find_end_of_time(from + 11, date_end);
            if time_end == date_end {
                Some(DateKind::DateTime)
            } else {
                Some(DateKind::OffsetDateTime)
            }
        } else if len == 10 {
            Some(DateKind::Date)
        } else {
            None
        }
    }

    fn parse_time_value(&mut self) -> Result<Value> {
        let time = self.read_time(self.scanner.line.len())?;
        Ok(Value::Time(time))
    }

    /// Reads `HH:MM:SS[.frac]`; fractional digits beyond microsecond
    /// precision are accepted and discarded.
    fn read_time(&mut self, outer_limit: usize) -> Result<LocalTime> {
        let limit = self.find_end_of_time(self.scanner.pos, outer_limit);

        let hour = self.eat_fixed_digits(2, limit, "malformed time")?;
        self.eat_exact(':', limit, "malformed time")?;
        let minute = self.eat_fixed_digits(2, limit, "malformed time")?;
        self.eat_exact(':', limit, "malformed time")?;
        let second = self.eat_fixed_digits(2, limit, "malformed time")?;

        let mut microsecond: u32 = 0;
        if self.scanner.pos < limit && self.scanner.peek() == Some('.') {
            self.scanner.bump();
            let mut power: u32 = 100_000;
            while self.scanner.pos < limit {
                match self.scanner.peek() {
                    Some(c) if c.is_ascii_digit() => {
                        microsecond += power * (c as u32 - '0' as u32);
                        power /= 10;
                        self.scanner.bump();
                    }
                    _ => break,
                }
            }
        }

        if self.scanner.pos != limit {
            return Err(self.err("malformed time"));
        }
        Ok(LocalTime {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            microsecond,
        })
    }

    fn parse_date_value(&mut self) -> Result<Value> {
        let date_end = self.find_end_of_date(self.scanner.pos);

        let year = self.eat_fixed_digits(4, date_end, "malformed date")? as i32;
        self.eat_exact('-', date_end, "malformed date")?;
        let month = self.eat_fixed_digits(2, date_end, "malformed date")? as u8;
        self.eat_exact('-', date_end, "malformed date")?;
        let day = self.eat_fixed_digits(2, date_end, "malformed date")? as u8;
        let date = LocalDate { year, month, day };

        if self.scanner.pos == date_end {
            return Ok(Value::Date(date));
        }

        match self.scanner.peek() {
            Some('T') | Some(' ') => {
                self.scanner.bump();
            }
            _ => return Err(self.err("malformed date")),
        }
        let time = self.read_time(date_end)?;
        let datetime = LocalDateTime { date, time };

        if self.scanner.pos == date_end {
            return Ok(Value::DateTime(datetime));
        }

        let mut hour_offset: i8 = 0;
        let mut minute_offset: i8 = 0;
        match self.scanner.peek() {
            Some(sign @ ('+' | '-')) => {
                self.scanner.bump();
                let hours = self.eat_fixed_digits(2, date_end, "malformed date")? as i8;
                self.eat_exact(':', date_end, "malformed date")?;
                let minutes = self.eat_fixed_digits(2, date_end, "malformed date")? as i8;
                if sign == '+' {
                    hour_offset = hours;
                    minute_offset = minutes;
                } else {
                    hour_offset = -hours;
                    minute_offset = -minutes;
                }
            }
            Some('Z') => {
                self.scanner.bump();
            }
            _ => return Err(self.err("malformed date")),
        }

        if self.scanner.pos != date_end {
            return Err(self.err("malformed date"));
        }
        Ok(Value::OffsetDateTime(OffsetDateTime {
            datetime,
            hour_offset,
            minute_offset,
        }))
    }

    fn eat_fixed_digits(&mut self, count: usize, limit: usize, msg: &str) -> Result<u32> {
        let mut value: u32 = 0;
        for _ in 0..count {
            match self.scanner.peek() {
                Some(c) if c.is_ascii_digit() && self.scanner.pos < limit => {
                    value = value * 10 + (c as u32 - '0' as u32);
                    self.scanner.bump();
                }
                _ => return Err(self.err(msg)),
            }
        }
        Ok(value)
    }

    fn eat_exact(&mut self, expected: char, limit: usize, msg: &str) -> Result<()> {
        if self.scanner.pos < limit && self.scanner.peek() == Some(expected) {
            self.scanner.bump();
            Ok(())
        } else {
            Err(self.err(msg))
        }
    }

    // ---------------------------------------------------------------
    // arrays and inline tables
    // ---------------------------------------------------------------

    /// Parses `[ ... ]`. The first element fixes the array's kind; an
    /// array of inline tables becomes an inline (static) [`TableArray`].
    /// Newlines and comments are permitted between elements, and a
    /// trailing comma is allowed.
    fn parse_array(&mut self) -> Result<Value> {
        self.scanner.bump(); // '['
        self.skip_whitespace_and_comments()?;

        if self.scanner.peek() == Some(']') {
            self.scanner.bump();
            return Ok(Value::Array(Array::new()));
        }

        match self.parse_value()? {
            Value::Table(first) => {
                let mut array = TableArray::new_inline();
                array.push(first);
                loop {
                    match self.next_array_element()? {
                        None => return Ok(Value::TableArray(array)),
                        Some(Value::Table(table)) => array.push(table),
                        Some(other) => {
                            return Err(self.err(format!(
                                "arrays must be homogeneous: cannot insert {} into an array of tables",
                                other.kind()
                            )));
                        }
                    }
                }
            }
            first => {
                let mut array = Array::new();
                array.push(first).map_err(|e| self.err(e.to_string()))?;
                loop {
                    match self.next_array_element()? {
                        None => return Ok(Value::Array(array)),
                        Some(value) => array.push(value).map_err(|e| self.err(e.to_string()))?,
                    }
                }
            }
        }
    }

    /// Consumes the separator after an array element. `None` when the
    /// closing bracket was reached.
    fn next_array_element(&mut self) -> Result<Option<Value>> {
        self.skip_whitespace_and_comments()?;
        match self.scanner.peek() {
            Some(']') => {
                self.scanner.bump();
                Ok(None)
            }
            Some(',') => {
                self.scanner.bump();
                self.skip_whitespace_and_comments()?;
                if self.scanner.peek() == Some(']') {
                    self.scanner.bump();
                    return Ok(None); // trailing comma
                }
                self.parse_value().map(Some)
            }
            Some(c) => Err(self.err(format!("unexpected character in array: '{c}'"))),
            None => Err(self.err("unclosed array")),
        }
    }

    /// Parses `{ key = value, ... }` on a single line. The produced table
    /// and every table nested within it are closed to later insertion. A
    /// trailing comma is not permitted here, unlike in arrays.
    fn parse_inline_table(&mut self) -> Result<Value> {
        self.scanner.bump(); // '{'
        let mut table = Table::new();
        self.scanner.skip_whitespace();

        match self.scanner.peek() {
            None => return Err(self.err("unterminated inline table")),
            Some('}') => {
                self.scanner.bump();
            }
            Some(_) => loop {
                self.parse_key_value(&mut table)?;
                self.scanner.skip_whitespace();
                match self.scanner.peek() {
                    Some(',') => {
                        self.scanner.bump();
                        self.scanner.skip_whitespace();
                        if self.scanner.peek() == Some('}') {
                            return Err(
                                self.err("trailing comma is not allowed in an inline table")
                            );
                        }
                    }
                    Some('}') => {
                        self.scanner.bump();
                        break;
                    }
                    _ => return Err(self.err("unterminated inline table")),
                }
            },
        }

        close_inline(&mut table);
        self.scanner.skip_whitespace();
        Ok(Value::Table(table))
    }

    /// Skips whitespace, comments, and line breaks inside an array.
    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        self.scanner.skip_whitespace();
        while self.scanner.at_eol() || self.scanner.peek() == Some('#') {
            if !self.scanner.next_line() {
                return Err(self.err("unclosed array"));
            }
            self.scanner.skip_whitespace();
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum DateKind {
    Date,
    DateTime,
    OffsetDateTime,
}

/// Resolves the current-table path from the root. Paths stored here were
/// validated by header parsing, so every component is a table or a
/// non-empty table array.
fn table_at_path<'t>(root: &'t mut Table, path: &[String]) -> &'t mut Table {
    let mut table = root;
    for part in path {
        table = match table.get_mut(part) {
            Some(Value::Table(child)) => child,
            Some(Value::TableArray(array)) => match array.last_mut() {
                Some(last) => last,
                None => unreachable!("header-created table arrays are never empty"),
            },
            _ => unreachable!("header paths resolve to tables"),
        };
    }
    table
}

/// Marks an inline table and every table nested below it as closed.
fn close_inline(table: &mut Table) {
    table.explicit = true;
    table.inline = true;
    for (_, value) in table.iter_mut() {
        match value {
            Value::Table(child) => close_inline(child),
            Value::TableArray(array) => {
                for element in array.iter_mut() {
                    close_inline(element);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    fn parse(input: &str) -> Table {
        Parser::new(input).parse().unwrap()
    }

    fn parse_err(input: &str) -> Error {
        Parser::new(input).parse().unwrap_err()
    }

    #[test]
    fn test_simple_key_values() {
        let doc = parse("a = 1\nb = \"x\"\n");
        assert_eq!(doc.get_as::<i64>("a").unwrap(), Some(1));
        assert_eq!(doc.get_as::<String>("b").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let doc = parse("# header\n\n  \t\na = 1 # trailing\n   # indented comment\n");
        assert_eq!(doc.get_as::<i64>("a").unwrap(), Some(1));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_line_terminators() {
        let doc = parse("a = 1\r\nb = 2\rc = 3\n");
        assert_eq!(doc.get_as::<i64>("a").unwrap(), Some(1));
        assert_eq!(doc.get_as::<i64>("b").unwrap(), Some(2));
        assert_eq!(doc.get_as::<i64>("c").unwrap(), Some(3));
    }

    #[test]
    fn test_line_numbers_in_errors() {
        assert_eq!(parse_err("a = 1\nb = @\n").line(), Some(2));
        assert_eq!(parse_err("[s]\nk = 2\n[s]\n").line(), Some(3));
        assert_eq!(parse_err("a = 1\r\nb = 2\rc = @\n").line(), Some(3));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = parse_err("a = 1\na = 2\n");
        assert!(err.to_string().contains("already present"));
    }

    #[test]
    fn test_redefinition_of_table() {
        let err = parse_err("[s]\nk = 2\n[s]\n");
        assert!(err.to_string().contains("redefinition of table s"));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_implicit_table_reopened() {
        let doc = parse("[a.b]\nk = 1\n[a]\nj = 2\n");
        assert_eq!(doc.get_qualified_as::<i64>("a.b.k").unwrap(), Some(1));
        assert_eq!(doc.get_qualified_as::<i64>("a.j").unwrap(), Some(2));
    }

    #[test]
    fn test_explicit_table_cannot_reopen_twice() {
        let err = parse_err("[a.b]\n[a]\n[a]\n");
        assert!(err.to_string().contains("redefinition"));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_dotted_key_values() {
        let doc = parse("a.b.c = 1\na.b.d = 2\n");
        assert_eq!(doc.get_qualified_as::<i64>("a.b.c").unwrap(), Some(1));
        assert_eq!(doc.get_qualified_as::<i64>("a.b.d").unwrap(), Some(2));
    }

    #[test]
    fn test_dotted_key_conflicts_with_value() {
        let err = parse_err("a = 1\na.b = 2\n");
        assert!(err.to_string().contains("already exists as a value"));
    }

    #[test]
    fn test_quoted_keys() {
        let doc = parse("\"a b\" = 1\n'c.d' = 2\n[\"e f\".g]\nh = 3\n");
        assert_eq!(doc.get_as::<i64>("a b").unwrap(), Some(1));
        assert_eq!(doc.get_as::<i64>("c.d").unwrap(), Some(2));
        assert_eq!(
            doc.get_table("e f").and_then(|t| t.get_table("g")).and_then(|t| t.get("h")).and_then(Value::as_integer),
            Some(3)
        );
    }

    #[test]
    fn test_empty_bare_key_rejected() {
        assert!(parse_err("= 1\n").to_string().contains("bare key"));
        assert!(parse_err("a. = 1\n").to_string().contains("bare key"));
        assert!(parse_err(".a = 1\n").to_string().contains("bare key"));
    }

    #[test]
    fn test_bare_key_forbidden_characters() {
        assert!(parse_err("a b = 1\n").to_string().contains("whitespace"));
        assert!(parse_err("a$ = 1\n").to_string().contains("forbidden character"));
    }

    #[test]
    fn test_table_arrays() {
        let doc = parse("[[t]]\nx = 1\n[[t]]\nx = 2\n");
        let t = doc.get_table_array("t").unwrap();
        assert!(!t.is_inline());
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0).unwrap().get_as::<i64>("x").unwrap(), Some(1));
        assert_eq!(t.get(1).unwrap().get_as::<i64>("x").unwrap(), Some(2));
    }

    #[test]
    fn test_table_array_subtables() {
        let doc = parse("[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"\n[[fruit]]\nname = \"banana\"\n");
        let fruit = doc.get_table_array("fruit").unwrap();
        assert_eq!(fruit.len(), 2);
        assert_eq!(
            fruit.get(0).unwrap().get_qualified_as::<String>("physical.color").unwrap().as_deref(),
            Some("red")
        );
        assert_eq!(
            fruit.get(1).unwrap().get_as::<String>("name").unwrap().as_deref(),
            Some("banana")
        );
    }

    #[test]
    fn test_static_table_array_cannot_be_appended() {
        let err = parse_err("t = [{x = 1}]\n[[t]]\n");
        assert!(err.to_string().contains("cannot be appended"));
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_header_on_table_array_rejected() {
        let err = parse_err("[[t]]\n[t]\n");
        assert!(err.to_string().contains("table array"));
    }

    #[test]
    fn test_inline_table() {
        let doc = parse("point = { x = 1, y = 2 }\n");
        let point = doc.get_table("point").unwrap();
        assert_eq!(point.get_as::<i64>("x").unwrap(), Some(1));
        assert_eq!(point.get_as::<i64>("y").unwrap(), Some(2));
    }

    #[test]
    fn test_empty_inline_table() {
        let doc = parse("empty = {}\n");
        assert!(doc.get_table("empty").unwrap().is_empty());
    }

    #[test]
    fn test_inline_table_trailing_comma_rejected() {
        let err = parse_err("point = { x = 1, }\n");
        assert!(err.to_string().contains("trailing comma"));
    }

    #[test]
    fn test_inline_table_is_closed() {
        let err = parse_err("a = { x = 1 }\n[a]\ny = 2\n");
        assert!(err.to_string().contains("redefinition"));

        let err = parse_err("a = { x = 1 }\na.y = 2\n");
        assert!(err.to_string().contains("inline table"));

        let err = parse_err("a = { b = { x = 1 } }\n[a.b.c]\n");
        assert!(err.to_string().contains("inline table"));
    }

    #[test]
    fn test_nested_inline_tables() {
        let doc = parse("a = { b = { c = 3 } }\n");
        assert_eq!(doc.get_qualified_as::<i64>("a.b.c").unwrap(), Some(3));
    }

    #[test]
    fn test_basic_string_escapes() {
        let doc = parse(r#"s = "a\tb\nc\"d\\e""#);
        assert_eq!(doc.get_as::<String>("s").unwrap().as_deref(), Some("a\tb\nc\"d\\e"));
    }

    #[test]
    fn test_invalid_escape_rejected() {
        assert!(parse_err(r#"s = "a\qb""#).to_string().contains("invalid escape"));
    }

    #[test]
    fn test_unicode_escapes() {
        let doc = parse(r#"s = "é \U0001F600 \U0010FFFF""#);
        assert_eq!(
            doc.get_as::<String>("s").unwrap().as_deref(),
            Some("\u{e9} \u{1F600} \u{10FFFF}")
        );
    }

    #[test]
    fn test_unicode_surrogates_rejected() {
        let err = parse_err(r#"s = "\uD800""#);
        assert!(err.to_string().contains("Unicode scalar value"));
        let err = parse_err(r#"s = "\U00110000""#);
        assert!(err.to_string().contains("Unicode scalar value"));
    }

    #[test]
    fn test_literal_string_is_raw() {
        let doc = parse(r"s = 'a\tb'");
        assert_eq!(doc.get_as::<String>("s").unwrap().as_deref(), Some(r"a\tb"));
    }

    #[test]
    fn test_multiline_basic_string() {
        let doc = parse("s = \"\"\"\nLine1\nLine2\"\"\"\n");
        assert_eq!(doc.get_as::<String>("s").unwrap().as_deref(), Some("Line1\nLine2"));
    }

    #[test]
    fn test_multiline_string_keeps_interior_newlines() {
        let doc = parse("s = \"\"\"a\nb\"\"\"\n");
        assert_eq!(doc.get_as::<String>("s").unwrap().as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_multiline_line_ending_backslash() {
        let doc = parse("s = \"\"\"one \\\n     \n   two\"\"\"\n");
        assert_eq!(doc.get_as::<String>("s").unwrap().as_deref(), Some("one two"));
    }

    #[test]
    fn test_multiline_literal_string() {
        let doc = parse("s = '''\na\\b\nc'''\n");
        assert_eq!(doc.get_as::<String>("s").unwrap().as_deref(), Some("a\\b\nc"));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_err("s = \"abc\n").to_string().contains("unterminated"));
        assert!(parse_err("s = \"\"\"abc\n").to_string().contains("unterminated"));
    }

    #[test]
    fn test_integers() {
        let doc = parse("a = 42\nb = -17\nc = +5\nd = 1_000_000\ne = 0\n");
        assert_eq!(doc.get_as::<i64>("a").unwrap(), Some(42));
        assert_eq!(doc.get_as::<i64>("b").unwrap(), Some(-17));
        assert_eq!(doc.get_as::<i64>("c").unwrap(), Some(5));
        assert_eq!(doc.get_as::<i64>("d").unwrap(), Some(1_000_000));
        assert_eq!(doc.get_as::<i64>("e").unwrap(), Some(0));
    }

    #[test]
    fn test_radix_integers() {
        let doc = parse("a = 0xdead_beef\nb = 0o755\nc = 0b1101\n");
        assert_eq!(doc.get_as::<i64>("a").unwrap(), Some(0xdead_beef));
        assert_eq!(doc.get_as::<i64>("b").unwrap(), Some(0o755));
        assert_eq!(doc.get_as::<i64>("c").unwrap(), Some(0b1101));
    }

    #[test]
    fn test_invalid_radix_digits() {
        assert!(Parser::new("a = 0o9\n").parse().is_err());
        assert!(Parser::new("a = 0b\n").parse().is_err());
    }

    #[test]
    fn test_integer_boundaries() {
        let doc = parse("max = 9223372036854775807\nmin = -9223372036854775808\n");
        assert_eq!(doc.get_as::<i64>("max").unwrap(), Some(i64::MAX));
        assert_eq!(doc.get_as::<i64>("min").unwrap(), Some(i64::MIN));

        let err = parse_err("over = 9223372036854775808\n");
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_leading_zeros() {
        assert!(parse_err("a = 01\n").to_string().contains("leading zeros"));
        assert_eq!(parse("a = 0\n").get_as::<i64>("a").unwrap(), Some(0));
        assert_eq!(parse("a = 0.5\n").get_as::<f64>("a").unwrap(), Some(0.5));
        assert_eq!(parse("a = 0e0\n").get_as::<f64>("a").unwrap(), Some(0.0));
    }

    #[test]
    fn test_underscore_rules() {
        assert!(Parser::new("a = 1__2\n").parse().is_err());
        assert!(Parser::new("a = _1\n").parse().is_err());
        assert!(Parser::new("a = 1_\n").parse().is_err());
    }

    #[test]
    fn test_floats() {
        let doc = parse("a = 1.5\nb = -0.01\nc = 5e22\nd = 6.626e-34\ne = 1e+6\nf = 9_224.1\n");
        assert_eq!(doc.get_as::<f64>("a").unwrap(), Some(1.5));
        assert_eq!(doc.get_as::<f64>("b").unwrap(), Some(-0.01));
        assert_eq!(doc.get_as::<f64>("c").unwrap(), Some(5e22));
        assert_eq!(doc.get_as::<f64>("d").unwrap(), Some(6.626e-34));
        assert_eq!(doc.get_as::<f64>("e").unwrap(), Some(1e6));
        assert_eq!(doc.get_as::<f64>("f").unwrap(), Some(9224.1));
    }

    #[test]
    fn test_float_specials() {
        let doc = parse("a = inf\nb = -inf\nc = +inf\nd = nan\ne = -nan\n");
        assert_eq!(doc.get_as::<f64>("a").unwrap(), Some(f64::INFINITY));
        assert_eq!(doc.get_as::<f64>("b").unwrap(), Some(f64::NEG_INFINITY));
        assert_eq!(doc.get_as::<f64>("c").unwrap(), Some(f64::INFINITY));
        assert!(doc.get_as::<f64>("d").unwrap().unwrap().is_nan());
        assert!(doc.get_as::<f64>("e").unwrap().unwrap().is_nan());
    }

    #[test]
    fn test_float_without_trailing_digits() {
        assert!(parse_err("a = 1.\n").to_string().contains("digits"));
        assert!(parse_err("a = 1e\n").to_string().contains("digits"));
    }

    #[test]
    fn test_float_overflow_is_an_error() {
        assert!(parse_err("a = 1e999\n").to_string().contains("out of range"));
    }

    #[test]
    fn test_exponent_leading_zero_rejected() {
        assert!(parse_err("a = 1e07\n").to_string().contains("leading zeros"));
        assert_eq!(parse("a = 1e0\n").get_as::<f64>("a").unwrap(), Some(1.0));
    }

    #[test]
    fn test_booleans() {
        let doc = parse("a = true\nb = false\n");
        assert_eq!(doc.get_as::<bool>("a").unwrap(), Some(true));
        assert_eq!(doc.get_as::<bool>("b").unwrap(), Some(false));
        assert!(Parser::new("a = truth\n").parse().is_err());
    }

    #[test]
    fn test_local_date() {
        let doc = parse("d = 1979-05-27\n");
        assert_eq!(doc.get("d").unwrap().as_date(), Some(&LocalDate::new(1979, 5, 27)));
    }

    #[test]
    fn test_local_time() {
        let doc = parse("t = 07:32:00\nu = 00:32:00.999999\n");
        assert_eq!(doc.get("t").unwrap().as_time(), Some(&LocalTime::new(7, 32, 0, 0)));
        assert_eq!(
            doc.get("u").unwrap().as_time(),
            Some(&LocalTime::new(0, 32, 0, 999_999))
        );
    }

    #[test]
    fn test_local_datetime_with_t_or_space() {
        let doc = parse("a = 1979-05-27T07:32:00\nb = 1979-05-27 07:32:00\n");
        let expected = LocalDateTime::new(LocalDate::new(1979, 5, 27), LocalTime::new(7, 32, 0, 0));
        assert_eq!(doc.get("a").unwrap().as_datetime(), Some(&expected));
        assert_eq!(doc.get("b").unwrap().as_datetime(), Some(&expected));
    }

    #[test]
    fn test_offset_datetime() {
        let doc = parse("a = 1979-05-27T07:32:00Z\nb = 1979-05-27T00:32:00-07:00\n");
        let a = doc.get("a").unwrap().as_offset_datetime().unwrap();
        assert!(a.is_utc());
        let b = doc.get("b").unwrap().as_offset_datetime().unwrap();
        assert_eq!(b.hour_offset, -7);
        assert_eq!(b.minute_offset, 0);
    }

    #[test]
    fn test_calendar_legality_not_validated() {
        let doc = parse("d = 2024-02-30\n");
        assert_eq!(doc.get("d").unwrap().as_date(), Some(&LocalDate::new(2024, 2, 30)));
    }

    #[test]
    fn test_arrays() {
        let doc = parse("a = [1, 2, 3]\nb = []\nc = [\"x\", \"y\"]\nd = [1, 2, 3,]\n");
        assert_eq!(doc.get_vec::<i64>("a"), Some(vec![1, 2, 3]));
        assert!(doc.get_array("b").unwrap().is_empty());
        assert_eq!(
            doc.get_vec::<String>("c"),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(doc.get_vec::<i64>("d"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_array_homogeneity_enforced() {
        let err = parse_err("arr = [1, 2, \"three\"]\n");
        assert!(err.to_string().contains("homogeneous"));
    }

    #[test]
    fn test_nested_arrays_may_differ() {
        let doc = parse("a = [[1, 2], [\"x\"], []]\n");
        let arr = doc.get_array("a").unwrap();
        assert_eq!(arr.element_kind(), Some(Kind::Array));
        assert_eq!(arr.len(), 3);
    }

    #[test]
    fn test_multiline_array_with_comments() {
        let doc = parse("a = [ # start\n  1, # one\n  # interlude\n  2,\n]\n");
        assert_eq!(doc.get_vec::<i64>("a"), Some(vec![1, 2]));
    }

    #[test]
    fn test_unclosed_array() {
        assert!(parse_err("a = [1, 2\n").to_string().contains("unclosed array"));
    }

    #[test]
    fn test_array_of_inline_tables() {
        let doc = parse("points = [{x = 1}, {x = 2}]\n");
        let ta = doc.get_table_array("points").unwrap();
        assert!(ta.is_inline());
        assert_eq!(ta.len(), 2);
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let err = parse_err("a = 1 junk\n");
        assert!(err.to_string().contains("unidentified trailing character"));
        assert!(Parser::new("[t] junk\n").parse().is_err());
    }

    #[test]
    fn test_header_syntax_errors() {
        assert!(parse_err("[]\n").to_string().contains("empty"));
        assert!(parse_err("[a\n").to_string().contains("unterminated"));
        assert!(parse_err("[[a]\n").to_string().contains("unterminated"));
        assert!(parse_err("[[]]\n").to_string().contains("empty"));
    }

    #[test]
    fn test_missing_equals() {
        assert!(parse_err("a\n").to_string().contains("value must follow"));
        assert!(parse_err("a 1\n").to_string().contains("whitespace"));
    }

    #[test]
    fn test_scenario_mixed_document() {
        let doc = parse(
            "title = \"demo\"\n\
             [owner]\n\
             name = \"Tom\"\n\
             dob = 1979-05-27T07:32:00Z\n\
             [database]\n\
             ports = [8001, 8001, 8002]\n\
             enabled = true\n\
             [servers.alpha]\n\
             ip = \"10.0.0.1\"\n\
             [servers.beta]\n\
             ip = \"10.0.0.2\"\n",
        );
        assert_eq!(doc.get_as::<String>("title").unwrap().as_deref(), Some("demo"));
        assert_eq!(
            doc.get_qualified_as::<String>("servers.beta.ip").unwrap().as_deref(),
            Some("10.0.0.2")
        );
        assert_eq!(doc.get_qualified_vec::<i64>("database.ports"), Some(vec![8001, 8001, 8002]));
    }
}
