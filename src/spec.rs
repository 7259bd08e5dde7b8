//! TOML Dialect Reference
//!
//! This module documents the TOML v0.5 dialect accepted and emitted by this
//! library. It contains no code — it is the format contract the parser and
//! writer are tested against.
//!
//! # Documents
//!
//! A document is a sequence of lines terminated by `\n`, `\r\n`, or a bare
//! `\r`. Each line is blank, a comment (`# ...`), a `[table]` or
//! `[[table-array]]` header, or a `key = value` assignment. Anything after
//! a complete construct must be whitespace or a comment.
//!
//! Comments and whitespace are not preserved: parsing produces a value
//! tree, and serializing that tree produces a normalized document.
//!
//! # Keys
//!
//! | Form | Syntax | Notes |
//! |------|--------|-------|
//! | Bare | `[A-Za-z0-9_-]+` | may not be empty |
//! | Basic quoted | `"..."` | escape sequences processed |
//! | Literal quoted | `'...'` | raw, no escapes |
//!
//! Keys join with `.` into dotted paths, both in headers (`[a.b.c]`) and in
//! assignments (`a.b.c = 1`). Path prefixes create *implicit* tables;
//! a later `[a]` header may claim an implicit table exactly once, provided
//! it holds only sub-tables at that point. Redeclaring an explicit table,
//! assigning into an inline table, or appending to an inline table array is
//! an error.
//!
//! # Values
//!
//! | Type | Examples |
//! |------|----------|
//! | String | `"basic"`, `'literal'`, `"""multi-line"""`, `'''raw'''` |
//! | Integer | `42`, `-17`, `1_000`, `0xdead_beef`, `0o755`, `0b1101` |
//! | Float | `1.5`, `5e22`, `6.626e-34`, `inf`, `-inf`, `nan` |
//! | Boolean | `true`, `false` |
//! | Local date | `1979-05-27` |
//! | Local time | `07:32:00`, `00:32:00.999999` |
//! | Local datetime | `1979-05-27T07:32:00` (a space separator is accepted) |
//! | Offset datetime | `1979-05-27T07:32:00Z`, `1979-05-27T00:32:00-07:00` |
//! | Array | `[1, 2, 3]`, `[[1, 2], ["a"]]` |
//! | Inline table | `{ x = 1, y = 2 }` |
//!
//! Integers are 64-bit signed; literals outside that range are errors.
//! Leading zeros are rejected (`01`), while `0`, `0.5`, and `0e0` are
//! fine. Underscore separators must sit between two digits.
//!
//! Basic strings process the escapes `\b \t \n \f \r \" \\ \uXXXX`
//! `\UXXXXXXXX`; Unicode escapes must denote scalar values (no surrogates,
//! nothing above `U+10FFFF`). In multi-line basic strings a backslash at
//! the end of a line swallows all following whitespace, newlines included.
//!
//! Arrays are homogeneous — every element has the first element's type —
//! except that nested arrays may differ among themselves in element type.
//! A trailing comma is allowed after the last array element but not after
//! the last inline-table pair; arrays may span lines and contain comments,
//! inline tables may not span lines.
//!
//! # Divergences from the TOML v0.5 text
//!
//! Inherited from the C++ implementation this library descends from, or
//! chosen deliberately:
//!
//! - Calendar legality is not validated: `2024-02-30` parses.
//! - A space is accepted as the date/time separator on input; `T` is
//!   always emitted.
//! - Fractional seconds beyond microsecond precision are parsed and
//!   discarded.
//! - `{}` is a valid (empty) inline table.
//! - Float conversion is locale-independent; the decimal point is always
//!   `.`.
//!
//! # Emission
//!
//! The writer emits scalar and array entries of a table before its child
//! tables, headers in `[dotted.path]` form (quoting non-bare components),
//! arrays on one line, floats in shortest round-trip form with a forced
//! decimal point or exponent, and datetimes in the forms shown above with
//! `Z` for a zero offset. Nesting below the root is indented with a
//! configurable unit, one per level, defaulting to a tab.
