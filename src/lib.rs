//! # math_inline
//!
//! Scanner, decoder and encoder for the `:math[...]` inline math syntax.
//!
//! ## What is inline math?
//!
//! `:math[...]` embeds an opaque math expression in free-form text, e.g.
//! `The area is :math[\pi r^2].` The expression may contain balanced
//! brackets, and `\]`, `\\` and `\[` escape the characters the scanner
//! treats specially.
//!
//! ## Key Features
//!
//! - **Streaming Scanner**: A single-pass state machine over any [`CharStream`]
//!   that either recognizes a span or rewinds without residue
//! - **Round-Trip Encoding**: [`encode`] produces data the scanner reads back
//!   with exactly the same boundaries, escaping only unbalanced brackets
//! - **Document Model**: [`from_str`] and [`to_string`] convert whole texts to
//!   and from [`Document`]s with serde-serializable nodes
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use math_inline::{decode, encode, scan};
//!
//! let source = ":math[a\\]b]";
//! let span = scan(source, 0).unwrap();
//! let value = decode(span.data_in(source));
//! assert_eq!(value, "a]b");
//!
//! assert_eq!(encode(&value), "a\\]b");
//! ```
//!
//! ### Documents
//!
//! ```rust
//! use math_inline::{from_str, to_string};
//!
//! let doc = from_str("The formula :math[x^2] is quadratic.");
//! assert_eq!(doc.math().next().map(|m| m.value()), Some("x^2"));
//! assert_eq!(to_string(&doc), "The formula :math[x^2] is quadratic.");
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Scanning**: O(n) in the length of the attempted span, no backtracking
//! - **Decoding / Encoding**: O(n), one pass (the encoder counts `]` first)
//! - **Memory**: No state is shared between calls
//!
//! ## Syntax
//!
//! See the [`syntax`] module for the grammar and escaping rules.

pub mod de;
pub mod error;
pub mod node;
pub mod options;
pub mod scan;
pub mod ser;
pub mod syntax;

pub use de::{decode, Parser};
pub use error::{Error, Reject, Result};
pub use node::{Document, Inline, InlineMath, MathData, Position};
pub use options::MathOptions;
pub use scan::{CharStream, Scanner, Span, StrCursor};
pub use ser::{encode, write_math, Serializer};

use std::io;

/// Scans for an inline math span starting at byte `offset` of `input`.
///
/// # Examples
///
/// ```rust
/// use math_inline::scan;
///
/// let span = scan("see :math[x]", 4).unwrap();
/// assert_eq!(span.data, 10..11);
/// assert!(scan("see :math[x]", 0).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::NoMatch`] if no span starts at `offset`, or
/// [`Error::InvalidOffset`] if `offset` is not a character boundary of `input`.
pub fn scan(input: &str, offset: usize) -> Result<Span> {
    let mut cursor = StrCursor::new(input);
    cursor.seek(offset)?;
    Scanner::new().scan(&mut cursor)
}

/// Formats a value as a complete `:math[...]` span.
///
/// # Examples
///
/// ```rust
/// use math_inline::to_math_string;
///
/// assert_eq!(to_math_string("f(x) = [a, b]"), ":math[f(x) = [a, b]]");
/// assert_eq!(to_math_string("["), ":math[\\[]");
/// ```
#[must_use]
pub fn to_math_string(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 8);
    write_math(&mut output, value);
    output
}

/// Parses text into a [`Document`] of text and inline math nodes.
///
/// Parsing never fails: anything that is not a valid span is text.
#[must_use]
pub fn from_str(s: &str) -> Document {
    Parser::new(s).parse()
}

/// Parses UTF-8 bytes into a [`Document`].
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8.
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    Ok(from_str(s))
}

/// Reads text from an I/O stream and parses it into a [`Document`].
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid UTF-8.
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(from_str(&string))
}

/// Serializes a [`Document`] back to text with default options.
#[must_use]
pub fn to_string(document: &Document) -> String {
    to_string_with_options(document, MathOptions::default())
}

/// Serializes a [`Document`] back to text with custom options.
#[must_use]
pub fn to_string_with_options(document: &Document, options: MathOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(document);
    serializer.into_inner()
}

/// Serializes a [`Document`] to a writer.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer<W>(writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, document, MathOptions::default())
}

/// Serializes a [`Document`] to a writer with custom options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer_with_options<W>(
    mut writer: W,
    document: &Document,
    options: MathOptions,
) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(document, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
