//! Inline math decoding and document parsing.
//!
//! [`decode`] turns the raw data region of a scanned span into its value.
//! [`Parser`] drives the [`Scanner`] over a whole text and builds a
//! [`Document`] of text and inline math nodes.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use math_inline::{from_str, Inline, InlineMath};
//!
//! let doc = from_str("The formula :math[x^2] is quadratic.");
//! assert_eq!(doc.children[0], Inline::text("The formula "));
//! assert_eq!(
//!     doc.children[1],
//!     Inline::InlineMath(InlineMath::new("x^2").with_position(12, 22))
//! );
//! assert_eq!(doc.children[2], Inline::text(" is quadratic."));
//! ```

use crate::node::{Document, Inline, InlineMath};
use crate::scan::{CharStream, Scanner, StrCursor};
use tracing::debug;

/// Decodes a raw data region into its value.
///
/// `\]` becomes `]` and `\\` becomes `\`. Every other character, including
/// the backslash of `\[` or of `\alpha`, is kept as is.
///
/// # Examples
///
/// ```rust
/// use math_inline::decode;
///
/// assert_eq!(decode("a\\]b"), "a]b");
/// assert_eq!(decode("a\\\\"), "a\\");
/// assert_eq!(decode("\\alpha + \\[x"), "\\alpha + \\[x");
/// ```
#[must_use]
pub fn decode(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next @ (']' | '\\')) = chars.peek() {
                value.push(next);
                chars.next();
                continue;
            }
        }
        value.push(ch);
    }

    value
}

/// Builds a [`Document`] from text containing inline math spans.
///
/// A backslash before ASCII punctuation in running text escapes that
/// character, so `\:math[x]` stays text. Spans are only recognized within a
/// single line.
pub struct Parser<'a> {
    cursor: StrCursor<'a>,
    scanner: Scanner,
    text: String,
    children: Vec<Inline>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            cursor: StrCursor::new(input),
            scanner: Scanner::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Document {
        while let Some(ch) = self.cursor.peek() {
            match ch {
                ':' => self.parse_colon(),
                '\\' => self.parse_backslash(),
                _ => {
                    self.cursor.consume();
                    self.text.push(ch);
                }
            }
        }

        self.flush_text();
        Document::new(self.children)
    }

    fn parse_colon(&mut self) {
        match self.scanner.scan(&mut self.cursor) {
            Ok(span) => {
                self.flush_text();
                let value = decode(self.scanner.raw());
                debug!(start = span.start(), end = span.end(), %value, "inline math node");
                let node = InlineMath::new(value).with_position(span.start(), span.end());
                self.children.push(Inline::InlineMath(node));
            }
            Err(_) => {
                self.cursor.consume();
                self.text.push(':');
            }
        }
    }

    fn parse_backslash(&mut self) {
        self.cursor.consume();
        match self.cursor.peek() {
            Some(next) if next.is_ascii_punctuation() => {
                self.cursor.consume();
                self.text.push(next);
            }
            _ => self.text.push('\\'),
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let value = std::mem::take(&mut self.text);
            self.children.push(Inline::Text { value });
        }
    }
}
