//! Inline math encoding and document serialization.
//!
//! [`encode`] turns a value into the literal data region of a span such that
//! the [`Scanner`](crate::Scanner) accepts `:math[` + data + `]` with exactly
//! that data region. [`Serializer`] writes a whole [`Document`] back to text.
//!
//! ## Bracket balancing
//!
//! A literal `[` is only safe when a later literal `]` is guaranteed to close
//! it, and a literal `]` is only safe while a literal `[` is open. The encoder
//! counts the `]` characters still ahead of it and escapes every bracket
//! that could not be balanced:
//!
//! ```rust
//! use math_inline::encode;
//!
//! assert_eq!(encode("f(x) = [a, b]"), "f(x) = [a, b]");
//! assert_eq!(encode("["), "\\[");
//! assert_eq!(encode("a]b"), "a\\]b");
//! assert_eq!(encode("]["), "\\]\\[");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use math_inline::{Document, Inline, MathOptions, Serializer};
//!
//! let doc = Document::new(vec![Inline::text("E = "), Inline::math("mc^2")]);
//! let mut serializer = Serializer::new(MathOptions::new());
//! serializer.serialize_document(&doc);
//! assert_eq!(serializer.into_inner(), "E = :math[mc^2]");
//! ```

use crate::node::{Document, Inline};
use crate::scan::{is_line_ending, is_word_char, CLOSE_MARKER, OPEN_MARKER};
use crate::MathOptions;
use tracing::warn;

/// Encodes a value as the data region of an inline math span.
///
/// # Examples
///
/// ```rust
/// use math_inline::encode;
///
/// assert_eq!(encode("x"), "x");
/// assert_eq!(encode("a\\"), "a\\\\");
/// assert_eq!(encode("\\alpha"), "\\alpha");
/// ```
#[must_use]
pub fn encode(value: &str) -> String {
    let mut remaining_close = value.chars().filter(|&ch| ch == ']').count();
    let mut depth = 0usize;
    let mut output = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '[' if depth >= remaining_close => output.push_str("\\["),
            '[' => {
                depth += 1;
                output.push('[');
            }
            ']' => {
                remaining_close -= 1;
                if depth > 0 {
                    depth -= 1;
                    output.push(']');
                } else {
                    output.push_str("\\]");
                }
            }
            // At the end of the value the closing marker follows.
            '\\' => match chars.peek() {
                None | Some(']' | '\\' | '[') => output.push_str("\\\\"),
                Some(_) => output.push('\\'),
            },
            _ => output.push(ch),
        }
    }

    output
}

/// Appends a complete `:math[...]` span for `value` to `output`.
pub fn write_math(output: &mut String, value: &str) {
    if value.chars().any(is_line_ending) {
        warn!(%value, "inline math value contains a line ending and will not re-scan");
    }
    output.push_str(OPEN_MARKER);
    output.push_str(&encode(value));
    output.push_str(CLOSE_MARKER);
}

/// Writes [`Document`]s back to text.
pub struct Serializer {
    output: String,
    options: MathOptions,
}

impl Serializer {
    pub fn new(options: MathOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    pub fn serialize_document(&mut self, document: &Document) {
        // Adjacent text nodes are written as one run so escapes see across them.
        let mut pending = String::new();

        for node in &document.children {
            match node {
                Inline::Text { value } => pending.push_str(value),
                Inline::InlineMath(math) => {
                    let prev = pending.chars().next_back();
                    if let Some(prev) = prev.filter(|&ch| is_word_char(ch)) {
                        warn!(
                            %prev,
                            value = %math.value(),
                            "inline math after a word character will be read back as text"
                        );
                    }
                    self.write_text(&pending, true);
                    pending.clear();
                    write_math(&mut self.output, math.value());
                }
            }
        }

        self.write_text(&pending, false);
    }

    fn write_text(&mut self, text: &str, before_math: bool) {
        let mut chars = text.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            let next = match chars.peek() {
                Some(&(_, next)) => Some(next),
                None if before_math => Some(':'),
                None => None,
            };

            match ch {
                '\\' if next.is_some_and(|next| next.is_ascii_punctuation()) => {
                    self.output.push_str("\\\\");
                }
                ':' if self.options.escape_trigger && text[index + 1..].starts_with("math[") => {
                    self.output.push_str("\\:");
                }
                _ => self.output.push(ch),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(document: &Document) -> String {
        let mut serializer = Serializer::new(MathOptions::new());
        serializer.serialize_document(document);
        serializer.into_inner()
    }

    #[test]
    fn test_encode_plain() {
        assert_eq!(encode(""), "");
        assert_eq!(encode("E = mc^2"), "E = mc^2");
        assert_eq!(encode("\\alpha + \\beta"), "\\alpha + \\beta");
    }

    #[test]
    fn test_encode_close_brackets() {
        assert_eq!(encode("a]b"), "a\\]b");
        assert_eq!(encode("a\\]"), "a\\\\\\]");
        assert_eq!(encode("[a]]"), "[a]\\]");
    }

    #[test]
    fn test_encode_open_brackets() {
        assert_eq!(encode("["), "\\[");
        assert_eq!(encode("[[a]"), "[\\[a]");
        assert_eq!(encode("[a][b][c]"), "[a][b][c]");
        assert_eq!(encode("[[x]]"), "[[x]]");
    }

    #[test]
    fn test_encode_backslashes() {
        assert_eq!(encode("a\\"), "a\\\\");
        assert_eq!(encode("\\\\"), "\\\\\\\\");
        assert_eq!(encode("\\["), "\\\\\\[");
        assert_eq!(encode("\\[]"), "\\\\[]");
    }

    #[test]
    fn test_write_math() {
        let mut output = String::new();
        write_math(&mut output, "a]b");
        assert_eq!(output, ":math[a\\]b]");
    }

    #[test]
    fn test_serialize_escapes_trigger_in_text() {
        let doc = Document::new(vec![Inline::text("literal :math[x] here")]);
        assert_eq!(serialize(&doc), "literal \\:math[x] here");

        let mut serializer = Serializer::new(MathOptions::verbatim());
        serializer.serialize_document(&doc);
        assert_eq!(serializer.into_inner(), "literal :math[x] here");
    }

    #[test]
    fn test_serialize_trigger_split_across_text_nodes() {
        let doc = Document::new(vec![Inline::text("a :"), Inline::text("math[b]")]);
        assert_eq!(serialize(&doc), "a \\:math[b]");
    }

    #[test]
    fn test_serialize_backslash_before_punctuation() {
        let doc = Document::new(vec![Inline::text("a\\:b \\q")]);
        assert_eq!(serialize(&doc), "a\\\\:b \\q");

        let doc = Document::new(vec![Inline::text("end\\"), Inline::math("x")]);
        assert_eq!(serialize(&doc), "end\\\\:math[x]");
    }

    #[test]
    fn test_serialize_math_nodes() {
        let doc = Document::new(vec![
            Inline::math("x"),
            Inline::text(" and "),
            Inline::math("["),
        ]);
        assert_eq!(serialize(&doc), ":math[x] and :math[\\[]");
    }
}
