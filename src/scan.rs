//! Inline math scanning.
//!
//! The [`Scanner`] is a single-pass state machine that recognizes one
//! `:math[...]` span at the current position of a [`CharStream`]. On success
//! it reports the three sub-regions of the span and leaves the stream just
//! past the closing `]`. On failure the stream is rewound to where the
//! attempt started, so the caller can try something else at that position.
//!
//! ## Usage
//!
//! ```rust
//! use math_inline::{CharStream, Scanner, StrCursor};
//!
//! let source = "area :math[\\pi r^2] units";
//! let mut cursor = StrCursor::new(source);
//! cursor.seek(5).unwrap();
//!
//! let mut scanner = Scanner::new();
//! let span = scanner.scan(&mut cursor).unwrap();
//! assert_eq!(span.data_in(source), "\\pi r^2");
//! assert_eq!(scanner.raw(), "\\pi r^2");
//! assert_eq!(cursor.offset(), span.end());
//! ```

use crate::error::Reject;
use crate::{Error, Result};
use std::ops::Range;
use tracing::trace;

/// Opening marker of an inline math span.
pub const OPEN_MARKER: &str = ":math[";

/// Closing marker of an inline math span.
pub const CLOSE_MARKER: &str = "]";

/// Returns true for the characters that may not precede the opening `:`.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Returns true for characters that end a line. Spans never cross them.
#[inline]
pub fn is_line_ending(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Character source driven by the [`Scanner`].
///
/// Offsets are opaque positions chosen by the implementation; the scanner
/// only hands back values it previously read from [`CharStream::offset`].
pub trait CharStream {
    /// The character immediately before the current position, or `None` at
    /// start of stream.
    fn previous(&self) -> Option<char>;

    /// The character at the current position without consuming it.
    fn peek(&self) -> Option<char>;

    /// Consumes and returns the character at the current position.
    fn consume(&mut self) -> Option<char>;

    /// The current position.
    fn offset(&self) -> usize;

    /// Moves back to a position previously returned by [`CharStream::offset`].
    fn rewind(&mut self, offset: usize);
}

/// A [`CharStream`] over a string slice, positioned by byte offset.
#[derive(Clone, Debug)]
pub struct StrCursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> StrCursor<'a> {
    pub fn new(input: &'a str) -> Self {
        StrCursor { input, position: 0 }
    }

    /// Moves the cursor to byte `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOffset`] if `offset` is past the end of the
    /// input or does not fall on a character boundary.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if !self.input.is_char_boundary(offset) {
            return Err(Error::InvalidOffset { offset });
        }
        self.position = offset;
        Ok(())
    }

    /// The input this cursor walks over.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

impl CharStream for StrCursor<'_> {
    fn previous(&self) -> Option<char> {
        self.input[..self.position].chars().next_back()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn offset(&self) -> usize {
        self.position
    }

    fn rewind(&mut self, offset: usize) {
        debug_assert!(
            self.input.is_char_boundary(offset),
            "rewind to non-boundary offset {}",
            offset
        );
        self.position = offset;
    }
}

/// Location of a recognized `:math[...]` span.
///
/// All ranges are in stream offsets (byte offsets for [`StrCursor`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// The `:math[` opening marker.
    pub open: Range<usize>,
    /// The raw data between the markers, escapes not yet resolved.
    pub data: Range<usize>,
    /// The terminating `]`.
    pub close: Range<usize>,
}

impl Span {
    pub fn start(&self) -> usize {
        self.open.start
    }

    pub fn end(&self) -> usize {
        self.close.end
    }

    /// Slices the raw data region out of the source this span was scanned from.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not the string the span was produced from.
    pub fn data_in<'a>(&self, source: &'a str) -> &'a str {
        &source[self.data.clone()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Colon,
    M,
    A,
    T,
    H,
    Bracket,
    Data { depth: usize },
    Escape { depth: usize },
}

/// Recognizes `:math[...]` spans one character at a time.
///
/// The scanner keeps the raw data of the last successful scan in an
/// accumulator that is cleared at the start of every attempt. Hand it to
/// [`decode`](crate::decode) to obtain the value.
#[derive(Debug, Default)]
pub struct Scanner {
    raw: String,
}

impl Scanner {
    pub fn new() -> Self {
        Scanner { raw: String::new() }
    }

    /// Raw data region of the most recent successful scan.
    ///
    /// Empty after a rejected attempt.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Takes the raw data out of the accumulator, leaving it empty.
    pub fn take_raw(&mut self) -> String {
        std::mem::take(&mut self.raw)
    }

    /// Attempts to scan a span starting at the stream's current position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatch`] if no span starts here. The stream is
    /// rewound to its starting position and the accumulator is empty.
    pub fn scan<S: CharStream + ?Sized>(&mut self, stream: &mut S) -> Result<Span> {
        self.raw.clear();
        let start = stream.offset();

        match self.run(stream, start) {
            Ok(span) => {
                trace!(start = span.start(), end = span.end(), "inline math accepted");
                Ok(span)
            }
            Err(reason) => {
                trace!(offset = start, %reason, "inline math rejected");
                stream.rewind(start);
                self.raw.clear();
                Err(Error::no_match(start, reason))
            }
        }
    }

    fn run<S: CharStream + ?Sized>(
        &mut self,
        stream: &mut S,
        start: usize,
    ) -> std::result::Result<Span, Reject> {
        let mut state = State::Colon;
        let mut data_start = start;

        loop {
            let code = stream.peek();

            state = match state {
                State::Data { depth } => match code {
                    None => return Err(Reject::UnexpectedEof),
                    Some(ch) if is_line_ending(ch) => return Err(Reject::LineEnding),
                    Some('\\') => {
                        self.take(stream);
                        State::Escape { depth }
                    }
                    Some('[') => {
                        self.take(stream);
                        State::Data { depth: depth + 1 }
                    }
                    Some(']') if depth > 0 => {
                        self.take(stream);
                        State::Data { depth: depth - 1 }
                    }
                    Some(']') => {
                        let data_end = stream.offset();
                        stream.consume();
                        return Ok(Span {
                            open: start..data_start,
                            data: data_start..data_end,
                            close: data_end..stream.offset(),
                        });
                    }
                    Some(_) => {
                        self.take(stream);
                        State::Data { depth }
                    }
                },
                // Escaped brackets and backslashes are data and leave depth alone.
                // Anything else is re-dispatched unconsumed.
                State::Escape { depth } => {
                    if let Some(']' | '\\' | '[') = code {
                        self.take(stream);
                    }
                    State::Data { depth }
                }
                State::Colon => {
                    expect(code, ':')?;
                    // Only checked once the `:` itself matched.
                    if let Some(prev) = stream.previous().filter(|&ch| is_word_char(ch)) {
                        return Err(Reject::WordCharBefore(prev));
                    }
                    stream.consume();
                    State::M
                }
                State::M => {
                    expect(code, 'm')?;
                    stream.consume();
                    State::A
                }
                State::A => {
                    expect(code, 'a')?;
                    stream.consume();
                    State::T
                }
                State::T => {
                    expect(code, 't')?;
                    stream.consume();
                    State::H
                }
                State::H => {
                    expect(code, 'h')?;
                    stream.consume();
                    State::Bracket
                }
                State::Bracket => {
                    expect(code, '[')?;
                    stream.consume();
                    data_start = stream.offset();
                    State::Data { depth: 0 }
                }
            };
        }
    }

    #[inline]
    fn take<S: CharStream + ?Sized>(&mut self, stream: &mut S) {
        if let Some(ch) = stream.consume() {
            self.raw.push(ch);
        }
    }
}

fn expect(found: Option<char>, expected: char) -> std::result::Result<(), Reject> {
    if found == Some(expected) {
        Ok(())
    } else {
        Err(Reject::Mismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(input: &str) -> (Result<Span>, String, usize) {
        let mut cursor = StrCursor::new(input);
        let mut scanner = Scanner::new();
        let result = scanner.scan(&mut cursor);
        (result, scanner.take_raw(), cursor.offset())
    }

    #[test]
    fn test_basic_span() {
        let (span, raw, offset) = scan_str(":math[x]");
        let span = span.unwrap();
        assert_eq!(span.open, 0..6);
        assert_eq!(span.data, 6..7);
        assert_eq!(span.close, 7..8);
        assert_eq!(raw, "x");
        assert_eq!(offset, 8);
    }

    #[test]
    fn test_nested_brackets_track_depth() {
        let (span, raw, _) = scan_str(":math[[a][b][c]] tail");
        assert_eq!(raw, "[a][b][c]");
        assert_eq!(span.unwrap().end(), 16);
    }

    #[test]
    fn test_escapes_kept_in_raw() {
        let (_, raw, _) = scan_str(":math[a\\]b]");
        assert_eq!(raw, "a\\]b");

        let (_, raw, _) = scan_str(":math[a\\\\]");
        assert_eq!(raw, "a\\\\");

        let (_, raw, _) = scan_str(":math[\\[]");
        assert_eq!(raw, "\\[");
    }

    #[test]
    fn test_backslash_before_plain_char_redispatches() {
        // `\[` does not open a level, so the first `]` terminates
        let (span, raw, _) = scan_str(":math[\\[x]]");
        assert_eq!(raw, "\\[x");
        assert_eq!(span.unwrap().end(), 10);

        // `\a` keeps the backslash and the following `[` still nests
        let (_, raw, _) = scan_str(":math[\\a[b]]");
        assert_eq!(raw, "\\a[b]");
    }

    #[test]
    fn test_rejection_leaves_no_residue() {
        let mut cursor = StrCursor::new("x :math[unterminated");
        cursor.seek(2).unwrap();
        let mut scanner = Scanner::new();
        let err = scanner.scan(&mut cursor).unwrap_err();
        assert_eq!(err.reject(), Some(Reject::UnexpectedEof));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(scanner.raw(), "");
    }

    #[test]
    fn test_prefix_mismatch() {
        let (span, _, offset) = scan_str(": math[x]");
        assert_eq!(
            span.unwrap_err().reject(),
            Some(Reject::Mismatch {
                expected: 'm',
                found: Some(' ')
            })
        );
        assert_eq!(offset, 0);

        let (span, _, _) = scan_str(":mat");
        assert_eq!(
            span.unwrap_err().reject(),
            Some(Reject::Mismatch {
                expected: 'h',
                found: None
            })
        );
    }

    #[test]
    fn test_line_endings_reject() {
        for input in [":math[x\ny]", ":math[x\r\ny]", ":math[x\\\ny]"] {
            let (span, _, _) = scan_str(input);
            assert_eq!(span.unwrap_err().reject(), Some(Reject::LineEnding));
        }
    }

    #[test]
    fn test_trailing_backslash_runs_to_eof() {
        let (span, _, _) = scan_str(":math[a\\]");
        assert_eq!(span.unwrap_err().reject(), Some(Reject::UnexpectedEof));
    }

    #[test]
    fn test_word_char_before() {
        let mut cursor = StrCursor::new("foo:math[x]");
        cursor.seek(3).unwrap();
        let err = Scanner::new().scan(&mut cursor).unwrap_err();
        assert_eq!(err, Error::no_match(3, Reject::WordCharBefore('o')));

        let mut cursor = StrCursor::new("(:math[x])");
        cursor.seek(1).unwrap();
        assert!(Scanner::new().scan(&mut cursor).is_ok());
    }

    #[test]
    fn test_colon_checked_before_word_char() {
        let mut cursor = StrCursor::new("fooxmath[x]");
        cursor.seek(3).unwrap();
        let err = Scanner::new().scan(&mut cursor).unwrap_err();
        assert_eq!(
            err.reject(),
            Some(Reject::Mismatch {
                expected: ':',
                found: Some('x')
            })
        );
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "non-boundary")]
    fn test_rewind_rejects_non_boundary_offset() {
        let mut cursor = StrCursor::new("é");
        cursor.rewind(1);
    }

    #[test]
    fn test_multibyte_offsets() {
        let source = "é :math[α]";
        let mut cursor = StrCursor::new(source);
        cursor.seek(3).unwrap();
        let span = Scanner::new().scan(&mut cursor).unwrap();
        assert_eq!(span.data_in(source), "α");
        assert_eq!(span.end(), source.len());
    }

    #[test]
    fn test_seek_rejects_bad_offsets() {
        let mut cursor = StrCursor::new("é");
        assert_eq!(cursor.seek(1), Err(Error::InvalidOffset { offset: 1 }));
        assert_eq!(cursor.seek(3), Err(Error::InvalidOffset { offset: 3 }));
        assert!(cursor.seek(2).is_ok());
        assert!(cursor.at_end());
    }
}
