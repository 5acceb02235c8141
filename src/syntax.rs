//! Inline Math Syntax
//!
//! This module documents the `:math[...]` span syntax as implemented by this
//! library. It contains no code.
//!
//! # Overview
//!
//! An inline math span embeds an opaque math expression in running text:
//!
//! ```text
//! The area is :math[\pi r^2] square units.
//! ```
//!
//! The expression itself is never interpreted. Only the delimiters, the
//! bracket balance and three escape sequences are significant.
//!
//! # Grammar
//!
//! ```text
//! span    = ":math[" data "]"
//! data    = *( escape / nested / char )
//! escape  = "\" ( "]" / "\" / "[" )
//! nested  = "[" data "]"
//! char    = any character except line endings, "[" and "]"
//! ```
//!
//! **Rules**:
//! - Matching is case-sensitive: `:Math[x]` is plain text.
//! - The `:` must not directly follow an ASCII letter, digit or underscore,
//!   so `foo:math[x]` is plain text while `(:math[x])` and `a :math[x]`
//!   contain math. Start of input is fine.
//! - A span never crosses a line ending (`\n` or `\r`). An unterminated span
//!   at end of input is plain text.
//! - A backslash that is not followed by `]`, `\` or `[` is an ordinary
//!   character, so `\alpha` needs no escaping.
//!
//! # Bracket Nesting
//!
//! Unescaped `[` and `]` inside the data must balance. The first unescaped
//! `]` that does not close a nested `[` ends the span:
//!
//! ```text
//! :math[f(x) = [a, b]]     value: f(x) = [a, b]
//! :math[[a][b][c]]         value: [a][b][c]
//! ```
//!
//! # Escapes
//!
//! | Data | Value | Notes |
//! |------|-------|-------|
//! | `\]` | `]` | Does not end the span |
//! | `\\` | `\` | Does not start another escape |
//! | `\[` | `\[` | Does not open a nested level; the backslash is kept |
//! | `\a` | `\a` | Any other backslash is literal |
//!
//! `\[` keeps its backslash when decoded so that TeX commands such as
//! `\[` survive untouched. A value containing a `[` with no later `]` to
//! balance it is therefore written as `\[` and reads back as `\[`.
//!
//! # Encoding
//!
//! Writing a value back out escapes only what the scanner would misread:
//!
//! - A `]` with no open literal `[` before it becomes `\]`.
//! - A `[` is written literally only while more `]` characters remain ahead
//!   than there are open literal brackets; otherwise it becomes `\[`.
//! - A `\` directly before `]`, `\`, `[` or at the very end of the value
//!   becomes `\\`.
//!
//! ```text
//! a]b          :math[a\]b]
//! a\           :math[a\\]
//! f(x) = [a]   :math[f(x) = [a]]
//! ```
//!
//! # Surrounding Text
//!
//! When whole documents are parsed with [`from_str`](crate::from_str), a
//! backslash before ASCII punctuation in running text escapes that character.
//! The serializer uses this to keep literal text such as `:math[` from being
//! read back as math:
//!
//! ```text
//! text node ":math[x]"     written as   \:math[x]
//! ```
