//! Configuration options for document serialization.
//!
//! ## Examples
//!
//! ```rust
//! use math_inline::{from_str, to_string_with_options, MathOptions};
//!
//! let doc = from_str("see \\:math[x]");
//!
//! // Default: a literal `:math[` in text is written back escaped
//! let escaped = to_string_with_options(&doc, MathOptions::new());
//! assert_eq!(escaped, "see \\:math[x]");
//!
//! // Verbatim text, the output re-scans as math
//! let verbatim = to_string_with_options(&doc, MathOptions::new().with_escape_trigger(false));
//! assert_eq!(verbatim, "see :math[x]");
//! ```

/// Configuration options for serializing a [`Document`](crate::Document).
///
/// # Examples
///
/// ```rust
/// use math_inline::MathOptions;
///
/// let options = MathOptions::new();
/// assert!(options.escape_trigger);
///
/// let options = MathOptions::verbatim();
/// assert!(!options.escape_trigger);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathOptions {
    /// Escape a `:` in running text when it is immediately followed by `math[`.
    pub escape_trigger: bool,
}

impl Default for MathOptions {
    fn default() -> Self {
        MathOptions {
            escape_trigger: true,
        }
    }
}

impl MathOptions {
    /// Creates default options (trigger escaping enabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that write text nodes without trigger escaping.
    #[must_use]
    pub fn verbatim() -> Self {
        MathOptions {
            escape_trigger: false,
        }
    }

    /// Sets whether a `:` followed by `math[` in text is written as `\:`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use math_inline::MathOptions;
    ///
    /// let options = MathOptions::new().with_escape_trigger(false);
    /// assert_eq!(options, MathOptions::verbatim());
    /// ```
    #[must_use]
    pub fn with_escape_trigger(mut self, escape_trigger: bool) -> Self {
        self.escape_trigger = escape_trigger;
        self
    }
}
