//! Document nodes produced by the tree builder.
//!
//! A [`Document`] is a flat run of [`Inline`] nodes: plain text and inline
//! math. Inline math nodes carry the rendering metadata a downstream HTML
//! renderer expects (a `code` element with the `language-math` and
//! `math-inline` classes whose only child is the decoded value).
//!
//! ## JSON shape
//!
//! ```rust
//! use math_inline::Inline;
//!
//! let node = Inline::math("x^2");
//! let json = serde_json::to_value(&node).unwrap();
//! assert_eq!(json["type"], "inlineMath");
//! assert_eq!(json["data"]["hName"], "code");
//! assert_eq!(json["data"]["hChildren"][0]["value"], "x^2");
//! ```

use serde::{Deserialize, Serialize};

/// Element name used when rendering inline math.
pub const ELEMENT_NAME: &str = "code";

/// Class list attached to rendered inline math.
pub const CLASS_NAMES: [&str; 2] = ["language-math", "math-inline"];

/// Byte range of a node in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

/// Text child of the rendered element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextChild {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HProperties {
    pub class_name: Vec<String>,
}

/// Rendering metadata for an inline math node.
///
/// The shape is fixed and always mirrors the node's value. It can only be
/// built with [`MathData::for_value`] and read through accessors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MathData {
    h_name: String,
    h_properties: HProperties,
    h_children: Vec<TextChild>,
}

impl MathData {
    pub fn for_value(value: &str) -> Self {
        MathData {
            h_name: ELEMENT_NAME.to_string(),
            h_properties: HProperties {
                class_name: CLASS_NAMES.iter().map(|c| c.to_string()).collect(),
            },
            h_children: vec![TextChild {
                value: value.to_string(),
            }],
        }
    }

    pub fn h_name(&self) -> &str {
        &self.h_name
    }

    pub fn class_name(&self) -> &[String] {
        &self.h_properties.class_name
    }

    pub fn h_children(&self) -> &[TextChild] {
        &self.h_children
    }
}

/// An inline math node holding a decoded value.
///
/// Deserializing ignores any incoming `data` and rebuilds it from `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InlineMathRepr")]
pub struct InlineMath {
    value: String,
    data: MathData,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
}

#[derive(Deserialize)]
struct InlineMathRepr {
    value: String,
    #[serde(default)]
    position: Option<Position>,
}

impl From<InlineMathRepr> for InlineMath {
    fn from(repr: InlineMathRepr) -> Self {
        InlineMath {
            position: repr.position,
            ..InlineMath::new(repr.value)
        }
    }
}

impl InlineMath {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let data = MathData::for_value(&value);
        InlineMath {
            value,
            data,
            position: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some(Position { start, end });
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn data(&self) -> &MathData {
        &self.data
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

/// A node in a [`Document`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text { value: String },
    InlineMath(InlineMath),
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text {
            value: value.into(),
        }
    }

    pub fn math(value: impl Into<String>) -> Self {
        Inline::InlineMath(InlineMath::new(value))
    }

    pub fn as_math(&self) -> Option<&InlineMath> {
        match self {
            Inline::InlineMath(math) => Some(math),
            Inline::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Inline::Text { value } => Some(value),
            Inline::InlineMath(_) => None,
        }
    }
}

/// A parsed text: a flat sequence of text and inline math nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Inline>,
}

impl Document {
    pub fn new(children: Vec<Inline>) -> Self {
        Document { children }
    }

    /// Iterates over the inline math nodes in document order.
    pub fn math(&self) -> impl Iterator<Item = &InlineMath> {
        self.children.iter().filter_map(Inline::as_math)
    }

    /// Merges adjacent text nodes and drops empty ones.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Inline> = Vec::with_capacity(self.children.len());
        for node in self.children.drain(..) {
            match node {
                Inline::Text { value } if value.is_empty() => {}
                Inline::Text { value } => match merged.last_mut() {
                    Some(Inline::Text { value: last }) => last.push_str(&value),
                    _ => merged.push(Inline::Text { value }),
                },
                math => merged.push(math),
            }
        }
        self.children = merged;
    }
}
