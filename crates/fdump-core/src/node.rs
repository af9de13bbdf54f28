//! The rendered-tree output model.
//!
//! A dump produces a [`RenderedTree`]: nested headers and rows with tagged
//! terminal labels. The model is markup-agnostic — only the structural shape
//! (header + ordered rows, nesting, tags, default-expanded state) is
//! load-bearing; a sink layer decides what a toggler or a cross-reference
//! link concretely looks like.

use crate::inspect::FieldModifiers;

/// Style tag of a terminal label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    /// The absence of a value.
    Null,
    /// Boolean literal.
    Boolean,
    /// Integer scalar.
    Integer,
    /// Floating-point scalar.
    Double,
    /// Text scalar.
    Text,
    /// Opaque platform handle.
    Handle,
    /// Cycle marker or repeated-reference marker.
    Recursion,
    /// Value that could not be read or rendered.
    Unreadable,
}

impl ValueTag {
    /// Stable lowercase name, usable as a styling hook.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Text => "string",
            Self::Handle => "handle",
            Self::Recursion => "recursion",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Target of a record cross-reference marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backref {
    /// Runtime type name of the referenced record.
    pub type_name: String,
    /// Its per-type ordinal.
    pub ordinal: usize,
}

/// A terminal label.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Style tag.
    pub tag: ValueTag,
    /// Display text. May be empty for the empty text scalar; the sink layer
    /// substitutes its blank placeholder. `"0"` is never blanked.
    pub text: String,
    /// Reported length for text scalars (grapheme clusters).
    pub len: Option<usize>,
    /// Set on record cross-reference markers.
    pub backref: Option<Backref>,
}

impl Leaf {
    /// Create a terminal label.
    #[must_use]
    pub fn new(tag: ValueTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
            len: None,
            backref: None,
        }
    }

    /// Attach a reported text length.
    #[must_use]
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    /// Attach a cross-reference target.
    #[must_use]
    pub fn with_backref(mut self, backref: Backref) -> Self {
        self.backref = Some(backref);
        self
    }
}

/// Header of a composite node.
#[derive(Debug, Clone, PartialEq)]
pub enum Header {
    /// Sequence header; `len` is the entry count.
    Seq {
        /// Entry count.
        len: usize,
    },
    /// Record header.
    Record {
        /// Runtime type name.
        type_name: String,
        /// Per-type instance ordinal.
        ordinal: usize,
        /// Ancestor type names, most-derived first.
        ancestors: Vec<String>,
    },
}

/// One row of a composite node.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A sequence entry: key label plus rendered value.
    Entry {
        /// The key, rendered as a terminal scalar.
        key: Leaf,
        /// The entry's value.
        value: Rendered,
    },
    /// A record field.
    Field {
        /// Field name.
        name: String,
        /// Visibility and storage modifiers.
        modifiers: FieldModifiers,
        /// The field's value.
        value: Rendered,
    },
    /// Group separator introducing fields inherited from an ancestor type.
    Inherited {
        /// The declaring ancestor's type name.
        type_name: String,
    },
}

/// A composite node: header, ordered rows, and its default display state.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Header describing the composite.
    pub header: Header,
    /// Rows in display order. Always fully present; collapsing is a display
    /// default, not data loss.
    pub rows: Vec<Row>,
    /// Whether the node renders expanded by default.
    pub expanded: bool,
}

/// A rendered value: terminal label or composite node.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Terminal label.
    Leaf(Leaf),
    /// Composite node.
    Node(Box<Node>),
}

impl Rendered {
    /// The node, if this is a composite.
    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }

    /// The leaf, if this is a terminal label.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Node(_) => None,
        }
    }
}

/// Output of one top-level dump call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTree {
    /// Process-wide dump-call sequence number; keeps anchors unique when
    /// several dumps land in one document.
    pub call: u64,
    /// The rendered root value.
    pub root: Rendered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_are_stable() {
        assert_eq!(ValueTag::Null.as_str(), "null");
        assert_eq!(ValueTag::Boolean.as_str(), "boolean");
        assert_eq!(ValueTag::Integer.as_str(), "integer");
        assert_eq!(ValueTag::Double.as_str(), "double");
        assert_eq!(ValueTag::Text.as_str(), "string");
        assert_eq!(ValueTag::Handle.as_str(), "handle");
        assert_eq!(ValueTag::Recursion.as_str(), "recursion");
        assert_eq!(ValueTag::Unreadable.as_str(), "unreadable");
    }

    #[test]
    fn leaf_builders_chain() {
        let leaf = Leaf::new(ValueTag::Text, "abc").with_len(3).with_backref(Backref {
            type_name: "T".into(),
            ordinal: 0,
        });
        assert_eq!(leaf.len, Some(3));
        assert_eq!(leaf.backref.as_ref().unwrap().type_name, "T");
    }

    #[test]
    fn rendered_accessors() {
        let leaf = Rendered::Leaf(Leaf::new(ValueTag::Null, "NULL"));
        assert!(leaf.as_leaf().is_some());
        assert!(leaf.as_node().is_none());

        let node = Rendered::Node(Box::new(Node {
            header: Header::Seq { len: 0 },
            rows: Vec::new(),
            expanded: true,
        }));
        assert!(node.as_node().is_some());
        assert!(node.as_leaf().is_none());
    }
}
