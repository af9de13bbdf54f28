//! The dump session: per-call traversal state and the tree renderer.
//!
//! One [`DumpSession`] serves one top-level dump call. [`DumpSession::start`]
//! resets the per-call state (depth counter, sequence ancestor stack,
//! visited-record set) and walks the value graph, consulting the cycle
//! trackers before recursing and the identity registry when a record header
//! is rendered. The registry is borrowed in, not owned, so its numbering
//! survives across calls.

use unicode_segmentation::UnicodeSegmentation;

use crate::cycle::{AncestorStack, VisitedRecords};
use crate::error::InspectError;
use crate::identity::IdentityRegistry;
use crate::node::{Backref, Header, Leaf, Node, Rendered, RenderedTree, Row, ValueTag};
use crate::value::{Key, ObjectId, RecordRef, SeqRef, Value};

/// Dump configuration.
///
/// Mutable process-wide in the facade; a session takes a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// Declared text encoding of the output sink. Values are native UTF-8
    /// strings, so this does not change the escaping path; it documents the
    /// sink's expectation.
    pub text_encoding: String,
    /// Escape sequence-key text at the sink. Off by default; trades correct
    /// display of exotic keys for speed.
    pub escape_keys: bool,
    /// Composites entered deeper than this render collapsed by default.
    pub max_expand_depth: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            text_encoding: "UTF-8".into(),
            escape_keys: false,
            max_expand_depth: 8,
        }
    }
}

impl DumpConfig {
    /// Set the declared sink encoding.
    #[must_use]
    pub fn with_text_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.text_encoding = encoding.into();
        self
    }

    /// Set whether sequence keys are escaped at the sink.
    #[must_use]
    pub fn with_escape_keys(mut self, escape: bool) -> Self {
        self.escape_keys = escape;
        self
    }

    /// Set the default-expand depth threshold.
    #[must_use]
    pub fn with_max_expand_depth(mut self, depth: usize) -> Self {
        self.max_expand_depth = depth;
        self
    }
}

/// Traversal state for one top-level dump call.
pub struct DumpSession<'r> {
    config: DumpConfig,
    registry: &'r mut IdentityRegistry,
    call: u64,
    depth: usize,
    ancestors: AncestorStack,
    visited: VisitedRecords,
}

impl<'r> DumpSession<'r> {
    /// Create a session over a (possibly shared, longer-lived) registry.
    pub fn new(config: DumpConfig, registry: &'r mut IdentityRegistry) -> Self {
        Self {
            config,
            registry,
            call: 0,
            depth: 0,
            ancestors: AncestorStack::new(),
            visited: VisitedRecords::new(),
        }
    }

    /// Tag the session with a process-wide call sequence number.
    #[must_use]
    pub fn with_call(mut self, call: u64) -> Self {
        self.call = call;
        self
    }

    /// Render one top-level value.
    ///
    /// Resets the depth counter, ancestor stack, and visited-record set; the
    /// identity registry is deliberately left alone so that instance
    /// numbering stays consistent across calls.
    pub fn start(&mut self, value: &Value) -> Result<RenderedTree, InspectError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("dump", call = self.call).entered();

        self.depth = 0;
        self.ancestors.clear();
        self.visited.clear();

        let root = self.render_value(value)?;
        Ok(RenderedTree {
            call: self.call,
            root,
        })
    }

    fn render_value(&mut self, value: &Value) -> Result<Rendered, InspectError> {
        match value {
            Value::Seq(seq) => self.render_sequence(seq),
            Value::Record(record) => self.render_record(record),
            terminal => Ok(Rendered::Leaf(terminal_leaf(terminal))),
        }
    }

    fn render_sequence(&mut self, seq: &SeqRef) -> Result<Rendered, InspectError> {
        let id = ObjectId::of_seq(seq);
        if self.ancestors.contains(id) {
            #[cfg(feature = "tracing")]
            tracing::trace!(kind = "sequence", "cycle detected");
            return Ok(Rendered::Leaf(Leaf::new(ValueTag::Recursion, "RECURSION")));
        }

        let entries = seq.entries();

        self.depth += 1;
        let expanded = self.depth <= self.config.max_expand_depth;
        self.ancestors.push(id);
        let rows = self.sequence_rows(&entries);
        self.ancestors.pop();
        self.depth -= 1;

        Ok(Rendered::Node(Box::new(Node {
            header: Header::Seq { len: entries.len() },
            rows: rows?,
            expanded,
        })))
    }

    fn sequence_rows(&mut self, entries: &[(Key, Value)]) -> Result<Vec<Row>, InspectError> {
        let mut rows = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            rows.push(Row::Entry {
                key: key_leaf(key),
                value: self.render_value(value)?,
            });
        }
        Ok(rows)
    }

    fn render_record(&mut self, record: &RecordRef) -> Result<Rendered, InspectError> {
        let type_name = record.type_name().to_owned();
        // Ordinal before the cycle test, so a cross-reference marker carries
        // the same number as the expanded occurrence.
        let ordinal = self.registry.ordinal_for(record);

        if !self.visited.insert(ObjectId::of_record(record)) {
            #[cfg(feature = "tracing")]
            tracing::trace!(kind = "record", type_name = %type_name, ordinal, "repeated reference");
            let text = format!("{type_name} #{ordinal}");
            return Ok(Rendered::Leaf(
                Leaf::new(ValueTag::Recursion, text).with_backref(Backref { type_name, ordinal }),
            ));
        }

        self.depth += 1;
        let expanded = self.depth <= self.config.max_expand_depth;
        let rows = self.record_rows(record, &type_name);
        self.depth -= 1;

        Ok(Rendered::Node(Box::new(Node {
            header: Header::Record {
                type_name,
                ordinal,
                ancestors: record.ancestors(),
            },
            rows: rows?,
            expanded,
        })))
    }

    fn record_rows(
        &mut self,
        record: &RecordRef,
        type_name: &str,
    ) -> Result<Vec<Row>, InspectError> {
        let mut rows = Vec::new();
        for group in record.fields()? {
            if group.fields.is_empty() {
                continue;
            }
            if group.declared_in != type_name {
                rows.push(Row::Inherited {
                    type_name: group.declared_in.clone(),
                });
            }
            for field in group.fields {
                let value = match &field.value {
                    Some(value) => self.render_value(value)?,
                    None => Rendered::Leaf(Leaf::new(ValueTag::Unreadable, "(unreadable)")),
                };
                rows.push(Row::Field {
                    name: field.name,
                    modifiers: field.modifiers,
                    value,
                });
            }
        }
        Ok(rows)
    }
}

/// Terminal label for a non-composite value.
///
/// The numeral zero and the text `"0"` render literally; only the EMPTY text
/// scalar is left for the sink to blank out.
fn terminal_leaf(value: &Value) -> Leaf {
    match value {
        Value::Null => Leaf::new(ValueTag::Null, "NULL"),
        Value::Bool(true) => Leaf::new(ValueTag::Boolean, "true"),
        Value::Bool(false) => Leaf::new(ValueTag::Boolean, "false"),
        Value::Int(n) => Leaf::new(ValueTag::Integer, n.to_string()),
        Value::Float(x) => Leaf::new(ValueTag::Double, x.to_string()),
        Value::Str(s) => text_leaf(s),
        Value::Handle(h) => Leaf::new(ValueTag::Handle, format!("{} {}", h.category, h.repr)),
        // Composites are dispatched before this point; anything that still
        // lands here degrades to a generic label rather than failing.
        Value::Seq(_) | Value::Record(_) => Leaf::new(ValueTag::Unreadable, "(unrenderable)"),
    }
}

fn text_leaf(s: &str) -> Leaf {
    Leaf::new(ValueTag::Text, s).with_len(s.graphemes(true).count())
}

fn key_leaf(key: &Key) -> Leaf {
    match key {
        Key::Int(n) => Leaf::new(ValueTag::Integer, n.to_string()),
        Key::Str(s) => text_leaf(s),
    }
}
