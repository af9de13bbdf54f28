//! Markup writer over rendered trees.

use std::fmt::Write;

use fdump_core::node::{Header, Leaf, Node, Rendered, RenderedTree, Row, ValueTag};

use crate::escape::{escape_into, escape_text_into};
use crate::theme::Theme;

/// Writes a [`RenderedTree`] as navigable HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlWriter {
    theme: Theme,
    escape_keys: bool,
}

impl HtmlWriter {
    /// Create a writer with the default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set whether sequence-key text is escaped. Off by default; raw keys
    /// are faster but exotic key text can degrade the surrounding markup.
    #[must_use]
    pub fn with_escape_keys(mut self, escape: bool) -> Self {
        self.escape_keys = escape;
        self
    }

    /// The active theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The one-shot presentation assets (stylesheet + script).
    #[must_use]
    pub fn assets(&self) -> String {
        self.theme.assets()
    }

    /// Render one dump's tree, wrapped in its outer container.
    #[must_use]
    pub fn export(&self, tree: &RenderedTree) -> String {
        let mut out = String::with_capacity(256);
        write!(out, "<div class=\"{}\">", self.theme.class_prefix).unwrap();
        self.write_rendered(&mut out, &tree.root, tree.call);
        out.push_str("</div>");
        out
    }

    fn write_rendered(&self, out: &mut String, rendered: &Rendered, call: u64) {
        match rendered {
            Rendered::Leaf(leaf) => self.write_leaf(out, leaf, call, true),
            Rendered::Node(node) => self.write_node(out, node, call),
        }
    }

    fn write_leaf(&self, out: &mut String, leaf: &Leaf, call: u64, escape: bool) {
        let tag = leaf.tag.as_str();
        write!(
            out,
            "<span class=\"{} {}\" title=\"{tag}\">",
            self.theme.class("value"),
            self.theme.class(tag),
        )
        .unwrap();

        if let Some(len) = leaf.len {
            write!(out, "<span class=\"{}\">({len})</span>", self.theme.class("strlen")).unwrap();
        }

        match &leaf.backref {
            Some(backref) => {
                let anchor = self.theme.anchor(&backref.type_name, call, backref.ordinal);
                write!(
                    out,
                    "<a href=\"#{anchor}\" onclick=\"{}(this);\">",
                    self.theme.js_fn("show"),
                )
                .unwrap();
                escape_into(out, &leaf.text);
                out.push_str("</a>");
            }
            None if leaf.tag == ValueTag::Text => {
                if escape {
                    escape_text_into(out, &leaf.text);
                } else {
                    out.push_str(&leaf.text);
                }
            }
            None => escape_into(out, &leaf.text),
        }

        out.push_str("</span>");
    }

    fn write_node(&self, out: &mut String, node: &Node, call: u64) {
        let container = self.theme.class("container");
        if node.expanded {
            write!(out, "<div class=\"{container}\">").unwrap();
        } else {
            write!(out, "<div class=\"{container} {}\">", self.theme.class("closed")).unwrap();
        }

        self.write_header(out, &node.header, call);

        if !node.rows.is_empty() {
            write!(out, "<table class=\"{}\">", self.theme.class("table")).unwrap();
            for row in &node.rows {
                self.write_row(out, row, call);
            }
            out.push_str("</table>");
        }

        out.push_str("</div>");
    }

    fn write_header(&self, out: &mut String, header: &Header, call: u64) {
        match header {
            Header::Seq { len: 0 } => {
                write!(
                    out,
                    "<div class=\"{} {}\" title=\"sequence\">empty Sequence</div>",
                    self.theme.class("head"),
                    self.theme.class("head-seq"),
                )
                .unwrap();
            }
            Header::Seq { len } => {
                write!(
                    out,
                    "<div class=\"{} {}\" title=\"sequence\">\
                     <a class=\"{}\" href=\"javascript:;\" onclick=\"{}(this);\">\
                     Sequence ({len})</a></div>",
                    self.theme.class("head"),
                    self.theme.class("head-seq"),
                    self.theme.class("toggler"),
                    self.theme.js_fn("toggle"),
                )
                .unwrap();
            }
            Header::Record {
                type_name,
                ordinal,
                ancestors,
            } => {
                let anchor = self.theme.anchor(type_name, call, *ordinal);
                write!(
                    out,
                    "<div class=\"{} {}\" title=\"record\">\
                     <a id=\"{anchor}\" class=\"{}\" href=\"javascript:;\" onclick=\"{}(this);\">",
                    self.theme.class("head"),
                    self.theme.class("head-record"),
                    self.theme.class("toggler"),
                    self.theme.js_fn("toggle"),
                )
                .unwrap();
                escape_into(out, type_name);
                write!(out, " #{ordinal}").unwrap();
                if !ancestors.is_empty() {
                    write!(out, " <span class=\"{}\">", self.theme.class("class-def")).unwrap();
                    for ancestor in ancestors {
                        out.push_str("&gt; ");
                        escape_into(out, ancestor);
                        out.push(' ');
                    }
                    // Trailing space keeps the breadcrumb simple to build.
                    out.push_str("</span>");
                }
                out.push_str("</a></div>");
            }
        }
    }

    fn write_row(&self, out: &mut String, row: &Row, call: u64) {
        match row {
            Row::Entry { key, value } => {
                write!(out, "<tr><td class=\"{}\">", self.theme.class("key-seq")).unwrap();
                self.write_leaf(out, key, call, self.escape_keys);
                out.push_str("</td><td>");
                self.write_rendered(out, value, call);
                out.push_str("</td></tr>");
            }
            Row::Field {
                name,
                modifiers,
                value,
            } => {
                let label = if modifiers.is_empty() {
                    "field".to_owned()
                } else {
                    modifiers.label()
                };
                write!(
                    out,
                    "<tr><td class=\"{}\"><span class=\"{} {}\" title=\"{label}\">",
                    self.theme.class("key-record"),
                    self.theme.class("value"),
                    self.theme.class(&label),
                )
                .unwrap();
                escape_into(out, name);
                out.push_str("</span></td><td>");
                self.write_rendered(out, value, call);
                out.push_str("</td></tr>");
            }
            Row::Inherited { type_name } => {
                write!(
                    out,
                    "<tr><td colspan=\"2\"><span class=\"{} {}\" title=\"inherited\">\
                     <code>inherited from </code>",
                    self.theme.class("value"),
                    self.theme.class("inherited"),
                )
                .unwrap();
                escape_into(out, type_name);
                out.push_str(":</span></td></tr>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdump_core::identity::IdentityRegistry;
    use fdump_core::inspect::{DynRecord, FieldModifiers};
    use fdump_core::session::{DumpConfig, DumpSession};
    use fdump_core::value::{Sequence, Value};

    fn export(value: &Value) -> String {
        export_with(value, HtmlWriter::new(), DumpConfig::default())
    }

    fn export_with(value: &Value, writer: HtmlWriter, config: DumpConfig) -> String {
        let mut registry = IdentityRegistry::new();
        let tree = DumpSession::new(config, &mut registry)
            .start(value)
            .unwrap();
        writer.export(&tree)
    }

    #[test]
    fn wraps_output_in_outer_container() {
        let html = export(&Value::Null);
        assert!(html.starts_with("<div class=\"fdump\">"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn scalar_leaf_markup() {
        let html = export(&Value::from(42));
        assert!(html.contains("class=\"fdump-value fdump-integer\" title=\"integer\""));
        assert!(html.contains(">42<"));
    }

    #[test]
    fn text_gets_strlen_badge_and_escaping() {
        let html = export(&Value::from("a<b"));
        assert!(html.contains("<span class=\"fdump-strlen\">(3)</span>"));
        assert!(html.contains("a&lt;b"));
        assert!(!html.contains("a<b"));
    }

    #[test]
    fn empty_text_renders_placeholder() {
        let html = export(&Value::from(""));
        assert!(html.contains("(0)</span>&nbsp;"));
    }

    #[test]
    fn zero_text_renders_literally() {
        let html = export(&Value::from("0"));
        assert!(html.contains("(1)</span>0"));
    }

    #[test]
    fn empty_sequence_has_no_table_and_no_toggler() {
        let html = export(&Value::Seq(Sequence::new()));
        assert!(html.contains("empty Sequence"));
        assert!(!html.contains("<table"));
        assert!(!html.contains("fdump-toggler"));
    }

    #[test]
    fn sequence_renders_count_toggler_and_rows() {
        let seq = Sequence::new();
        seq.insert(0, Value::from(1));
        seq.insert("a", Value::from("x"));
        let html = export(&Value::Seq(seq));
        assert!(html.contains("Sequence (2)"));
        assert!(html.contains("onclick=\"fdump_toggle(this);\""));
        assert!(html.contains("<table class=\"fdump-table\">"));
        assert!(html.contains("<td class=\"fdump-key-seq\">"));
    }

    #[test]
    fn keys_are_raw_by_default_and_escaped_on_request() {
        let seq = Sequence::new();
        seq.insert("a<b", Value::Null);
        let value = Value::Seq(seq);

        let raw = export(&value);
        assert!(raw.contains("(3)</span>a<b"));

        let escaped = export_with(
            &value,
            HtmlWriter::new().with_escape_keys(true),
            DumpConfig::default(),
        );
        assert!(escaped.contains("(3)</span>a&lt;b"));
    }

    #[test]
    fn record_header_has_anchor_ordinal_and_breadcrumb() {
        let rec = DynRecord::new("app::User").ancestor("app::Person");
        rec.set_field("app::User", "name", FieldModifiers::PUBLIC, "ada".into());
        let html = export(&Value::record(rec.into_ref()));
        assert!(html.contains("id=\"fdump_app__User_0_0\""));
        assert!(html.contains("app::User #0"));
        assert!(html.contains("<span class=\"fdump-class-def\">&gt; app::Person </span>"));
    }

    #[test]
    fn field_rows_carry_modifier_classes() {
        let rec = DynRecord::new("T");
        rec.set_field(
            "T",
            "count",
            FieldModifiers::PRIVATE | FieldModifiers::STATIC,
            Value::from(1),
        );
        let html = export(&Value::record(rec.into_ref()));
        assert!(html.contains("class=\"fdump-value fdump-private-static\" title=\"private-static\""));
        assert!(html.contains(">count<"));
    }

    #[test]
    fn inherited_separator_row() {
        let rec = DynRecord::new("C").ancestor("B");
        rec.set_field("C", "c", FieldModifiers::PUBLIC, Value::Null);
        rec.set_field("B", "b", FieldModifiers::PROTECTED, Value::Null);
        let html = export(&Value::record(rec.into_ref()));
        assert!(html.contains("<code>inherited from </code>B:"));
        assert!(html.contains("colspan=\"2\""));
    }

    #[test]
    fn cross_reference_links_to_anchor() {
        let shared = DynRecord::new("T").into_ref();
        shared.set_field("T", "x", FieldModifiers::PUBLIC, 1.into());
        let seq = Sequence::new();
        seq.insert(0, Value::record(shared.clone()));
        seq.insert(1, Value::record(shared));

        let html = export(&Value::Seq(seq));
        assert!(html.contains("href=\"#fdump_T_0_0\""));
        assert!(html.contains("onclick=\"fdump_show(this);\""));
        assert!(html.contains("fdump-recursion"));
    }

    #[test]
    fn sequence_cycle_marker() {
        let seq = Sequence::new();
        seq.insert("self", Value::Seq(seq.clone()));
        let html = export(&Value::Seq(seq));
        assert!(html.contains(">RECURSION<"));
    }

    #[test]
    fn collapsed_nodes_get_closed_class() {
        let seq = Sequence::new();
        let inner = Sequence::new();
        inner.insert(0, Value::from(1));
        seq.insert(0, Value::Seq(inner));

        let html = export_with(
            &Value::Seq(seq),
            HtmlWriter::new(),
            DumpConfig::default().with_max_expand_depth(1),
        );
        assert!(html.contains("fdump-container fdump-closed"));
    }

    #[test]
    fn custom_theme_prefix_flows_through() {
        let writer = HtmlWriter::new().with_theme(Theme::with_prefix("probe"));
        let html = export_with(&Value::from(1), writer, DumpConfig::default());
        assert!(html.contains("probe-integer"));
        assert!(!html.contains("fdump-"));
    }

    #[test]
    fn record_type_names_are_escaped() {
        let rec = DynRecord::new("Vec<i32>");
        rec.set_field("Vec<i32>", "len", FieldModifiers::PUBLIC, Value::from(0));
        let html = export(&Value::record(rec.into_ref()));
        assert!(html.contains("Vec&lt;i32&gt; #0"));
    }

    #[test]
    fn unreadable_field_label() {
        let rec = DynRecord::new("T");
        rec.set_unreadable_field("T", "secret", FieldModifiers::PRIVATE);
        let html = export(&Value::record(rec.into_ref()));
        assert!(html.contains("fdump-unreadable"));
        assert!(html.contains("(unreadable)"));
    }

    #[test]
    fn assets_come_from_theme() {
        let writer = HtmlWriter::new();
        let assets = writer.assets();
        assert!(assets.contains("<style>"));
        assert!(assets.contains("fdump_toggle"));
    }
}
