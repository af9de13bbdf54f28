//! Visual theme: class taxonomy, stylesheet, and toggle script.
//!
//! The class prefix is configurable so several tools can coexist on one
//! page; everything else derives from it. Assets are plain string templates
//! with the prefix substituted in.

/// Theme configuration for the HTML writer.
#[derive(Debug, Clone)]
pub struct Theme {
    /// CSS class prefix for generated elements.
    pub class_prefix: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            class_prefix: "fdump".into(),
        }
    }
}

impl Theme {
    /// Create a theme with a custom class prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            class_prefix: prefix.into(),
        }
    }

    /// Class name for a suffix, e.g. `class("value")` → `fdump-value`.
    #[must_use]
    pub fn class(&self, suffix: &str) -> String {
        format!("{}-{}", self.class_prefix, suffix)
    }

    /// JavaScript identifier for a script function, e.g. `fdump_toggle`.
    /// The prefix is sanitized since `-` is not valid in JS identifiers.
    #[must_use]
    pub fn js_fn(&self, stem: &str) -> String {
        format!("{}_{}", sanitize(&self.class_prefix), stem)
    }

    /// Anchor id for a record header: `{prefix}_{type}_{call}_{ordinal}`.
    #[must_use]
    pub fn anchor(&self, type_name: &str, call: u64, ordinal: usize) -> String {
        format!(
            "{}_{}_{call}_{ordinal}",
            sanitize(&self.class_prefix),
            sanitize(type_name)
        )
    }

    /// The one-shot stylesheet.
    #[must_use]
    pub fn stylesheet(&self) -> String {
        STYLESHEET.replace("{p}", &self.class_prefix)
    }

    /// The one-shot toggle/reveal script.
    #[must_use]
    pub fn script(&self) -> String {
        SCRIPT
            .replace("{p}", &self.class_prefix)
            .replace("{f}", &sanitize(&self.class_prefix))
    }

    /// Stylesheet plus script, wrapped in their tags.
    #[must_use]
    pub fn assets(&self) -> String {
        format!(
            "<style>{}</style>\n<script type=\"text/javascript\">{}</script>\n",
            self.stylesheet(),
            self.script()
        )
    }
}

/// Replace everything outside `[A-Za-z0-9]` with `_` for ids/identifiers.
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

const STYLESHEET: &str = "\
.{p} { margin: 0 0 3px; font: 12px/15px monospace; }
.{p}-container { display: inline-block; position: relative; }
.{p}-value { display: inline-block; padding: 0 3px; background: #ededed; border: 1px solid #888; cursor: default; max-height: 45px; overflow: auto; }
.{p}-table { border-collapse: collapse; border-spacing: 0; border-left: 1px solid #888; width: 100%; }
.{p}-table td { padding: 0; border-right: 1px solid #888; border-bottom: 1px solid #888; vertical-align: top; }
.{p}-table .{p}-value { display: block; border-width: 0; }
.{p}-head { color: #fff; padding: 1px 3px 2px; border: 1px solid #888; font-weight: bold; }
.{p}-head-seq { background: #262; }
.{p}-head-record { background: #006; }
.{p}-key-seq, .{p}-key-seq .{p}-value { background: #dcffd0; }
.{p}-key-seq .{p}-string { color: #030; }
.{p}-key-record { color: #004; }
.{p}-key-record .{p}-value { background: #c8defe; }
.{p}-class-def { color: #bbb; font-style: oblique; font-size: 11px; }
.{p}-string { color: #a40; }
.{p}-strlen { display: inline-block; color: #000; font-size: 8px; margin-right: 3px; vertical-align: bottom; }
.{p}-integer { color: #00f; }
.{p}-double { color: #f00; }
.{p}-handle { color: #660; }
.{p}-null, .{p}-boolean { color: #000; }
.{p}-unreadable { color: #666; font-style: italic; }
.{p}-inherited { color: #009; background: #c8defe; font-weight: bold; }
.{p}-inherited code { font: inherit; color: #66c; }
.{p}-recursion { color: #609; font-weight: bold; }
.{p}-recursion a { color: #609; text-decoration: underline; }
.{p}-toggler { color: #fff; display: block; text-decoration: none; cursor: pointer; }
.{p}-toggler::before { content: '\\25BE '; }
.{p}-closed .{p}-toggler::before { content: '\\25B8 '; }
.{p}-closed .{p}-table, .{p}-closed .{p}-class-def { display: none; }
";

const SCRIPT: &str = "\
function {f}_toggle(el) {
    var c = el.parentNode.parentNode;
    c.className = c.className === '{p}-container'
        ? '{p}-container {p}-closed'
        : '{p}-container';
}
function {f}_show(el) {
    var target = document.getElementById(el.href.match(/[^#]+$/));
    while (target && (target = target.parentNode)) {
        if (target.className === '{p}-container {p}-closed') {
            target.className = '{p}-container';
        }
    }
}
";
