#![forbid(unsafe_code)]

//! HTML sink for FrankenDump rendered trees.
//!
//! Walks a [`RenderedTree`](fdump_core::node::RenderedTree) and emits
//! navigable markup: per-type styled labels, collapsible containers with
//! togglers, inheritance breadcrumbs, and cross-reference links that reveal
//! their target. The one-shot stylesheet and toggle script ship as
//! [`Theme::assets`]; the facade decides when to emit them.
//!
//! # Example
//!
//! ```
//! use fdump_core::identity::IdentityRegistry;
//! use fdump_core::session::{DumpConfig, DumpSession};
//! use fdump_core::value::Value;
//! use fdump_html::HtmlWriter;
//!
//! let mut registry = IdentityRegistry::new();
//! let tree = DumpSession::new(DumpConfig::default(), &mut registry)
//!     .start(&Value::from(42))
//!     .unwrap();
//! let html = HtmlWriter::new().export(&tree);
//! assert!(html.contains("fdump-integer"));
//! ```

pub mod escape;
pub mod theme;
pub mod writer;

pub use theme::Theme;
pub use writer::HtmlWriter;
