#![forbid(unsafe_code)]

//! Core traversal engine for FrankenDump.
//!
//! This crate turns an in-memory [`Value`] graph — scalars, ordered
//! sequences, and structured records with inherited fields — into a
//! [`RenderedTree`](node::RenderedTree): a markup-agnostic tree of headers,
//! rows, and tagged terminal labels that a sink layer (e.g. `fdump-html`)
//! can turn into navigable output.
//!
//! The engine guarantees termination on cyclic graphs (self-referential and
//! mutually-referential values render as cycle markers), assigns stable
//! per-type ordinals to record instances, and never mutates the value being
//! inspected.
//!
//! # Example
//!
//! ```
//! use fdump_core::identity::IdentityRegistry;
//! use fdump_core::session::{DumpConfig, DumpSession};
//! use fdump_core::value::{Sequence, Value};
//!
//! let seq = Sequence::new();
//! seq.push(Value::from(1));
//! seq.push(Value::from("two"));
//!
//! let mut registry = IdentityRegistry::new();
//! let mut session = DumpSession::new(DumpConfig::default(), &mut registry);
//! let tree = session.start(&Value::Seq(seq)).unwrap();
//! assert_eq!(tree.call, 0);
//! ```

pub mod cycle;
pub mod error;
pub mod identity;
pub mod inspect;
pub mod kind;
pub mod node;
pub mod session;
pub mod value;

pub use error::InspectError;
pub use identity::IdentityRegistry;
pub use inspect::{DynRecord, Field, FieldGroup, FieldModifiers, Inspect};
pub use kind::Kind;
pub use node::{Backref, Header, Leaf, Node, Rendered, RenderedTree, Row, ValueTag};
pub use session::{DumpConfig, DumpSession};
pub use value::{Handle, Key, ObjectId, RecordRef, SeqRef, Sequence, Value};
