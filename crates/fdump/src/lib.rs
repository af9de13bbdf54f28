#![forbid(unsafe_code)]

//! FrankenDump public facade crate.
//!
//! Dumps an in-memory [`Value`] — scalars, sequences, structured records
//! with inherited fields — as a navigable HTML tree: per-type styling,
//! collapsible nodes, cycle markers, and stable per-type instance ordinals.
//!
//! Process-wide state is limited to what cross-call consistency requires:
//! the identity registry (so an instance dumped twice keeps its ordinal),
//! the dump-call counter (so anchors stay unique within one document), the
//! configuration, and a one-shot flag ensuring the stylesheet and toggle
//! script are emitted exactly once. All of it is lock- or atomic-guarded;
//! concurrent dumps serialize rather than corrupt each other.
//!
//! # Example
//!
//! ```
//! use fdump::prelude::*;
//!
//! let seq = Sequence::new();
//! seq.insert("answer", Value::from(42));
//! let html = fdump::dump_html(&Value::Seq(seq)).unwrap();
//! assert!(html.contains("Sequence (1)"));
//! ```

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

// --- Core re-exports -------------------------------------------------------

pub use fdump_core::error::InspectError;
pub use fdump_core::identity::IdentityRegistry;
pub use fdump_core::inspect::{DynRecord, Field, FieldGroup, FieldModifiers, Inspect};
pub use fdump_core::kind::Kind;
pub use fdump_core::node::{Backref, Header, Leaf, Node, Rendered, RenderedTree, Row, ValueTag};
pub use fdump_core::session::{DumpConfig, DumpSession};
pub use fdump_core::value::{Handle, Key, ObjectId, RecordRef, SeqRef, Sequence, Value};

// --- HTML re-exports -------------------------------------------------------

pub use fdump_html::{HtmlWriter, Theme};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dump calls.
#[derive(Debug)]
pub enum DumpError {
    /// A record's field-enumeration adapter failed.
    Inspect(InspectError),
    /// I/O failure writing to the output sink.
    Io(io::Error),
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inspect(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Inspect(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<InspectError> for DumpError {
    fn from(err: InspectError) -> Self {
        Self::Inspect(err)
    }
}

impl From<io::Error> for DumpError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for fdump APIs.
pub type Result<T> = std::result::Result<T, DumpError>;

// --- Process-wide state ----------------------------------------------------

static CONFIG: OnceLock<Mutex<DumpConfig>> = OnceLock::new();
static REGISTRY: OnceLock<Mutex<IdentityRegistry>> = OnceLock::new();
static ASSETS_EMITTED: AtomicBool = AtomicBool::new(false);
static CALLS: AtomicU64 = AtomicU64::new(0);

fn config_cell() -> &'static Mutex<DumpConfig> {
    CONFIG.get_or_init(|| Mutex::new(DumpConfig::default()))
}

fn registry_cell() -> &'static Mutex<IdentityRegistry> {
    REGISTRY.get_or_init(|| Mutex::new(IdentityRegistry::new()))
}

/// Snapshot of the process-wide configuration.
#[must_use]
pub fn config() -> DumpConfig {
    // A poisoned lock still holds valid data.
    config_cell()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Replace the process-wide configuration. Takes effect for subsequent
/// dump calls.
pub fn set_config(config: DumpConfig) {
    *config_cell().lock().unwrap_or_else(|e| e.into_inner()) = config;
}

// --- Entry points ----------------------------------------------------------

/// Dump a value to standard output.
pub fn dump(value: &Value) -> Result<()> {
    let stdout = io::stdout();
    dump_to(value, &mut stdout.lock())
}

/// Dump a value to an arbitrary sink.
pub fn dump_to<W: Write>(value: &Value, sink: &mut W) -> Result<()> {
    let html = dump_html(value)?;
    sink.write_all(html.as_bytes())?;
    Ok(())
}

/// Dump a value to an HTML string.
///
/// The first dump in the process prepends the presentation assets
/// (stylesheet + toggle script); later dumps emit only their tree.
pub fn dump_html(value: &Value) -> Result<String> {
    let config = config();
    let call = CALLS.fetch_add(1, Ordering::Relaxed);

    let tree = {
        let mut registry = registry_cell().lock().unwrap_or_else(|e| e.into_inner());
        DumpSession::new(config.clone(), &mut registry)
            .with_call(call)
            .start(value)?
    };

    let writer = HtmlWriter::new().with_escape_keys(config.escape_keys);
    let mut out = String::new();
    if !ASSETS_EMITTED.swap(true, Ordering::SeqCst) {
        out.push_str(&writer.assets());
    }
    out.push_str(&writer.export(&tree));
    Ok(out)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    //! Everything a host typically needs to build and dump values.

    pub use crate::{
        DumpConfig, DumpError, DynRecord, Field, FieldGroup, FieldModifiers, Handle, Inspect,
        InspectError, Key, Result, Sequence, Value, dump, dump_html, dump_to,
    };
}
