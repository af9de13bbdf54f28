//! Error types for the traversal core.
//!
//! The dump itself is best-effort: malformed or unreadable values degrade to
//! generic labels. The one condition that propagates is a failing
//! field-enumeration adapter, since swallowing it would hide a bug in the
//! host's introspection layer.

use std::fmt;

/// A structured record's field-enumeration adapter failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectError {
    /// Runtime type name of the record whose adapter failed.
    pub type_name: String,
    /// Adapter-supplied failure description.
    pub message: String,
}

impl InspectError {
    /// Create an enumeration failure for the given record type.
    #[must_use]
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field enumeration failed for `{}`: {}",
            self.type_name, self.message
        )
    }
}

impl std::error::Error for InspectError {}
