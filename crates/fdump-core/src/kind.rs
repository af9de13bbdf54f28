//! Value classification.
//!
//! [`Kind::of`] is the type dispatcher: a pure, total function from a value's
//! runtime representation to the six renderable kinds. Anything that cannot
//! be rendered as its kind (an unreadable field, a representation an adapter
//! failed to produce) degrades downstream to a generic terminal label rather
//! than failing classification.

use crate::value::Value;

/// The six renderable kinds of value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The absence of a value.
    Null,
    /// Boolean.
    Bool,
    /// Numeric or text scalar.
    Scalar,
    /// Opaque platform handle.
    Handle,
    /// Ordered or keyed container.
    Seq,
    /// Structured record.
    Record,
}

impl Kind {
    /// Classify a value. Pure; no side effects.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Int(_) | Value::Float(_) | Value::Str(_) => Self::Scalar,
            Value::Handle(_) => Self::Handle,
            Value::Seq(_) => Self::Seq,
            Value::Record(_) => Self::Record,
        }
    }

    /// Whether this kind has children to recurse into.
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Seq | Self::Record)
    }
}
