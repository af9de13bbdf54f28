//! Per-type ordinal assignment for record instances.
//!
//! Every record instance encountered in a dump gets a small ordinal, scoped
//! to its runtime type name, so repeated appearances can be labeled
//! "Type #N" and cross-referenced. The registry is designed to outlive
//! individual dump calls (the facade promotes one to process scope), so the
//! same instance keeps its ordinal across calls.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::inspect::Inspect;
use crate::value::{ObjectId, RecordRef};

/// Ordinal registry keyed by runtime type name.
///
/// Slots hold `Weak` handles: a slot matches an incoming record only while
/// its original allocation is alive, so a heap address reused after a drop
/// can never collide with a dead entry. Dead slots are kept — ordinals are
/// monotonically assigned and never reused.
#[derive(Default)]
pub struct IdentityRegistry {
    by_type: HashMap<String, Vec<Weak<dyn Inspect>>>,
}

impl IdentityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordinal for a record instance, assigning the next one on first sight.
    ///
    /// Identity is reference identity: two distinct instances with equal
    /// contents get distinct ordinals. Linear scan per type; instance counts
    /// in a diagnostic dump are human-scale.
    pub fn ordinal_for(&mut self, record: &RecordRef) -> usize {
        let slots = self
            .by_type
            .entry(record.type_name().to_owned())
            .or_default();
        let id = ObjectId::of_record(record);

        for (ordinal, slot) in slots.iter().enumerate() {
            if let Some(live) = slot.upgrade() {
                if ObjectId::of_record(&live) == id {
                    return ordinal;
                }
            }
        }

        slots.push(Rc::downgrade(record));
        slots.len() - 1
    }

    /// Number of ordinals assigned so far for a type (including dead slots).
    #[must_use]
    pub fn assigned(&self, type_name: &str) -> usize {
        self.by_type.get(type_name).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for IdentityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRegistry")
            .field("types", &self.by_type.len())
            .finish()
    }
}
