//! Cycle detection, one strategy per composite kind.
//!
//! Sequences use a branch-scoped ancestor stack: a sequence is on the stack
//! only while its children render, so unrelated siblings sharing an ancestor
//! are never falsely flagged. Records use a per-call visited set that is
//! never pruned: re-encountering the same instance on any branch is itself
//! meaningful (a shared reference) and renders as a cross-reference.
//!
//! Both strategies compare reference identity ([`ObjectId`]), never
//! contents, and never touch the value being inspected.

use std::collections::HashSet;

use crate::value::ObjectId;

/// Branch-scoped stack of the sequences currently being entered.
#[derive(Debug, Default)]
pub struct AncestorStack {
    stack: Vec<ObjectId>,
}

impl AncestorStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given identity is currently an ancestor.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.stack.contains(&id)
    }

    /// Enter a sequence: call immediately before rendering its children.
    pub fn push(&mut self, id: ObjectId) {
        self.stack.push(id);
    }

    /// Leave a sequence: call immediately after its children rendered.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Current nesting depth of sequences on this branch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no sequence is currently being entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop all ancestry; used when a session starts a new top-level call.
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

/// Per-call set of record instances already rendered in full.
#[derive(Debug, Default)]
pub struct VisitedRecords {
    seen: HashSet<ObjectId>,
}

impl VisitedRecords {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an instance as visited. Returns `false` if it was already seen —
    /// the caller should render a cross-reference instead of recursing.
    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.seen.insert(id)
    }

    /// Whether the instance was already rendered this call.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.seen.contains(&id)
    }

    /// Forget all instances; used when a session starts a new top-level call.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
