//! Property-based invariant tests for the traversal core.
//!
//! These verify structural invariants that must hold for any value graph:
//!
//! 1. Rendering an acyclic graph terminates without error.
//! 2. A sequence node has exactly one row per entry, in order.
//! 3. Contents-equal but distinct sequences never produce a cycle marker.
//! 4. Rendering is deterministic: two sessions over the same graph agree.
//! 5. Classification agrees with rendering: composites render as nodes,
//!    everything else as leaves.
//! 6. Closing a cycle over any acyclic graph still terminates, with exactly
//!    one marker for the back-reference.
//! 7. The default-expand threshold splits a nesting chain at the threshold.

use fdump_core::identity::IdentityRegistry;
use fdump_core::kind::Kind;
use fdump_core::node::{Rendered, Row, ValueTag};
use fdump_core::session::{DumpConfig, DumpSession};
use fdump_core::value::{Sequence, Value};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,12}".prop_map(Value::from),
    ]
}

/// Acyclic value trees: scalars at the leaves, sequences above them.
fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 24, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(|children| {
            let seq = Sequence::new();
            for child in children {
                seq.push(child);
            }
            Value::Seq(seq)
        })
    })
}

fn render(value: &Value) -> Rendered {
    let mut registry = IdentityRegistry::new();
    DumpSession::new(DumpConfig::default(), &mut registry)
        .start(value)
        .expect("acyclic scalar/sequence graphs cannot fail")
        .root
}

fn count_markers(rendered: &Rendered) -> usize {
    match rendered {
        Rendered::Leaf(leaf) => usize::from(leaf.tag == ValueTag::Recursion),
        Rendered::Node(node) => node
            .rows
            .iter()
            .map(|row| match row {
                Row::Entry { value, .. } | Row::Field { value, .. } => count_markers(value),
                Row::Inherited { .. } => 0,
            })
            .sum(),
    }
}

fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Seq(seq) => {
            let copy = Sequence::new();
            for (key, child) in seq.entries() {
                copy.insert(key, deep_clone(&child));
            }
            Value::Seq(copy)
        }
        other => other.clone(),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn acyclic_graphs_render_without_markers(value in value_strategy()) {
        let rendered = render(&value);
        prop_assert_eq!(count_markers(&rendered), 0);
    }

    #[test]
    fn sequence_rows_match_entries(value in value_strategy()) {
        if let Value::Seq(seq) = &value {
            let rendered = render(&value);
            let node = rendered.as_node().expect("sequence renders as node");
            prop_assert_eq!(node.rows.len(), seq.len());
        }
    }

    #[test]
    fn equal_contents_never_flag_a_cycle(value in value_strategy()) {
        // Two structurally identical but distinct graphs side by side.
        let outer = Sequence::new();
        outer.insert("a", deep_clone(&value));
        outer.insert("b", deep_clone(&value));
        let rendered = render(&Value::Seq(outer));
        prop_assert_eq!(count_markers(&rendered), 0);
    }

    #[test]
    fn rendering_is_deterministic(value in value_strategy()) {
        prop_assert_eq!(render(&value), render(&value));
    }

    #[test]
    fn classification_agrees_with_rendering(value in value_strategy()) {
        let rendered = render(&value);
        prop_assert_eq!(Kind::of(&value).is_composite(), rendered.as_node().is_some());
    }

    #[test]
    fn closing_a_cycle_yields_exactly_one_marker(value in value_strategy()) {
        let root = Sequence::new();
        root.insert("payload", value);
        root.insert("back", Value::Seq(root.clone()));
        let rendered = render(&Value::Seq(root));
        prop_assert_eq!(count_markers(&rendered), 1);
    }

    #[test]
    fn expand_threshold_splits_chain(threshold in 0usize..10, extra in 1usize..6) {
        let depth = threshold + extra;
        let mut value = Value::from(0);
        for _ in 0..depth {
            let seq = Sequence::new();
            seq.insert(0, value);
            value = Value::Seq(seq);
        }

        let mut registry = IdentityRegistry::new();
        let tree = DumpSession::new(
            DumpConfig::default().with_max_expand_depth(threshold),
            &mut registry,
        )
        .start(&value)
        .unwrap();

        let mut current = tree.root;
        let mut level = 1usize;
        while let Some(node) = current.as_node().cloned() {
            prop_assert_eq!(node.expanded, level <= threshold);
            match node.rows.into_iter().next() {
                Some(Row::Entry { value, .. }) => current = value,
                _ => break,
            }
            level += 1;
        }
    }
}
