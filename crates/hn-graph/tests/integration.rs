//! Integration tests for hn-graph.

use hn_graph::{ForestBuilder, GraphError};
use proptest::prelude::*;

#[test]
fn build_riser_with_two_floors() {
    // riser -> floor1 -> {bath1, kitchen1}
    //       -> floor2 -> bath2
    let mut builder = ForestBuilder::new();
    builder.add_segment("riser", "");
    builder.add_segment("floor1", "riser");
    builder.add_segment("bath1", "floor1");
    builder.add_segment("kitchen1", "floor1");
    builder.add_segment("floor2", "riser");
    builder.add_segment("bath2", "floor2");

    let forest = builder.build().unwrap();

    assert_eq!(forest.len(), 6);
    assert_eq!(forest.roots().len(), 1);

    let riser = forest.id_of("riser").unwrap();
    let floor1 = forest.id_of("floor1").unwrap();
    assert_eq!(forest.children(riser).len(), 2);
    assert_eq!(forest.children(floor1).len(), 2);
    assert_eq!(forest.parent(floor1), Some(riser));
    assert_eq!(forest.parent(riser), None);

    // Pre-order must see parents before children
    let pre: Vec<_> = forest.pre_order().collect();
    for id in &pre {
        if let Some(parent) = forest.parent(*id) {
            let p = pre.iter().position(|x| *x == parent).unwrap();
            let c = pre.iter().position(|x| x == id).unwrap();
            assert!(p < c);
        }
    }
}

#[test]
fn independent_roots() {
    let mut builder = ForestBuilder::new();
    builder.add_segment("cold", "");
    builder.add_segment("hot", "");
    builder.add_segment("hot-branch", "hot");

    let forest = builder.build().unwrap();
    assert_eq!(forest.roots().len(), 2);
    assert_eq!(forest.subtree(forest.id_of("hot").unwrap()).len(), 2);
    assert_eq!(forest.subtree(forest.id_of("cold").unwrap()).len(), 1);
}

#[test]
fn dangling_parent_is_rejected() {
    let mut builder = ForestBuilder::new();
    builder.add_segment("root", "");
    builder.add_segment("orphan", "nowhere");

    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingParent {
            segment: "orphan".into(),
            parent: "nowhere".into(),
        }
    );
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn long_cycle_is_rejected() {
    let mut builder = ForestBuilder::new();
    builder.add_segment("a", "c");
    builder.add_segment("b", "a");
    builder.add_segment("c", "b");
    // A tail hanging off the cycle is unreachable too
    builder.add_segment("tail", "b");

    assert!(matches!(builder.build(), Err(GraphError::Cycle { .. })));
}

proptest! {
    /// Each segment picks an earlier segment (or nothing) as parent, so the
    /// input is always a forest; the builder must accept it and visit every
    /// segment exactly once with children before parents.
    #[test]
    fn random_forests_are_fully_ordered(choices in prop::collection::vec(any::<prop::sample::Index>(), 1..40)) {
        let mut builder = ForestBuilder::new();
        for (i, choice) in choices.iter().enumerate() {
            let parent = if i == 0 {
                String::new()
            } else {
                let pick = choice.index(i + 1);
                if pick == i { String::new() } else { format!("s{pick}") }
            };
            builder.add_segment(format!("s{i}"), parent);
        }

        let forest = builder.build().unwrap();
        prop_assert_eq!(forest.post_order().len(), choices.len());

        let mut seen = vec![false; choices.len()];
        for id in forest.post_order() {
            for child in forest.children(*id) {
                prop_assert!(seen[child.index()]);
            }
            prop_assert!(!seen[id.index()]);
            seen[id.index()] = true;
        }
    }
}
