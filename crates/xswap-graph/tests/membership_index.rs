use std::collections::BTreeSet;

use proptest::prelude::*;
use xswap_core::errors::XswapError;
use xswap_core::{edges_from_pairs, Edge, NodeBounds};
use xswap_graph::{BackendChoice, BackendKind, IndexConfig, MembershipIndex};

fn forced(backend: BackendChoice) -> IndexConfig {
    IndexConfig {
        backend,
        ..IndexConfig::default()
    }
}

fn all_backends() -> [BackendChoice; 3] {
    [
        BackendChoice::Dense,
        BackendChoice::Compressed,
        BackendChoice::Hashed,
    ]
}

#[test]
fn add_outside_bounds_is_out_of_range() {
    for backend in all_backends() {
        let mut index = MembershipIndex::new(NodeBounds::new(3, 3), &forced(backend)).unwrap();
        match index.add(Edge::new(4, 4)) {
            Err(XswapError::OutOfRange(info)) => {
                assert_eq!(info.code, "out-of-range");
                assert_eq!(info.context.get("edge"), Some(&"(4, 4)".to_string()));
                assert_eq!(info.context.get("bound"), Some(&"24".to_string()));
            }
            other => panic!("unexpected result for {backend:?}: {other:?}"),
        }
        assert!(matches!(
            index.contains(Edge::new(0, 4)),
            Err(XswapError::OutOfRange(_))
        ));
        assert!(matches!(
            index.remove(Edge::new(4, 0)),
            Err(XswapError::OutOfRange(_))
        ));
    }
}

#[test]
fn second_add_is_duplicate() {
    for backend in all_backends() {
        let mut index = MembershipIndex::new(NodeBounds::new(3, 3), &forced(backend)).unwrap();
        index.add(Edge::new(2, 2)).unwrap();
        match index.add(Edge::new(2, 2)) {
            Err(XswapError::Duplicate(info)) => assert_eq!(info.code, "duplicate-edge"),
            other => panic!("unexpected result for {backend:?}: {other:?}"),
        }
        assert_eq!(index.len(), 1);
    }
}

#[test]
fn removing_absent_edge_is_not_found() {
    for backend in all_backends() {
        let mut index = MembershipIndex::new(NodeBounds::new(3, 3), &forced(backend)).unwrap();
        match index.remove(Edge::new(2, 2)) {
            Err(XswapError::NotFound(info)) => assert_eq!(info.code, "missing-edge"),
            other => panic!("unexpected result for {backend:?}: {other:?}"),
        }
        assert!(index.is_empty());
    }
}

#[test]
fn add_then_remove_toggles_membership() {
    for backend in all_backends() {
        let mut index = MembershipIndex::new(NodeBounds::new(7, 7), &forced(backend)).unwrap();
        assert_eq!(index.kind(), match backend {
            BackendChoice::Dense => BackendKind::Dense,
            BackendChoice::Compressed => BackendKind::Compressed,
            _ => BackendKind::Hashed,
        });
        for s in 4..8 {
            for t in 4..8 {
                index.add(Edge::new(s, t)).unwrap();
            }
        }
        for s in 0..4 {
            for t in 0..4 {
                let edge = Edge::new(s, t);
                assert!(!index.contains(edge).unwrap());
                index.add(edge).unwrap();
                assert!(index.contains(edge).unwrap());
                index.remove(edge).unwrap();
                assert!(!index.contains(edge).unwrap());
            }
        }
        assert_eq!(index.len(), 16);
        assert!(index.contains(Edge::new(5, 6)).unwrap());
    }
}

#[test]
fn from_edges_rejects_parallel_edges() {
    let edges = edges_from_pairs(&[(0, 1), (1, 2), (0, 1)]);
    let err = MembershipIndex::from_edges(&edges, NodeBounds::shared(2), &IndexConfig::default())
        .unwrap_err();
    match err {
        XswapError::Duplicate(info) => {
            assert_eq!(info.context.get("position"), Some(&"2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn from_edges_populates_every_edge() {
    let edges = edges_from_pairs(&[(0, 1), (1, 0), (2, 2)]);
    let index =
        MembershipIndex::from_edges(&edges, NodeBounds::shared(2), &IndexConfig::default())
            .unwrap();
    assert_eq!(index.kind(), BackendKind::Dense);
    assert_eq!(index.len(), 3);
    for edge in &edges {
        assert!(index.contains(*edge).unwrap());
    }
    assert!(!index.contains(Edge::new(1, 2)).unwrap());
}

#[test]
fn auto_selection_follows_budget() {
    let tight = IndexConfig {
        memory_budget: 1,
        backend: BackendChoice::Auto,
    };
    let index = MembershipIndex::new(NodeBounds::shared(100), &tight).unwrap();
    assert_eq!(index.kind(), BackendKind::Compressed);

    let huge = MembershipIndex::new(NodeBounds::shared(u32::MAX), &tight).unwrap();
    assert_eq!(huge.kind(), BackendKind::Hashed);

    let roomy = MembershipIndex::new(NodeBounds::shared(100), &IndexConfig::default()).unwrap();
    assert_eq!(roomy.kind(), BackendKind::Dense);
}

#[test]
fn budget_exceeded_when_no_backend_fits() {
    let tight = IndexConfig {
        memory_budget: 8,
        backend: BackendChoice::Dense,
    };
    match MembershipIndex::new(NodeBounds::shared(1_000), &tight) {
        Err(XswapError::BudgetExceeded(info)) => assert_eq!(info.code, "dense-budget"),
        other => panic!("unexpected result: {other:?}"),
    }

    let sparse = IndexConfig {
        memory_budget: 8,
        backend: BackendChoice::Auto,
    };
    let edges = edges_from_pairs(&[(0, 1), (1, 2), (2, 3)]);
    match MembershipIndex::from_edges(&edges, NodeBounds::shared(1_000), &sparse) {
        Err(XswapError::BudgetExceeded(info)) => assert_eq!(info.code, "compressed-budget"),
        other => panic!("unexpected result: {other:?}"),
    }

    let compressed = forced(BackendChoice::Compressed);
    match MembershipIndex::new(NodeBounds::shared(u32::MAX), &compressed) {
        Err(XswapError::BudgetExceeded(info)) => assert_eq!(info.code, "compressed-domain"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn hashed_backend_handles_extreme_identifiers() {
    let mut index = MembershipIndex::new(
        NodeBounds::shared(u32::MAX),
        &IndexConfig {
            memory_budget: 1 << 20,
            backend: BackendChoice::Auto,
        },
    )
    .unwrap();
    let top = Edge::new(u32::MAX, u32::MAX);
    index.add(top).unwrap();
    index.add(Edge::new(0, u32::MAX)).unwrap();
    assert!(index.contains(top).unwrap());
    index.remove(top).unwrap();
    assert!(!index.contains(top).unwrap());
    assert_eq!(index.len(), 1);
}

#[derive(Debug, Clone)]
enum Op {
    Add(u32, u32),
    Remove(u32, u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..12, 0u32..12).prop_map(|(s, t)| Op::Add(s, t)),
        (0u32..12, 0u32..12).prop_map(|(s, t)| Op::Remove(s, t)),
    ]
}

proptest! {
    #[test]
    fn backends_agree_with_a_reference_set(ops in prop::collection::vec(op_strategy(), 0..200)) {
        for backend in all_backends() {
            let mut index = MembershipIndex::new(NodeBounds::shared(11), &forced(backend)).unwrap();
            let mut model = BTreeSet::new();
            for op in &ops {
                match *op {
                    Op::Add(s, t) => {
                        let edge = Edge::new(s, t);
                        let result = index.add(edge);
                        prop_assert_eq!(result.is_ok(), model.insert(edge));
                    }
                    Op::Remove(s, t) => {
                        let edge = Edge::new(s, t);
                        let result = index.remove(edge);
                        prop_assert_eq!(result.is_ok(), model.remove(&edge));
                    }
                }
            }
            prop_assert_eq!(index.len(), model.len() as u64);
            for s in 0..12 {
                for t in 0..12 {
                    let edge = Edge::new(s, t);
                    prop_assert_eq!(index.contains(edge).unwrap(), model.contains(&edge));
                }
            }
        }
    }
}
