use std::collections::HashMap;

use proptest::prelude::*;
use xswap_core::Edge;
use xswap_graph::{pairing_bound, pairing_index};

#[test]
fn exhaustive_injectivity_on_rectangular_domain() {
    let (max_source, max_target) = (40u32, 90u32);
    let bound = pairing_bound(max_source, max_target);
    let mut seen: HashMap<u128, Edge> = HashMap::new();
    for s in 0..=max_source {
        for t in 0..=max_target {
            let edge = Edge::new(s, t);
            let key = pairing_index(edge);
            assert!(key <= bound, "{edge} exceeds bound");
            if let Some(previous) = seen.insert(key, edge) {
                panic!("{edge} collides with {previous}");
            }
        }
    }
}

#[test]
fn scenario_bound_matches_hand_computation() {
    assert_eq!(pairing_bound(3, 3), 24);
    assert_eq!(pairing_index(Edge::new(4, 4)), 40);
}

proptest! {
    #[test]
    fn distinct_pairs_have_distinct_keys(a in any::<(u32, u32)>(), b in any::<(u32, u32)>()) {
        prop_assume!(a != b);
        prop_assert_ne!(pairing_index(Edge::from(a)), pairing_index(Edge::from(b)));
    }

    #[test]
    fn keys_never_exceed_the_domain_bound(
        max_source in 0u32..1_000_000,
        max_target in 0u32..1_000_000,
        s_frac in 0.0f64..=1.0,
        t_frac in 0.0f64..=1.0,
    ) {
        let s = (f64::from(max_source) * s_frac) as u32;
        let t = (f64::from(max_target) * t_frac) as u32;
        prop_assert!(pairing_index(Edge::new(s, t)) <= pairing_bound(max_source, max_target));
    }
}
