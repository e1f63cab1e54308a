#![cfg(test)]

// State-machine property tests for ScanMap, kept inside the crate next to the
// modules they exercise.

use crate::scan_map::{RemoveError, ScanMap};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, the pool shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn key_at(pool: &[String], i: usize) -> String {
    pool[i].clone()
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `insert` returns the previous value exactly when the model had the key;
//   `get`/`contains_key`/`remove` parity with the model after each op.
// - `iter` yields exactly the model's live entries.
// - The ceiling stays a power of two >= 8, live entries never exceed two
//   thirds of it, and promotion is monotone until `clear`.
// (With the default 64-bit hasher, distinct short keys never collide, so the
// hash-matched map and the key-matched model agree.)
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ScanMap<String, i32> = ScanMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            let was_promoted = sut.is_promoted();
            let is_clear = matches!(op, OpI::Clear);
            match op {
                OpI::Insert(i, v) => {
                    let k = key_at(&pool, i);
                    prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = key_at(&pool, i);
                    match (sut.remove(k.as_str()), model.remove(&k)) {
                        (Ok(v), Some(mv)) => prop_assert_eq!(v, mv),
                        (Err(RemoveError::KeyNotFound), None) => {}
                        (got, want) => {
                            prop_assert!(false, "remove mismatch: {:?} vs {:?}", got, want)
                        }
                    }
                }
                OpI::Get(i) => {
                    let k = key_at(&pool, i);
                    prop_assert_eq!(sut.get(k.as_str()), model.get(&k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let k = key_at(&pool, i);
                    match (sut.get_mut(k.as_str()), model.get_mut(&k)) {
                        (Some(v), Some(mv)) => {
                            *v = v.saturating_add(d);
                            *mv = mv.saturating_add(d);
                        }
                        (None, None) => {}
                        (got, want) => {
                            prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", got, want)
                        }
                    }
                }
                OpI::Iterate => {
                    let got: BTreeMap<String, i32> =
                        sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    let want: BTreeMap<String, i32> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(got, want);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), 8);
                    prop_assert!(!sut.is_promoted());
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let cap = sut.capacity();
            prop_assert!(cap >= 8 && cap.is_power_of_two());
            prop_assert!(3 * sut.len() <= 2 * cap, "live count within the ceiling");
            prop_assert_eq!(sut.is_promoted(), cap > 8);
            if was_promoted && !is_clear {
                prop_assert!(sut.is_promoted(), "promotion only reverts on clear");
            }
        }
    }
}
