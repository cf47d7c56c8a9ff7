#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can look at
// bucket layout directly.

use crate::config::GrowthPolicy;
use crate::error::Error;
use crate::hash_map::ChainedHashMap;
use crate::pair::Pair;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hasher;

const EPS: f64 = 1e-9;

// Pool-indexed operations so shrinking walks toward earlier keys and shorter
// op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    InsertCopy(usize, i32),
    Erase(usize),
    Get(usize),
    Mutate(usize, i32),
    ApplyIfEven(i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::InsertCopy(i, v)),
            3 => idx.clone().prop_map(OpI::Erase),
            1 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), -100i32..100).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (-100i32..100).prop_map(OpI::ApplyIfEven),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_structure<S: std::hash::BuildHasher>(
    sut: &ChainedHashMap<String, i32, S>,
    model: &HashMap<String, i32>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    prop_assert!(sut.capacity().is_power_of_two());
    prop_assert!(sut.capacity() >= GrowthPolicy::HASH_MAP.initial_capacity);
    prop_assert!(sut.load_factor() <= GrowthPolicy::HASH_MAP.max_load_factor + EPS);
    for (k, v) in model {
        prop_assert_eq!(sut.get(k.as_str()), Some(v));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected without touching size, capacity or the stored value.
// - `erase` succeeds iff the key is present and afterwards `get` misses.
// - `insert` of a borrowed pair stores a copy: editing the original later is invisible.
// - `apply_if` counts and transforms exactly the matching entries.
// - After any insert the load factor is at most 3/4; after any successful
//   erase it is at least 1/4 unless the bucket count is at its floor.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainedHashMap<String, i32> = ChainedHashMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();
        let floor = GrowthPolicy::HASH_MAP.initial_capacity;

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i].clone();
                    let already = model.contains_key(&k);
                    let cap = sut.capacity();
                    match sut.insert_pair(Pair::new(k.clone(), v)) {
                        Ok(()) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            model.insert(k, v);
                        }
                        Err(Error::DuplicateKey) => {
                            prop_assert!(already, "duplicate error only when key exists");
                            prop_assert_eq!(sut.capacity(), cap);
                        }
                        Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                    }
                }
                OpI::InsertCopy(i, v) => {
                    let k = pool[i].clone();
                    let already = model.contains_key(&k);
                    let mut original = Pair::new(k.clone(), v);
                    let res = sut.insert(&original);
                    *original.value_mut() = v.wrapping_add(1);
                    drop(original);
                    match res {
                        Ok(()) => {
                            prop_assert!(!already);
                            model.insert(k.clone(), v);
                            prop_assert_eq!(sut.get(k.as_str()), Some(&v));
                        }
                        Err(Error::DuplicateKey) => prop_assert!(already),
                        Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                    }
                }
                OpI::Erase(i) => {
                    let k = &pool[i];
                    let present = model.remove(k).is_some();
                    match sut.erase(k.as_str()) {
                        Ok(()) => {
                            prop_assert!(present);
                            prop_assert!(
                                sut.load_factor() >= GrowthPolicy::HASH_MAP.min_load_factor - EPS
                                    || sut.capacity() == floor
                            );
                        }
                        Err(Error::KeyNotFound) => prop_assert!(!present),
                        Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                    }
                    prop_assert!(sut.get(k.as_str()).is_none());
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k.as_str()), model.get(k));
                    prop_assert_eq!(sut.contains_key(k.as_str()), model.contains_key(k));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    match (sut.get_mut(k.as_str()), model.get_mut(k)) {
                        (Some(sv), Some(mv)) => {
                            *sv = sv.saturating_add(d);
                            *mv = mv.saturating_add(d);
                        }
                        (None, None) => {}
                        _ => prop_assert!(false, "presence mismatch for {:?}", k),
                    }
                }
                OpI::ApplyIfEven(d) => {
                    let even = |k: &String| k.len() % 2 == 0;
                    let expected = model.keys().filter(|k| even(*k)).count();
                    let n = sut.apply_if(|k| even(k), |v| *v = v.wrapping_add(d));
                    prop_assert_eq!(n, expected);
                    for (k, v) in model.iter_mut() {
                        if even(k) {
                            *v = v.wrapping_add(d);
                        }
                    }
                }
                OpI::Iterate => {
                    let s_keys: BTreeSet<_> = sut.iter().map(|(k, _)| k.clone()).collect();
                    let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                    prop_assert_eq!(sut.iter().count(), model.len());
                    prop_assert_eq!(s_keys, m_keys);
                }
            }

            check_structure(&sut, &model)?;
        }
    }
}

// Collision variant: every key hashes to zero, so each rehash moves the whole
// map into bucket 0 and lookups rely entirely on key equality.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl std::hash::BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: ChainedHashMap<String, i32, ConstBuildHasher> =
            ChainedHashMap::with_hasher(ConstBuildHasher);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) | OpI::InsertCopy(i, v) => {
                    let k = pool[i].clone();
                    let already = model.contains_key(&k);
                    match sut.insert(&Pair::new(k.clone(), v)) {
                        Ok(()) => {
                            prop_assert!(!already);
                            model.insert(k, v);
                        }
                        Err(Error::DuplicateKey) => prop_assert!(already),
                        Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                    }
                }
                OpI::Erase(i) => {
                    let k = &pool[i];
                    let removed = sut.remove(k.as_str()).ok().map(|p| p.into_parts());
                    prop_assert_eq!(removed, model.remove_entry(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k.as_str()), model.get(k));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let (Some(sv), Some(mv)) = (sut.get_mut(k.as_str()), model.get_mut(k)) {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                }
                OpI::ApplyIfEven(d) => {
                    let n = sut.apply_if(|_| true, |v| *v = v.wrapping_add(d));
                    prop_assert_eq!(n, model.len());
                    for v in model.values_mut() {
                        *v = v.wrapping_add(d);
                    }
                }
                OpI::Iterate => {
                    let s_keys: BTreeSet<_> = sut.iter().map(|(k, _)| k.clone()).collect();
                    let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                    prop_assert_eq!(s_keys, m_keys);
                }
            }

            check_structure(&sut, &model)?;
            prop_assert_eq!(sut.buckets[0].len(), sut.len());
        }
    }
}
