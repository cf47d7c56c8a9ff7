//! ChainedHashMap: separate chaining over a power-of-two array of `Vector` buckets.

use crate::config::GrowthPolicy;
use crate::error::{Error, Result};
use crate::pair::Pair;
use crate::vector::Vector;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

type Bucket<K, V> = Vector<Pair<K, V>>;

/// A map from `K` to `V` that stores each entry in bucket
/// `hash(key) & (capacity - 1)`.
///
/// Stored pairs are always the map's own copies: `insert` clones the pair it
/// is given, and the bucket array is rebuilt from copies whenever the load
/// factor leaves the policy's band.
pub struct ChainedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    pub(crate) buckets: Vec<Bucket<K, V>>,
    len: usize,
    policy: GrowthPolicy,
}

impl<K, V> ChainedHashMap<K, V> {
    /// An empty map with `HASH_MAP_INITIAL_CAPACITY` buckets and hashbrown's
    /// default hasher.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K, V, S: Default> Default for ChainedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

/// Iterator over stored entries in bucket-then-slot order.
pub struct Iter<'a, K, V> {
    it: core::iter::Flatten<core::slice::Iter<'a, Bucket<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|p| (p.key(), p.value()))
    }
}

/// Iterator over stored entries with mutable values.
pub struct IterMut<'a, K, V> {
    it: core::iter::Flatten<core::slice::IterMut<'a, Bucket<K, V>>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(Pair::key_value_mut)
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        let policy = GrowthPolicy::HASH_MAP;
        Self {
            hasher,
            buckets: (0..policy.initial_capacity).map(|_| Vector::new()).collect(),
            len: 0,
            policy,
        }
    }

    /// Fails with `InvalidConfig` unless the policy keeps every reachable
    /// bucket count a power of two.
    pub fn with_policy_and_hasher(policy: GrowthPolicy, hasher: S) -> Result<Self> {
        policy.validate_for_hash_map()?;
        Ok(Self {
            hasher,
            buckets: allocate_buckets(policy.initial_capacity)?,
            len: 0,
            policy,
        })
    }

    /// Total entries across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn load_factor(&self) -> f64 {
        GrowthPolicy::load_factor(self.len, self.capacity())
    }

    /// Applies `transform` in place to every stored value whose key satisfies
    /// `pred`, returning how many values were transformed.
    pub fn apply_if<P, F>(&mut self, mut pred: P, mut transform: F) -> usize
    where
        P: FnMut(&K) -> bool,
        F: FnMut(&mut V),
    {
        let mut changed = 0;
        for (k, v) in self.iter_mut() {
            if pred(k) {
                transform(v);
                changed += 1;
            }
        }
        changed
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.buckets.iter().flatten(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.buckets.iter_mut().flatten(),
        }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn bucket_index<Q>(&self, q: &Q, capacity: usize) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) as usize) & (capacity - 1)
    }

    /// The stored value for `q`, not a copy.
    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = &self.buckets[self.bucket_index(q, self.capacity())];
        bucket
            .iter()
            .find(|p| p.key().borrow() == q)
            .map(Pair::value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.bucket_index(q, self.capacity());
        self.buckets[idx]
            .iter_mut()
            .find(|p| p.key().borrow() == q)
            .map(Pair::value_mut)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).is_some()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Stores a copy of `pair`. The caller keeps the original.
    ///
    /// The copy is taken before any resize, so a failing `Clone` leaves the
    /// map untouched.
    pub fn insert(&mut self, pair: &Pair<K, V>) -> Result<()> {
        if self.contains_key(pair.key()) {
            return Err(Error::DuplicateKey);
        }
        self.insert_unique(pair.clone())
    }

    /// Stores `pair` itself, skipping the copy.
    pub fn insert_pair(&mut self, pair: Pair<K, V>) -> Result<()> {
        if self.contains_key(pair.key()) {
            return Err(Error::DuplicateKey);
        }
        self.insert_unique(pair)
    }

    /// Adds a pair whose key is known to be absent. At the high-water mark the
    /// new pair goes into the staged bucket array, and the staged array only
    /// replaces the live one once it holds every entry.
    fn insert_unique(&mut self, pair: Pair<K, V>) -> Result<()> {
        if self.policy.should_grow(self.len, self.capacity()) {
            let grown = self.policy.grown(self.capacity())?;
            let mut staged = self.stage(grown)?;
            let idx = self.bucket_index(pair.key(), grown);
            staged[idx].push(pair)?;
            self.install(staged);
        } else {
            let idx = self.bucket_index(pair.key(), self.capacity());
            self.buckets[idx].push(pair)?;
        }
        self.len += 1;
        Ok(())
    }

    /// Drops the entry for `q`.
    pub fn erase<Q>(&mut self, q: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove(q).map(drop)
    }

    /// Takes the entry for `q` out of the map.
    ///
    /// The shrink check runs first and counts the entry about to be removed,
    /// so a miss can still shrink the bucket array.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.policy.should_shrink(self.len, self.capacity()) {
            let shrunk = self.policy.shrunk(self.capacity());
            if shrunk < self.capacity() {
                self.rehash(shrunk)?;
            }
        }
        let idx = self.bucket_index(q, self.capacity());
        let bucket = &mut self.buckets[idx];
        let slot = bucket
            .position(|p| p.key().borrow() == q)
            .ok_or(Error::KeyNotFound)?;
        let pair = bucket.remove(slot)?;
        self.len -= 1;
        Ok(pair)
    }

    /// Rebuilds the bucket array at `capacity`.
    fn rehash(&mut self, capacity: usize) -> Result<()> {
        let staged = self.stage(capacity)?;
        self.install(staged);
        Ok(())
    }

    /// Builds a bucket array of `capacity` buckets from copies of every stored
    /// pair. The live array is not touched, so on failure (or a panicking
    /// `Clone`) dropping the partial array frees every staged copy.
    fn stage(&self, capacity: usize) -> Result<Vec<Bucket<K, V>>> {
        let mut staged = allocate_buckets(capacity)?;
        for pair in self.buckets.iter().flatten() {
            let idx = self.bucket_index(pair.key(), capacity);
            staged[idx].push_back(pair)?;
        }
        Ok(staged)
    }

    fn install(&mut self, staged: Vec<Bucket<K, V>>) {
        log::debug!(
            "rehash {} -> {} buckets ({} entries)",
            self.capacity(),
            staged.len(),
            self.len
        );
        self.buckets = staged;
    }
}

fn allocate_buckets<K, V>(count: usize) -> Result<Vec<Bucket<K, V>>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(count)
        .map_err(|e| Error::from_reserve(count, e))?;
    for _ in 0..count {
        buckets.push(Vector::with_policy(GrowthPolicy::VECTOR)?);
    }
    Ok(buckets)
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::BTreeSet;
    use std::hash::Hasher;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ConstBuildHasher;
    struct ConstHasher;
    impl BuildHasher for ConstBuildHasher {
        type Hasher = ConstHasher;
        fn build_hasher(&self) -> Self::Hasher {
            ConstHasher
        }
    }
    impl Hasher for ConstHasher {
        fn write(&mut self, _bytes: &[u8]) {}
        fn finish(&self) -> u64 {
            0
        } // every key lands in bucket 0
    }

    fn char_map() -> ChainedHashMap<char, usize> {
        ChainedHashMap::new()
    }

    fn p<K, V>(k: K, v: V) -> Pair<K, V> {
        Pair::new(k, v)
    }

    /// Invariant: Duplicate keys are rejected and the map remains unchanged.
    #[test]
    fn duplicate_insert_rejected() {
        let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
        m.insert(&p("dup".to_string(), 1)).unwrap();
        assert_eq!(m.insert(&p("dup".to_string(), 2)), Err(Error::DuplicateKey));
        assert_eq!(m.get("dup"), Some(&1));
        assert_eq!(m.len(), 1);
    }

    /// Invariant: A duplicate insert at the high-water mark does not rehash.
    #[test]
    fn duplicate_insert_does_not_grow() {
        let mut m = char_map();
        for (i, c) in ('a'..='f').enumerate() {
            m.insert_pair(p(c, i)).unwrap();
        }
        assert_eq!(m.load_factor(), 0.75);
        assert_eq!(m.insert(&p('a', 99)), Err(Error::DuplicateKey));
        assert_eq!(m.capacity(), 8);
        assert_eq!(m.len(), 6);
    }

    /// Invariant: `get(k).is_some() == contains_key(k)` for present/absent keys.
    #[test]
    fn get_contains_parity() {
        let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
        let present = ["a", "b", "c"];
        for (i, k) in present.iter().enumerate() {
            m.insert_pair(p((*k).to_string(), i as i32)).unwrap();
        }
        for k in present {
            assert!(m.get(k).is_some());
            assert!(m.contains_key(k));
        }
        for k in ["x", "y", "z"] {
            assert!(m.get(k).is_none());
            assert!(!m.contains_key(k));
        }
    }

    /// Invariant: `get_mut` edits the stored value, visible to later lookups.
    #[test]
    fn get_mut_updates_stored_value() {
        let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
        m.insert_pair(p("k1".to_string(), 10)).unwrap();
        *m.get_mut("k1").unwrap() += 5;
        assert_eq!(m.get("k1"), Some(&15));
        assert!(m.get_mut("nope").is_none());
    }

    /// Invariant: After `remove`, the key is absent; reinserting the same key
    /// stores the new value.
    #[test]
    fn remove_then_reinsert_same_key_yields_new_value() {
        let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
        m.insert_pair(p("k".to_string(), 1)).unwrap();

        let (k, v) = m.remove("k").expect("present for removal").into_parts();
        assert_eq!(k, "k");
        assert_eq!(v, 1);
        assert!(!m.contains_key("k"));
        assert_eq!(m.erase("k"), Err(Error::KeyNotFound));

        m.insert_pair(p("k".to_string(), 2)).expect("reinsert allowed");
        assert_eq!(m.get("k"), Some(&2));
    }

    /// Invariant: Lookups work under total collision; key equality picks the entry.
    #[test]
    fn collision_handling_with_const_hasher() {
        let mut m: ChainedHashMap<String, i32, ConstBuildHasher> =
            ChainedHashMap::with_hasher(ConstBuildHasher);
        for (i, k) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            m.insert_pair(p((*k).to_string(), i as i32)).unwrap();
        }
        assert_eq!(m.capacity(), 16);
        assert_eq!(m.buckets[0].len(), 7);
        assert_eq!(m.get("a"), Some(&0));
        assert_eq!(m.get("g"), Some(&6));

        m.erase("d").unwrap();
        assert_eq!(m.get("d"), None);
        assert_eq!(m.get("e"), Some(&4));
        assert_eq!(m.len(), 6);
    }

    /// Invariant: Iteration yields each live entry exactly once; `iter_mut`
    /// updates values as seen by subsequent lookups.
    #[test]
    fn iteration_and_mutation() {
        let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
        let keys = ["k1", "k2", "k3"];
        for (i, k) in keys.iter().enumerate() {
            m.insert_pair(p((*k).to_string(), i as i32)).unwrap();
        }

        let seen: BTreeSet<String> = m.iter().map(|(k, _v)| k.clone()).collect();
        let expected: BTreeSet<String> = keys.iter().map(|s| (*s).to_string()).collect();
        assert_eq!(seen, expected);

        for (_k, v) in m.iter_mut() {
            *v += 10;
        }
        assert_eq!(m.get("k1"), Some(&10));
        assert_eq!(m.get("k2"), Some(&11));
        assert_eq!(m.get("k3"), Some(&12));
        assert_eq!((&m).into_iter().count(), 3);
    }

    /// Invariant: `len()` and `is_empty()` ignore failed inserts and erases.
    #[test]
    fn len_and_is_empty_behaviors() {
        let mut m = char_map();
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());

        m.insert(&p('a', 1)).unwrap();
        assert!(m.insert(&p('a', 2)).is_err());
        assert_eq!(m.len(), 1);

        assert!(m.erase(&'z').is_err());
        assert_eq!(m.len(), 1);

        m.erase(&'a').unwrap();
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());
    }

    /// Invariant: every rehash keeps each entry reachable in bucket
    /// `hash & (capacity - 1)`.
    #[test]
    fn entries_live_in_their_masked_bucket() {
        let mut m: ChainedHashMap<u32, u32> = ChainedHashMap::new();
        for i in 0..100 {
            m.insert_pair(p(i, i * 2)).unwrap();
        }
        for (idx, bucket) in m.buckets.iter().enumerate() {
            for pair in bucket {
                assert_eq!(m.bucket_index(pair.key(), m.capacity()), idx);
            }
        }
        let total: usize = m.buckets.iter().map(Vector::len).sum();
        assert_eq!(total, m.len());
    }

    /// Invariant: the shrink check sees the load before removal, so erasing an
    /// absent key from a sparse map still shrinks it.
    #[test]
    fn shrink_runs_before_lookup() {
        let mut m = char_map();
        for (i, c) in ('a'..='p').enumerate() {
            m.insert_pair(p(c, i)).unwrap();
        }
        assert_eq!(m.capacity(), 32);
        for c in 'a'..='h' {
            m.erase(&c).unwrap();
        }
        assert_eq!(m.len(), 8);
        assert_eq!(m.capacity(), 32);
        assert_eq!(m.load_factor(), 0.25);

        assert_eq!(m.erase(&'#'), Err(Error::KeyNotFound));
        assert_eq!(m.capacity(), 16);
        assert_eq!(m.len(), 8);
        for c in 'i'..='p' {
            assert!(m.contains_key(&c));
        }
    }

    /// Invariant: the bucket count never drops below the initial capacity.
    #[test]
    fn shrink_stops_at_floor() {
        let mut m = char_map();
        m.insert_pair(p('a', 0)).unwrap();
        m.erase(&'a').unwrap();
        assert_eq!(m.capacity(), 8);
        assert!(m.erase(&'a').is_err());
        assert_eq!(m.capacity(), 8);
    }

    /// Invariant: `apply_if` touches only matching keys and counts them.
    #[test]
    fn apply_if_counts_and_transforms() {
        let mut m = char_map();
        for (i, c) in ['1', 'A', '2', 'B', '3'].into_iter().enumerate() {
            m.insert_pair(p(c, i + 1)).unwrap();
        }
        let n = m.apply_if(|k| k.is_ascii_digit(), |v| *v *= 2);
        assert_eq!(n, 3);
        assert_eq!(m.get(&'1'), Some(&2));
        assert_eq!(m.get(&'A'), Some(&2));
        assert_eq!(m.get(&'2'), Some(&6));
        assert_eq!(m.get(&'B'), Some(&4));
        assert_eq!(m.get(&'3'), Some(&10));
        assert_eq!(m.apply_if(|_| false, |v| *v = 0), 0);
    }

    #[test]
    fn custom_policy() {
        let policy = GrowthPolicy::HASH_MAP.with_initial_capacity(2);
        let mut m: ChainedHashMap<u8, u8, ConstBuildHasher> =
            ChainedHashMap::with_policy_and_hasher(policy, ConstBuildHasher).unwrap();
        assert_eq!(m.capacity(), 2);
        m.insert_pair(p(1, 1)).unwrap();
        m.insert_pair(p(2, 2)).unwrap();
        assert_eq!(m.capacity(), 2);
        m.insert_pair(p(3, 3)).unwrap();
        assert_eq!(m.capacity(), 4);

        let bad = GrowthPolicy::HASH_MAP.with_initial_capacity(6);
        assert!(matches!(
            ChainedHashMap::<u8, u8, ConstBuildHasher>::with_policy_and_hasher(
                bad,
                ConstBuildHasher
            ),
            Err(Error::InvalidConfig { .. })
        ));
    }

    // Value whose live copies are counted. While `clones_left` is `Some(n)`,
    // the clone after the next `n` panics.
    #[derive(Debug)]
    struct Tracked {
        tag: u32,
        live: Rc<Cell<isize>>,
        clones_left: Rc<Cell<Option<usize>>>,
    }
    impl Tracked {
        fn new(tag: u32, live: &Rc<Cell<isize>>, clones_left: &Rc<Cell<Option<usize>>>) -> Self {
            live.set(live.get() + 1);
            Tracked {
                tag,
                live: live.clone(),
                clones_left: clones_left.clone(),
            }
        }
    }
    impl Clone for Tracked {
        fn clone(&self) -> Self {
            if let Some(n) = self.clones_left.get() {
                assert!(n > 0, "clone budget exhausted");
                self.clones_left.set(Some(n - 1));
            }
            Tracked::new(self.tag, &self.live, &self.clones_left)
        }
    }
    impl Drop for Tracked {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn tracked_map(
        n: u32,
        live: &Rc<Cell<isize>>,
        clones_left: &Rc<Cell<Option<usize>>>,
    ) -> ChainedHashMap<u32, Tracked> {
        let mut m = ChainedHashMap::new();
        for i in 0..n {
            m.insert_pair(p(i, Tracked::new(i, live, clones_left))).unwrap();
        }
        m
    }

    fn assert_tags(m: &ChainedHashMap<u32, Tracked>, keys: core::ops::Range<u32>) {
        for i in keys {
            assert_eq!(m.get(&i).map(|t| t.tag), Some(i));
        }
    }

    /// Invariant: a rehash copies each pair once and frees every old copy;
    /// dropping the map frees the rest. Nothing leaks and nothing is freed twice.
    #[test]
    fn rehash_balances_copies_and_drops() {
        let live = Rc::new(Cell::new(0));
        let budget = Rc::new(Cell::new(None));
        let mut m: ChainedHashMap<u32, Tracked> = ChainedHashMap::new();
        for i in 0..40 {
            let original = p(i, Tracked::new(i, &live, &budget));
            m.insert(&original).unwrap();
            drop(original);
            assert_eq!(live.get(), m.len() as isize);
        }
        assert_eq!(m.capacity(), 64);
        for i in 0..37 {
            m.erase(&i).unwrap();
            assert_eq!(live.get(), m.len() as isize);
        }
        assert_eq!(m.capacity(), 8);
        drop(m);
        assert_eq!(live.get(), 0);
    }

    /// Invariant: when copying the incoming pair fails at the high-water mark,
    /// the map keeps its bucket count, length and contents.
    #[test]
    fn failed_copy_on_insert_leaves_map_unchanged() {
        let live = Rc::new(Cell::new(0));
        let budget = Rc::new(Cell::new(None));
        let mut m = tracked_map(6, &live, &budget);
        assert_eq!(m.load_factor(), 0.75);

        let incoming = p(6, Tracked::new(6, &live, &budget));
        budget.set(Some(0));
        let res = catch_unwind(AssertUnwindSafe(|| m.insert(&incoming)));
        assert!(res.is_err());
        assert_eq!(m.capacity(), 8);
        assert_eq!(m.len(), 6);
        assert!(!m.contains_key(&6));
        assert_tags(&m, 0..6);
        assert_eq!(live.get(), 7);

        budget.set(None);
        m.insert(&incoming).unwrap();
        assert_eq!(m.capacity(), 16);
        assert_eq!(m.len(), 7);
        drop(incoming);
        drop(m);
        assert_eq!(live.get(), 0);
    }

    /// Invariant: a copy failing halfway through a growing rehash drops every
    /// staged copy and the incoming pair; the live buckets are untouched.
    #[test]
    fn failed_grow_rehash_frees_staged_copies() {
        let live = Rc::new(Cell::new(0));
        let budget = Rc::new(Cell::new(None));
        let mut m = tracked_map(6, &live, &budget);

        let incoming = p(6, Tracked::new(6, &live, &budget));
        budget.set(Some(3));
        let res = catch_unwind(AssertUnwindSafe(|| m.insert_pair(incoming)));
        assert!(res.is_err());
        assert_eq!(budget.get(), Some(0));
        assert_eq!(live.get(), m.len() as isize);
        assert_eq!(m.capacity(), 8);
        assert_eq!(m.len(), 6);
        assert_tags(&m, 0..6);

        budget.set(None);
        drop(m);
        assert_eq!(live.get(), 0);
    }

    /// Invariant: a copy failing during a shrinking rehash leaves the entry
    /// in place and the bucket count unchanged.
    #[test]
    fn failed_shrink_rehash_keeps_entry() {
        let live = Rc::new(Cell::new(0));
        let budget = Rc::new(Cell::new(None));
        let mut m = tracked_map(7, &live, &budget);
        for i in 4..7 {
            m.erase(&i).unwrap();
        }
        assert_eq!(m.capacity(), 16);
        assert_eq!(m.len(), 4);

        budget.set(Some(1));
        let res = catch_unwind(AssertUnwindSafe(|| m.erase(&0)));
        assert!(res.is_err());
        assert_eq!(live.get(), 4);
        assert_eq!(m.capacity(), 16);
        assert_eq!(m.len(), 4);
        assert_tags(&m, 0..4);

        budget.set(None);
        m.erase(&0).unwrap();
        assert_eq!(m.capacity(), 8);
        assert_tags(&m, 1..4);
        drop(m);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn debug_lists_entries() {
        let mut m: ChainedHashMap<char, u8, ConstBuildHasher> =
            ChainedHashMap::with_hasher(ConstBuildHasher);
        m.insert_pair(p('a', 1)).unwrap();
        assert_eq!(format!("{:?}", m), "{'a': 1}");
    }
}
