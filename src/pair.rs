//! Pair: an owned `(key, value)` entry.
//!
//! Equality looks at keys only, so a bucket's `find` locates the entry for
//! a key regardless of the value stored with it. `Clone` deep-copies both
//! fields.

#[derive(Clone, Debug)]
pub struct Pair<K, V> {
    key: K,
    value: V,
}

impl<K, V> Pair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn key_value_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Pair<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Pair<K, V> {}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
