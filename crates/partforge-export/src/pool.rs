//! Identity-keyed resource pools
//!
//! A pool hands out dense indices in order of first encounter. Keys are
//! arena handles, so membership is by identity: two materials with equal
//! contents but different handles occupy two slots.

/// One pooled resource with the metadata recorded on first encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolEntry<K, M> {
    pub key: K,
    pub meta: M,
}

/// Deduplicating list of resource handles
#[derive(Debug, Clone)]
pub struct ResourcePool<K, M = ()> {
    entries: Vec<PoolEntry<K, M>>,
}

impl<K, M> Default for ResourcePool<K, M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq, M> ResourcePool<K, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `key`, appending it with `meta` if it was not pooled yet.
    /// `meta` is ignored for keys already present.
    pub fn add_or_get_with(&mut self, key: K, meta: M) -> usize {
        if let Some(index) = self.index_of(key) {
            return index;
        }
        self.entries.push(PoolEntry { key, meta });
        self.entries.len() - 1
    }

    /// Linear lookup; pools stay in the tens to hundreds of entries
    pub fn index_of(&self, key: K) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry<K, M>> {
        self.entries.iter()
    }
}

impl<K: Copy + Eq> ResourcePool<K, ()> {
    pub fn add_or_get(&mut self, key: K) -> usize {
        self.add_or_get_with(key, ())
    }
}
