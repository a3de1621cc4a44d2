//! Per-session resource cache

use std::collections::HashMap;

use crate::models::resource::ResourceSet;

/// Resource cache entry
#[derive(Debug, Clone)]
pub struct ResourceCacheEntry {
    pub resources: ResourceSet,
    /// Insertion sequence, oldest evicted first
    pub cached_seq: u64,
}

/// In-memory resource cache keyed by release name
#[derive(Debug, Clone)]
pub struct ResourceCache {
    entries: HashMap<String, ResourceCacheEntry>,
    capacity: usize,
    next_seq: u64,
}

impl ResourceCache {
    /// Create a new resource cache
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            next_seq: 0,
        }
    }

    /// Get the resources of a release from cache
    pub fn get(&self, name: &str) -> Option<&ResourceSet> {
        self.entries.get(name).map(|e| &e.resources)
    }

    /// Insert the resources of a release into cache
    pub fn insert(&mut self, name: impl Into<String>, resources: ResourceSet) {
        if self.capacity == 0 {
            return;
        }

        let name = name.into();

        // Evict oldest if at capacity
        if !self.entries.contains_key(&name) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.cached_seq)
                .map(|(name, _)| name.clone())
            {
                self.entries.remove(&oldest);
            }
        }

        self.next_seq += 1;
        self.entries.insert(
            name,
            ResourceCacheEntry {
                resources,
                cached_seq: self.next_seq,
            },
        );
    }

    /// Remove a release from cache
    pub fn remove(&mut self, name: &str) -> Option<ResourceCacheEntry> {
        self.entries.remove(name)
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get cache size
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(64)
    }
}
