// File: ./src/scripture/cache.rs
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Bounded map that evicts the entry inserted longest ago.
///
/// Reads do not refresh an entry's position.
#[derive(Debug)]
pub struct BookCache<T> {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, Arc<T>>,
}

impl<T> BookCache<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity + 1),
            entries: HashMap::with_capacity(capacity + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts `value` unless `key` is already resident, in which case the
    /// resident value wins. Returns the resident value and whatever was evicted.
    pub fn insert(&mut self, key: &str, value: Arc<T>) -> (Arc<T>, Option<String>) {
        if let Some(existing) = self.entries.get(key) {
            return (existing.clone(), None);
        }
        self.entries.insert(key.to_string(), value.clone());
        self.order.push_back(key.to_string());

        let mut evicted = None;
        if self.order.len() > self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.entries.remove(&oldest);
            evicted = Some(oldest);
        }
        (value, evicted)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resident keys, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }
}
