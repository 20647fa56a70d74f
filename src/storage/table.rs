#![forbid(unsafe_code)]

//! Fixed-bucket hash table with separate chaining.
//!
//! Bucket selection is `key mod capacity` normalised into `0..capacity`, so
//! negative keys land in valid buckets. The bucket count is chosen once at
//! construction; there is no rehashing, and a workload larger than the
//! intended key space only lengthens chains.

use std::fmt;
use std::ops::ControlFlow;

use tracing::trace;

use crate::types::Keyed;

/// Bucket count used by [`KeyedTable::new`].
pub const DEFAULT_CAPACITY: usize = 2000;

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// Unique-key table of records.
pub struct KeyedTable<T> {
    buckets: Vec<Option<Box<Node<T>>>>,
    len: usize,
}

impl<T: Keyed> KeyedTable<T> {
    /// Creates a table with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a table with `capacity` buckets. A capacity of zero is
    /// rounded up to one bucket.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self { buckets, len: 0 }
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no record is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn bucket_of(&self, key: i64) -> usize {
        let capacity = self.buckets.len() as i64;
        (((key % capacity) + capacity) % capacity) as usize
    }

    /// Stores `record`. An existing record with the same key is overwritten in
    /// place and returned; otherwise the record becomes the new bucket head.
    pub fn insert(&mut self, record: T) -> Option<T> {
        let key = record.key();
        if let Some(existing) = self.find_mut(key) {
            trace!(key, "table.insert.replace");
            return Some(std::mem::replace(existing, record));
        }
        let idx = self.bucket_of(key);
        let next = self.buckets[idx].take();
        self.buckets[idx] = Some(Box::new(Node {
            value: record,
            next,
        }));
        self.len += 1;
        trace!(key, bucket = idx, "table.insert.new");
        None
    }

    /// Looks up the record stored under `key`.
    pub fn find(&self, key: i64) -> Option<&T> {
        let mut cursor = self.buckets[self.bucket_of(key)].as_deref();
        while let Some(node) = cursor {
            if node.value.key() == key {
                return Some(&node.value);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    /// Mutable lookup. Callers must not change the record's key.
    pub fn find_mut(&mut self, key: i64) -> Option<&mut T> {
        let idx = self.bucket_of(key);
        let mut cursor = self.buckets[idx].as_deref_mut();
        while let Some(node) = cursor {
            if node.value.key() == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Returns `true` when a record is stored under `key`.
    pub fn contains(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Unlinks and returns the record stored under `key`.
    pub fn remove(&mut self, key: i64) -> Option<T> {
        let idx = self.bucket_of(key);
        let removed = unlink(&mut self.buckets[idx], key)?;
        self.len -= 1;
        trace!(key, bucket = idx, "table.remove");
        Some(removed)
    }

    /// Visits every record until `visitor` breaks. Order follows bucket index
    /// and then chain position, which callers must not rely on.
    pub fn for_each<F>(&self, mut visitor: F) -> ControlFlow<()>
    where
        F: FnMut(&T) -> ControlFlow<()>,
    {
        for record in self.iter() {
            visitor(record)?;
        }
        ControlFlow::Continue(())
    }

    /// Iterates every record in bucket order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    /// Length of the longest bucket chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets
            .iter()
            .map(|bucket| {
                let mut len = 0;
                let mut cursor = bucket.as_deref();
                while let Some(node) = cursor {
                    len += 1;
                    cursor = node.next.as_deref();
                }
                len
            })
            .max()
            .unwrap_or(0)
    }
}

impl<T> KeyedTable<T> {
    /// Releases every record. Buckets stay allocated.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            release_chain(bucket.take());
        }
        self.len = 0;
    }
}

fn unlink<T: Keyed>(head: &mut Option<Box<Node<T>>>, key: i64) -> Option<T> {
    let mut slot = head;
    while slot.as_ref()?.value.key() != key {
        slot = &mut slot.as_mut()?.next;
    }
    let node = slot.take()?;
    let Node { value, next } = *node;
    *slot = next;
    Some(value)
}

// Chains are released iteratively so long buckets cannot exhaust the stack
// through recursive `Box` drops.
fn release_chain<T>(mut cursor: Option<Box<Node<T>>>) {
    while let Some(mut node) = cursor {
        cursor = node.next.take();
    }
}

impl<T: Keyed> Default for KeyedTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for KeyedTable<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Keyed + fmt::Debug> fmt::Debug for KeyedTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedTable")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, T: Keyed> IntoIterator for &'a KeyedTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records of a [`KeyedTable`].
pub struct Iter<'a, T> {
    buckets: std::slice::Iter<'a, Option<Box<Node<T>>>>,
    chain: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain {
                self.chain = node.next.as_deref();
                self.remaining -= 1;
                return Some(&node.value);
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
