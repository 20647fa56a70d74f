#![forbid(unsafe_code)]

//! Singly linked, insertion-ordered sequence.
//!
//! Nodes live in a slot arena and link to their successor by slot index, so
//! every node has exactly one owner (the arena) and teardown is a plain `Vec`
//! drop regardless of length. Freed slots are recycled through a free list.

use std::fmt;
use std::ops::ControlFlow;

struct Link<T> {
    value: T,
    next: Option<usize>,
}

enum Slot<T> {
    Occupied(Link<T>),
    Vacant { next_free: Option<usize> },
}

/// Insertion-ordered sequence used for cast lists, adjacency lists and query
/// results.
pub struct OrderedSeq<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
}

impl<T> OrderedSeq<T> {
    /// Creates an empty sequence.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `item` after the current tail.
    pub fn add(&mut self, item: T) {
        let link = Link {
            value: item,
            next: None,
        };
        let idx = match self.free {
            Some(idx) => {
                if let Slot::Vacant { next_free } = &self.slots[idx] {
                    self.free = *next_free;
                }
                self.slots[idx] = Slot::Occupied(link);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(link));
                self.slots.len() - 1
            }
        };
        match self.tail {
            Some(tail) => {
                if let Slot::Occupied(prev) = &mut self.slots[tail] {
                    prev.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// Removes and returns the first element matching `pred`.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let (matched, next) = match &self.slots[idx] {
                Slot::Occupied(link) => (pred(&link.value), link.next),
                Slot::Vacant { .. } => return None,
            };
            if matched {
                match prev {
                    Some(p) => {
                        if let Slot::Occupied(link) = &mut self.slots[p] {
                            link.next = next;
                        }
                    }
                    None => self.head = next,
                }
                if self.tail == Some(idx) {
                    self.tail = prev;
                }
                return Some(self.vacate(idx));
            }
            prev = Some(idx);
            cursor = next;
        }
        None
    }

    /// Visits elements head to tail until `visitor` breaks.
    pub fn for_each<F>(&self, mut visitor: F) -> ControlFlow<()>
    where
        F: FnMut(&T) -> ControlFlow<()>,
    {
        for item in self.iter() {
            visitor(item)?;
        }
        ControlFlow::Continue(())
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            seq: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// First element, if any.
    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.len = 0;
    }

    fn vacate(&mut self, idx: usize) -> T {
        let slot = std::mem::replace(
            &mut self.slots[idx],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(idx);
        self.len -= 1;
        if self.len == 0 {
            self.clear();
        }
        match slot {
            Slot::Occupied(link) => link.value,
            Slot::Vacant { .. } => unreachable!("vacated slot {idx} was already free"),
        }
    }
}

impl<T: PartialEq> OrderedSeq<T> {
    /// Removes the first element equal to `item`. Returns whether one was
    /// found.
    pub fn remove(&mut self, item: &T) -> bool {
        self.remove_where(|candidate| candidate == item).is_some()
    }

    /// Returns `true` when an element equal to `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|candidate| candidate == item)
    }
}

impl<T> Default for OrderedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OrderedSeq<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T: PartialEq> PartialEq for OrderedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for OrderedSeq<T> {}

impl<T: fmt::Debug> fmt::Debug for OrderedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for OrderedSeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for OrderedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = OrderedSeq::new();
        seq.extend(iter);
        seq
    }
}

impl<'a, T> IntoIterator for &'a OrderedSeq<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over an [`OrderedSeq`].
pub struct Iter<'a, T> {
    seq: &'a OrderedSeq<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        match &self.seq.slots[idx] {
            Slot::Occupied(link) => {
                self.cursor = link.next;
                self.remaining -= 1;
                Some(&link.value)
            }
            Slot::Vacant { .. } => {
                self.cursor = None;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
