#![forbid(unsafe_code)]

//! Binary search tree keyed by rating.
//!
//! Each node owns the bucket of records that share its rating, so the tree
//! never holds more than one node per distinct rating (at most ten). Nodes
//! are never rebalanced and stay in place when their bucket empties.

use std::cmp::Ordering;
use std::fmt;
use std::ops::ControlFlow;

use tracing::trace;

use crate::primitives::OrderedSeq;
use crate::types::{Rated, Rating};

struct RatingNode<T> {
    rating: Rating,
    bucket: OrderedSeq<T>,
    left: Option<Box<RatingNode<T>>>,
    right: Option<Box<RatingNode<T>>>,
}

/// Secondary index answering ascending-rating and rating-range queries.
pub struct RatingIndex<T> {
    root: Option<Box<RatingNode<T>>>,
    len: usize,
    nodes: usize,
}

impl<T: Rated> RatingIndex<T> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            nodes: 0,
        }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no record is indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct ratings that have been inserted.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Adds `record` to the bucket for its rating. Unrated records are
    /// rejected and `false` is returned.
    pub fn insert(&mut self, record: T) -> bool {
        let Some(rating) = record.rating() else {
            return false;
        };
        if insert_at(&mut self.root, rating, record) {
            self.nodes += 1;
            trace!(rating = rating.get(), "rating_index.node_created");
        }
        self.len += 1;
        true
    }

    /// Removes and returns the first record in `rating`'s bucket that
    /// matches `pred`.
    pub fn remove_where<F>(&mut self, rating: Rating, pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            cursor = match rating.cmp(&node.rating) {
                Ordering::Equal => {
                    let removed = node.bucket.remove_where(pred)?;
                    self.len -= 1;
                    return Some(removed);
                }
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Visits records in ascending rating order until `visitor` breaks.
    /// Records sharing a rating come out in insertion order.
    pub fn for_each_in_order<F>(&self, visitor: F) -> ControlFlow<()>
    where
        F: FnMut(&T) -> ControlFlow<()>,
    {
        self.for_each_in_range(Rating::MIN, Rating::MAX, visitor)
    }

    /// Visits records with `min <= rating <= max` in ascending order.
    /// Subtrees entirely outside the range are never entered.
    pub fn for_each_in_range<F>(
        &self,
        min: Rating,
        max: Rating,
        mut visitor: F,
    ) -> ControlFlow<()>
    where
        F: FnMut(&T) -> ControlFlow<()>,
    {
        for record in self.range(min, max) {
            visitor(record)?;
        }
        ControlFlow::Continue(())
    }

    /// Ascending in-order iterator over every record.
    pub fn iter(&self) -> Iter<'_, T> {
        self.range(Rating::MIN, Rating::MAX)
    }

    /// Ascending iterator over records with `min <= rating <= max`. An empty
    /// range (`min > max`) yields nothing.
    pub fn range(&self, min: Rating, max: Rating) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            bucket: None,
            min,
            max,
        };
        iter.descend_left(self.root.as_deref());
        iter
    }
}

impl<T> RatingIndex<T> {
    /// Releases every node.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<RatingNode<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
        self.nodes = 0;
    }
}

fn insert_at<T>(slot: &mut Option<Box<RatingNode<T>>>, rating: Rating, record: T) -> bool {
    match slot {
        None => {
            let mut bucket = OrderedSeq::new();
            bucket.add(record);
            *slot = Some(Box::new(RatingNode {
                rating,
                bucket,
                left: None,
                right: None,
            }));
            true
        }
        Some(node) => match rating.cmp(&node.rating) {
            Ordering::Equal => {
                node.bucket.add(record);
                false
            }
            Ordering::Less => insert_at(&mut node.left, rating, record),
            Ordering::Greater => insert_at(&mut node.right, rating, record),
        },
    }
}

impl<T: Rated> Default for RatingIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RatingIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingIndex")
            .field("len", &self.len)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<T> Drop for RatingIndex<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, T: Rated> IntoIterator for &'a RatingIndex<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator with range pruning, driven by an explicit stack.
pub struct Iter<'a, T> {
    stack: Vec<&'a RatingNode<T>>,
    bucket: Option<crate::primitives::seq::Iter<'a, T>>,
    min: Rating,
    max: Rating,
}

impl<'a, T> Iter<'a, T> {
    fn descend_left(&mut self, mut cursor: Option<&'a RatingNode<T>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = if node.rating >= self.min {
                node.left.as_deref()
            } else {
                None
            };
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bucket) = self.bucket.as_mut() {
                if let Some(record) = bucket.next() {
                    return Some(record);
                }
                self.bucket = None;
            }
            let node = self.stack.pop()?;
            if self.min <= node.rating && node.rating <= self.max {
                self.bucket = Some(node.bucket.iter());
            }
            let right = if node.rating <= self.max {
                node.right.as_deref()
            } else {
                None
            };
            self.descend_left(right);
        }
    }
}
