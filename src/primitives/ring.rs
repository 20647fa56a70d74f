#![forbid(unsafe_code)]

//! Fixed-capacity circular FIFO queue.

/// Bounded FIFO over a preallocated ring of slots. The queue never grows:
/// [`RingQueue::push`] hands the item back once `capacity` entries are
/// outstanding.
#[derive(Debug)]
pub struct RingQueue<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingQueue<T> {
    /// Allocates a queue holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of outstanding entries.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of outstanding entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` when a further push would be rejected.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Enqueues `item` at the back, or returns it when the ring is full.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Dequeues from the front.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        item
    }
}
