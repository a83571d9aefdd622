//! # Order Queue
//!
//! A generic FIFO queue built from singly-linked cells behind a permanent
//! sentinel.
//!
//! ## Cell Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Queue<T> Layout                                 │
//! │                                                                         │
//! │   front                                              tail               │
//! │     │                                                  │                │
//! │     ▼                                                  ▼                │
//! │  ┌────────┐    ┌────────┐    ┌────────┐           ┌────────┐           │
//! │  │sentinel│───►│ item 1 │───►│ item 2 │──► ... ──►│ item n │──► null   │
//! │  │ (none) │    │(oldest)│    │        │           │(newest)│           │
//! │  └────────┘    └────────┘    └────────┘           └────────┘           │
//! │                                                                         │
//! │  Empty queue: front and tail are the SAME cell (the sentinel).         │
//! │  enqueue links after tail; dequeue unlinks front.next.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bounded Operations
//! [`Queue::average_of`] and [`Queue::filter_prefix`] read the first
//! `count` elements without touching the chain. Asking for more elements
//! than the queue holds is a [`QueueError::InsufficientElements`].
//!
//! ## Usage
//! ```rust
//! use trinket_core::queue::Queue;
//!
//! let mut totals = Queue::new();
//! totals.enqueue(10.0);
//! totals.enqueue(20.0);
//! totals.enqueue(30.0);
//!
//! assert_eq!(totals.average_of(|t| Some(*t), 3).unwrap(), 20.0);
//!
//! let mut big = totals.filter_prefix(|t| *t > 15.0, 3).unwrap();
//! assert_eq!(big.dequeue().unwrap(), &20.0);
//! assert_eq!(big.dequeue().unwrap(), &30.0);
//!
//! // The source queue is untouched
//! assert_eq!(totals.size(), 3);
//! ```
//!
//! ## Thread Safety
//! None. The queue assumes a single owner; share it behind a lock if
//! several threads need it.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{QueueError, QueueResult};

// =============================================================================
// Cell
// =============================================================================

/// One link of the chain. Only the sentinel has no item.
struct Cell<T> {
    item: Option<T>,
    next: Option<NonNull<Cell<T>>>,
}

impl<T> Cell<T> {
    /// Allocates a detached cell. Ownership passes to the queue's chain.
    fn allocate(item: Option<T>) -> NonNull<Cell<T>> {
        NonNull::from(Box::leak(Box::new(Cell { item, next: None })))
    }
}

// =============================================================================
// Queue
// =============================================================================

/// A singly-linked FIFO queue with a sentinel front cell.
///
/// ## Invariants
/// - `front` is allocated once in [`Queue::new`] and never replaced
/// - the queue is empty iff `front == tail`
/// - the chain after `front` holds the elements oldest first
/// - every cell is owned by exactly one queue
pub struct Queue<T> {
    front: NonNull<Cell<T>>,
    tail: NonNull<Cell<T>>,
    marker: PhantomData<Box<Cell<T>>>,
}

// SAFETY: the queue exclusively owns every cell of its chain, exactly like a
// chain of `Box<Cell<T>>` would, so it is as thread-safe as `T` itself.
unsafe impl<T: Send> Send for Queue<T> {}
unsafe impl<T: Sync> Sync for Queue<T> {}

impl<T> Queue<T> {
    /// Creates an empty queue holding only its sentinel.
    pub fn new() -> Self {
        let sentinel = Cell::allocate(None);
        Queue {
            front: sentinel,
            tail: sentinel,
            marker: PhantomData,
        }
    }

    /// Returns `true` when front and tail are the same cell. O(1).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front == self.tail
    }

    /// Appends an item after the current tail. O(1).
    pub fn enqueue(&mut self, item: T) {
        let cell = Cell::allocate(Some(item));

        // SAFETY: `tail` always points at a live cell of this chain (the
        // sentinel when empty) and nobody else holds a reference to it.
        unsafe {
            (*self.tail.as_ptr()).next = Some(cell);
        }
        self.tail = cell;
    }

    /// Removes and returns the oldest item. O(1).
    ///
    /// ## Errors
    /// [`QueueError::Empty`] when there is nothing to dequeue.
    pub fn dequeue(&mut self) -> QueueResult<T> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        // SAFETY: the sentinel lives as long as the queue. A non-empty queue
        // links at least one real cell after it; we unlink that cell and take
        // back the ownership `Cell::allocate` gave away.
        let detached = unsafe {
            let front = &mut *self.front.as_ptr();
            let first = front.next.ok_or(QueueError::Empty)?;
            let detached = Box::from_raw(first.as_ptr());
            front.next = detached.next;

            if first == self.tail {
                self.tail = self.front;
            }
            detached
        };

        detached.item.ok_or(QueueError::Empty)
    }

    /// Returns the oldest item without removing it. O(1).
    ///
    /// ## Errors
    /// [`QueueError::Empty`] when the queue is empty.
    pub fn peek_front(&self) -> QueueResult<&T> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        self.iter().next().ok_or(QueueError::Empty)
    }

    /// Counts the cells of the live chain. O(n).
    ///
    /// There is no cached counter: the answer always comes from the chain.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Iterates the items front to back without consuming them.
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY: the sentinel is live for as long as `self` is borrowed.
        let first = unsafe { self.front.as_ref().next };
        Iter {
            next: first,
            marker: PhantomData,
        }
    }

    /// Averages a numeric projection over the first `count` items.
    ///
    /// - `count == 0` or an empty queue gives `0.0`
    /// - `extractor` runs once per visited item, front to back
    /// - items projecting to `None` add `0` to the sum but still count in
    ///   the denominator, so missing values pull the average down:
    ///
    /// ```rust
    /// use trinket_core::queue::Queue;
    ///
    /// let queue: Queue<Option<f64>> = [Some(30.0), None, Some(30.0)].into_iter().collect();
    /// assert_eq!(queue.average_of(|v| *v, 3).unwrap(), 20.0);
    /// ```
    ///
    /// ## Errors
    /// [`QueueError::InsufficientElements`] when the queue holds fewer than
    /// `count` items.
    pub fn average_of<F>(&self, mut extractor: F, count: usize) -> QueueResult<f64>
    where
        F: FnMut(&T) -> Option<f64>,
    {
        if count == 0 || self.is_empty() {
            return Ok(0.0);
        }

        self.ensure_prefix(count)?;

        let sum: f64 = self
            .iter()
            .take(count)
            .map(|item| extractor(item).unwrap_or(0.0))
            .sum();

        Ok(sum / count as f64)
    }

    /// Builds a new queue from the first `count` items that satisfy
    /// `predicate`, keeping their relative order.
    ///
    /// The result borrows the very same items; nothing is cloned and the
    /// source chain is not modified. `count == 0` gives an empty queue.
    ///
    /// ## Errors
    /// [`QueueError::InsufficientElements`] when the queue holds fewer than
    /// `count` items, an empty queue included.
    ///
    /// Unlike [`Queue::average_of`], an empty queue gets no special case:
    /// `filter_prefix(_, 1)` on it fails with `actual: 0` instead of
    /// returning an empty queue. A filter over a prefix that does not exist
    /// is always reported, whether the queue is empty or just short.
    pub fn filter_prefix<P>(&self, mut predicate: P, count: usize) -> QueueResult<Queue<&T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut filtered = Queue::new();

        if count == 0 {
            return Ok(filtered);
        }

        self.ensure_prefix(count)?;

        for item in self.iter().take(count) {
            if predicate(item) {
                filtered.enqueue(item);
            }
        }

        Ok(filtered)
    }

    /// Fails unless at least `count` items are queued.
    ///
    /// Walks at most `count` cells; when it runs out early it has walked the
    /// whole chain, so the tally is the queue's size.
    fn ensure_prefix(&self, count: usize) -> QueueResult<()> {
        let actual = self.iter().take(count).count();
        if actual < count {
            return Err(QueueError::InsufficientElements {
                requested: count,
                actual,
            });
        }
        Ok(())
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        // Iterative so long chains cannot overflow the stack.
        let mut cursor = Some(self.front);
        while let Some(cell) = cursor {
            // SAFETY: every cell, the sentinel included, came from
            // `Cell::allocate` and is reachable exactly once from `front`.
            let cell = unsafe { Box::from_raw(cell.as_ptr()) };
            cursor = cell.next;
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Queue::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`Queue`], oldest item first.
pub struct Iter<'a, T> {
    next: Option<NonNull<Cell<T>>>,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let cell = self.next?;

        // SAFETY: cells reachable from the sentinel stay alive and unmodified
        // while the queue is shared-borrowed for `'a`.
        let cell = unsafe { &*cell.as_ptr() };
        self.next = cell.next;
        cell.item.as_ref()
    }
}

/// Draining iterator: repeatedly dequeues until the queue is empty.
pub struct IntoIter<T>(Queue<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.dequeue().ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
