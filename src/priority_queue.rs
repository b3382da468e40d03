//! [`PriorityQueue`] is a priority queue that serves entries of equal priority in
//! first-in-first-out order.

#![allow(clippy::module_name_repetitions)]

use super::error::{Error, Result};
use super::order::{Ascending, Key, PriorityOrder};
use super::{Equivalent, Priority};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::vec_deque::{self, VecDeque};
use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::mem::replace;
use tracing::{debug, trace};

/// Priority queue with first-in-first-out ordering among entries of equal priority.
///
/// Entries are grouped into buckets, one per distinct priority. The bucket of the highest
/// priority is kept apart from the others so that [`peek`](Self::peek) and
/// [`dequeue`](Self::dequeue) never search the ordered map.
///
/// ## The key properties of [`PriorityQueue`]
///
/// * Entries with a smaller priority value are served first under the default [`Ascending`]
///   order; a different [`PriorityOrder`] can be supplied through [`PriorityQueue::with_order`].
/// * Entries with the same priority are served in insertion order.
/// * Priorities are non-negative.
/// * [`peek`](Self::peek) is `O(1)`; [`dequeue`](Self::dequeue) is `O(1)` unless it empties a
///   bucket, and [`enqueue`](Self::enqueue) is `O(log P)` where `P` is the number of distinct
///   priorities.
pub struct PriorityQueue<T, O = Ascending> {
    /// `head` is the bucket of the highest priority, and `None` if the queue is empty.
    head: Option<(Key<O>, VecDeque<T>)>,

    /// `buckets` holds the remaining non-empty buckets, all of which rank below `head`.
    buckets: BTreeMap<Key<O>, VecDeque<T>>,
}

/// An iterator over the entries of a [`PriorityQueue`].
///
/// [`Iter`] reads entries in the order they would be dequeued.
pub struct Iter<'q, T, O> {
    current: Option<vec_deque::Iter<'q, T>>,
    rest: btree_map::Values<'q, Key<O>, VecDeque<T>>,
    remaining: usize,
}

/// An owning iterator over the entries of a [`PriorityQueue`].
pub struct IntoIter<T, O> {
    current: Option<vec_deque::IntoIter<T>>,
    rest: btree_map::IntoValues<Key<O>, VecDeque<T>>,
}

impl<T> PriorityQueue<T, Ascending> {
    /// Creates an empty [`PriorityQueue`] serving smaller priority values first.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let queue: PriorityQueue<u64> = PriorityQueue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, O: PriorityOrder> PriorityQueue<T, O> {
    /// Creates an empty [`PriorityQueue`] with the given [`PriorityOrder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::{Descending, PriorityQueue};
    ///
    /// let mut queue = PriorityQueue::with_order(Descending);
    ///
    /// assert!(queue.enqueue(1, "low").is_ok());
    /// assert!(queue.enqueue(9, "high").is_ok());
    /// assert_eq!(queue.dequeue(), Ok("high"));
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_order(_order: O) -> Self {
        Self {
            head: None,
            buckets: BTreeMap::new(),
        }
    }

    /// Appends an entry to the bucket of the given priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativePriority`] if `priority` is negative; the queue is left unchanged
    /// and `item` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::{Error, PriorityQueue};
    ///
    /// let mut queue: PriorityQueue<&str> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(2, "a").is_ok());
    /// assert!(queue.enqueue(1, "b").is_ok());
    /// assert_eq!(queue.enqueue(-1, "c"), Err(Error::NegativePriority(-1)));
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn enqueue(&mut self, priority: Priority, item: T) -> Result<()> {
        if priority < 0 {
            debug!(priority, "rejected negative priority");
            return Err(Error::NegativePriority(priority));
        }

        let key = Key::new(priority);
        match &mut self.head {
            Some((head_key, head_entries)) => {
                if key == *head_key {
                    head_entries.push_back(item);
                } else if key > *head_key {
                    match self.buckets.entry(key) {
                        btree_map::Entry::Occupied(mut entry) => entry.get_mut().push_back(item),
                        btree_map::Entry::Vacant(entry) => {
                            trace!(priority, "bucket created");
                            entry.insert(VecDeque::from([item]));
                        }
                    }
                } else {
                    // The new bucket takes over the head; the former head joins the others.
                    let demoted_entries = replace(head_entries, VecDeque::from([item]));
                    let demoted_key = replace(head_key, key);
                    trace!(
                        priority,
                        demoted = demoted_key.priority(),
                        "bucket created at the head"
                    );
                    self.buckets.insert(demoted_key, demoted_entries);
                }
            }
            None => {
                trace!(priority, "bucket created at the head");
                self.head = Some((key, VecDeque::from([item])));
            }
        }
        Ok(())
    }

    /// Removes the oldest entry of the highest priority and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::{Error, PriorityQueue};
    ///
    /// let mut queue: PriorityQueue<&str> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(2, "a").is_ok());
    /// assert!(queue.enqueue(1, "b").is_ok());
    /// assert!(queue.enqueue(2, "c").is_ok());
    ///
    /// assert_eq!(queue.dequeue(), Ok("b"));
    /// assert_eq!(queue.dequeue(), Ok("a"));
    /// assert_eq!(queue.dequeue(), Ok("c"));
    /// assert_eq!(queue.dequeue(), Err(Error::Empty));
    /// ```
    #[inline]
    pub fn dequeue(&mut self) -> Result<T> {
        self.dequeue_with_priority().map(|(_, item)| item)
    }

    /// Removes the oldest entry of the highest priority and returns it along with its priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<char> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(3, 'x').is_ok());
    /// assert_eq!(queue.dequeue_with_priority(), Ok((3, 'x')));
    /// ```
    pub fn dequeue_with_priority(&mut self) -> Result<(Priority, T)> {
        let Some((head_key, head_entries)) = self.head.as_mut() else {
            return Err(Error::Empty);
        };
        let priority = head_key.priority();
        let item = head_entries.pop_front().ok_or(Error::Empty)?;
        if head_entries.is_empty() {
            self.head = self.buckets.pop_first();
            trace!(
                priority,
                promoted = self.head.as_ref().map(|(key, _)| key.priority()),
                "bucket retired"
            );
        }
        Ok((priority, item))
    }

    /// Returns a reference to the oldest entry of the highest priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::{Error, PriorityQueue};
    ///
    /// let mut queue: PriorityQueue<u32> = PriorityQueue::new();
    /// assert_eq!(queue.peek(), Err(Error::Empty));
    ///
    /// assert!(queue.enqueue(4, 37).is_ok());
    /// assert!(queue.enqueue(4, 3).is_ok());
    ///
    /// assert_eq!(queue.peek(), Ok(&37));
    /// assert_eq!(queue.len(), 2);
    /// ```
    #[inline]
    pub fn peek(&self) -> Result<&T> {
        self.peek_with_priority().map(|(_, item)| item)
    }

    /// Returns a reference to the oldest entry of the highest priority along with its priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue is empty.
    #[inline]
    pub fn peek_with_priority(&self) -> Result<(Priority, &T)> {
        self.head
            .as_ref()
            .and_then(|(key, entries)| entries.front().map(|item| (key.priority(), item)))
            .ok_or(Error::Empty)
    }

    /// Returns a mutable reference to the oldest entry of the highest priority.
    ///
    /// The priority of the entry cannot be changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u32> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(0, 1).is_ok());
    /// if let Ok(item) = queue.peek_mut() {
    ///     *item += 1;
    /// }
    /// assert_eq!(queue.dequeue(), Ok(2));
    /// ```
    #[inline]
    pub fn peek_mut(&mut self) -> Result<&mut T> {
        self.head
            .as_mut()
            .and_then(|(_, entries)| entries.front_mut())
            .ok_or(Error::Empty)
    }

    /// Returns the highest priority currently present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::{Error, PriorityQueue};
    ///
    /// let mut queue: PriorityQueue<&str> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(0, "x").is_ok());
    /// assert_eq!(queue.highest_priority(), Ok(0));
    ///
    /// assert!(queue.dequeue().is_ok());
    /// assert_eq!(queue.highest_priority(), Err(Error::Empty));
    /// ```
    #[inline]
    pub fn highest_priority(&self) -> Result<Priority> {
        self.head
            .as_ref()
            .map(|(key, _)| key.priority())
            .ok_or(Error::Empty)
    }

    /// Returns `true` if a bucket exists for the given priority.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u8> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(5, 1).is_ok());
    /// assert!(queue.contains_priority(5));
    /// assert!(!queue.contains_priority(4));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains_priority(&self, priority: Priority) -> bool {
        let key = Key::new(priority);
        self.head.as_ref().is_some_and(|(head_key, _)| *head_key == key)
            || self.buckets.contains_key(&key)
    }

    /// Returns `true` if an entry equivalent to `item` is in the [`PriorityQueue`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<String> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(1, String::from("hello")).is_ok());
    /// assert!(queue.contains_item("hello"));
    /// assert!(!queue.contains_item("world"));
    /// ```
    #[inline]
    pub fn contains_item<Q>(&self, item: &Q) -> bool
    where
        Q: Equivalent<T> + ?Sized,
    {
        self.iter().any(|entry| item.equivalent(entry))
    }

    /// Returns the number of entries queued at the given priority.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u8> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(5, 1).is_ok());
    /// assert!(queue.enqueue(5, 2).is_ok());
    /// assert_eq!(queue.len_of(5), 2);
    /// assert_eq!(queue.len_of(6), 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn len_of(&self, priority: Priority) -> usize {
        let key = Key::new(priority);
        match &self.head {
            Some((head_key, head_entries)) if *head_key == key => head_entries.len(),
            _ => self.buckets.get(&key).map_or(0, VecDeque::len),
        }
    }

    /// Returns the number of entries.
    ///
    /// It sums up the lengths of all the buckets, so it runs in time proportional to the number
    /// of distinct priorities.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u8> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(5, 1).is_ok());
    /// assert!(queue.enqueue(3, 2).is_ok());
    /// assert_eq!(queue.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bucket_iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Returns `true` if the [`PriorityQueue`] is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Removes all the entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u8> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(5, 1).is_ok());
    /// queue.clear();
    /// assert!(queue.is_empty());
    /// assert!(queue.peek().is_err());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        if self.head.take().is_some() {
            trace!(buckets = self.buckets.len() + 1, "cleared");
        }
        self.buckets.clear();
    }

    /// Returns an iterator over the distinct priorities in the order they are served.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u8> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(7, 1).is_ok());
    /// assert!(queue.enqueue(2, 2).is_ok());
    /// assert!(queue.enqueue(7, 3).is_ok());
    /// assert_eq!(queue.priorities().collect::<Vec<_>>(), vec![2, 7]);
    /// ```
    #[inline]
    pub fn priorities(&self) -> impl Iterator<Item = Priority> + '_ {
        self.bucket_iter().map(|(priority, _)| priority)
    }

    /// Returns an [`Iter`].
    ///
    /// Entries are returned in the order they would be dequeued.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_pq::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<u8> = PriorityQueue::new();
    ///
    /// assert!(queue.enqueue(5, 1).is_ok());
    /// assert!(queue.enqueue(5, 2).is_ok());
    /// assert!(queue.enqueue(3, 3).is_ok());
    /// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, O> {
        Iter {
            current: self.head.as_ref().map(|(_, entries)| entries.iter()),
            rest: self.buckets.values(),
            remaining: self.len(),
        }
    }

    /// Iterates over the buckets in the order they are served.
    fn bucket_iter(&self) -> impl Iterator<Item = (Priority, &VecDeque<T>)> {
        self.head
            .iter()
            .map(|(key, entries)| (key, entries))
            .chain(self.buckets.iter())
            .map(|(key, entries)| (key.priority(), entries))
    }
}

#[cfg(test)]
impl<T, O: PriorityOrder> PriorityQueue<T, O> {
    /// Asserts that no bucket is empty and that `head` ranks above every other bucket.
    pub(crate) fn assert_structure(&self) {
        match &self.head {
            Some((head_key, head_entries)) => {
                assert!(!head_entries.is_empty());
                for (key, entries) in &self.buckets {
                    assert!(!entries.is_empty());
                    assert!(key > head_key);
                }
            }
            None => assert!(self.buckets.is_empty()),
        }
    }
}

impl<T: Clone, O> Clone for PriorityQueue<T, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            buckets: self.buckets.clone(),
        }
    }
}

impl<T: Debug, O: PriorityOrder> Debug for PriorityQueue<T, O> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.bucket_iter()).finish()
    }
}

impl<T, O> Default for PriorityQueue<T, O> {
    #[inline]
    fn default() -> Self {
        Self {
            head: None,
            buckets: BTreeMap::new(),
        }
    }
}

impl<'q, T, O: PriorityOrder> IntoIterator for &'q PriorityQueue<T, O> {
    type Item = &'q T;
    type IntoIter = Iter<'q, T, O>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O> IntoIterator for PriorityQueue<T, O> {
    type Item = T;
    type IntoIter = IntoIter<T, O>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            current: self.head.map(|(_, entries)| entries.into_iter()),
            rest: self.buckets.into_values(),
        }
    }
}

impl<T, O> Clone for Iter<'_, T, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            rest: self.rest.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: Debug, O> Debug for Iter<'_, T, O> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'q, T, O> Iterator for Iter<'q, T, O> {
    type Item = &'q T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = Some(self.rest.next()?.iter());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, O> ExactSizeIterator for Iter<'_, T, O> {}

impl<T, O> FusedIterator for Iter<'_, T, O> {}

impl<T, O> Iterator for IntoIter<T, O> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            self.current = Some(self.rest.next()?.into_iter());
        }
    }
}

impl<T, O> FusedIterator for IntoIter<T, O> {}
