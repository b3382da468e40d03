//! Priority orders.
//!
//! A [`PriorityOrder`] decides which priority is served first. It is a type parameter of
//! [`PriorityQueue`](super::PriorityQueue), so the order costs nothing at runtime and two queues
//! with different orders are different types.

use super::Priority;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// A total order over priorities.
///
/// The priority that compares [`Ordering::Less`] is served first. Distinct priorities that the
/// order reports as [`Ordering::Equal`] are ranked numerically ascending.
///
/// # Examples
///
/// ```
/// use fifo_pq::{Priority, PriorityOrder, PriorityQueue};
/// use std::cmp::Ordering;
///
/// /// Even priorities first, then odd ones.
/// struct EvenFirst;
///
/// impl PriorityOrder for EvenFirst {
///     fn compare(lhs: Priority, rhs: Priority) -> Ordering {
///         (lhs % 2).cmp(&(rhs % 2))
///     }
/// }
///
/// let mut queue = PriorityQueue::with_order(EvenFirst);
/// assert!(queue.enqueue(1, 'a').is_ok());
/// assert!(queue.enqueue(4, 'b').is_ok());
/// assert!(queue.enqueue(2, 'c').is_ok());
///
/// assert_eq!(queue.into_iter().collect::<String>(), "cba");
/// ```
pub trait PriorityOrder {
    /// Compares two priorities.
    fn compare(lhs: Priority, rhs: Priority) -> Ordering;
}

/// Smaller priority values are served first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Ascending;

impl PriorityOrder for Ascending {
    #[inline]
    fn compare(lhs: Priority, rhs: Priority) -> Ordering {
        lhs.cmp(&rhs)
    }
}

/// Larger priority values are served first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Descending;

impl PriorityOrder for Descending {
    #[inline]
    fn compare(lhs: Priority, rhs: Priority) -> Ordering {
        rhs.cmp(&lhs)
    }
}

/// [`Key`] is a bucket key sorted according to `O`.
pub(crate) struct Key<O> {
    priority: Priority,
    order: PhantomData<fn() -> O>,
}

impl<O> Key<O> {
    #[inline]
    pub(crate) const fn new(priority: Priority) -> Self {
        Self {
            priority,
            order: PhantomData,
        }
    }

    #[inline]
    pub(crate) const fn priority(&self) -> Priority {
        self.priority
    }
}

impl<O> Clone for Key<O> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for Key<O> {}

impl<O> Debug for Key<O> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.priority.fmt(f)
    }
}

impl<O> PartialEq for Key<O> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<O> Eq for Key<O> {}

impl<O: PriorityOrder> PartialOrd for Key<O> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<O: PriorityOrder> Ord for Key<O> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Equality must coincide with `Eq`, therefore ties fall back to the numeric order.
        O::compare(self.priority, other.priority).then(self.priority.cmp(&other.priority))
    }
}
