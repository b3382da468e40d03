#![deny(missing_docs, warnings, clippy::all, clippy::pedantic)]

//! Priority queue with first-in-first-out ordering among entries of equal priority.
//!
//! # [`PriorityQueue`]
//! Entries are grouped by a non-negative integer priority. Under the default [`Ascending`] order
//! the smallest priority value is served first; entries sharing a priority are served in the
//! order they were enqueued.
//!
//! ```
//! use fifo_pq::PriorityQueue;
//!
//! let mut queue: PriorityQueue<u32> = PriorityQueue::new();
//!
//! assert!(queue.enqueue(5, 1).is_ok());
//! assert!(queue.enqueue(5, 2).is_ok());
//! assert!(queue.enqueue(3, 3).is_ok());
//!
//! assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
//! assert_eq!(queue.dequeue(), Ok(3));
//! ```
//!
//! # [`PriorityOrder`]
//! The order of priorities is a type parameter of [`PriorityQueue`]; [`Descending`] serves
//! larger priority values first, and any other total order can be plugged in by implementing
//! [`PriorityOrder`].

mod error;
pub use error::{Error, Result};

mod order;
pub use order::{Ascending, Descending, PriorityOrder};

pub mod priority_queue;
pub use priority_queue::PriorityQueue;

#[cfg(not(feature = "equivalent"))]
mod equivalent;
pub use equivalent::Equivalent;

/// Priority of an entry.
///
/// Only non-negative values are accepted by [`PriorityQueue::enqueue`].
pub type Priority = i64;
