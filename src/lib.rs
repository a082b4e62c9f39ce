//! This crate provides [`SyncSet`], a thread-safe generic Set
//! Data-Structure based off [`HashMap`] and guarded by a reader/writer
//! lock.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use sync_set::SyncSet;
//!
//! let set = Arc::new(SyncSet::new());
//!
//! let handles: Vec<_> = (0..4)
//! 	.map(|i| {
//! 		let set = Arc::clone(&set);
//! 		thread::spawn(move || set.add([i, i + 10]))
//! 	})
//! 	.collect();
//! for handle in handles {
//! 	handle.join().unwrap();
//! }
//!
//! assert_eq!(set.len(), 8);
//! assert!(set.contains(&13));
//!
//! let small = SyncSet::from([0, 1, 2, 99]);
//!
//! assert_eq!(small.difference(&set), SyncSet::from([99]));
//! assert_eq!(small.is_disjoint(&set), false);
//! ```
//!
//! ## Key Understandings and Philosophies:
//!
//! ### Locking
//!
//! Every [`SyncSet`] owns exactly one [`RwLock`]. Methods that only read
//! the set (like [`SyncSet::contains()`] and [`SyncSet::members()`]) take
//! the shared side of the lock, so any number of readers run in
//! parallel. Methods that change the set (like [`SyncSet::add()`] and
//! [`SyncSet::clear()`]) take the exclusive side.
//!
//! All locking is done through guards, so the lock is released on every
//! exit path, including panics. The lock does not poison, so a panic in
//! one thread never makes the set unusable for the others.
//!
//! ### Operations on two sets
//!
//! [`SyncSet::union()`], [`SyncSet::intersection()`],
//! [`SyncSet::difference()`] and friends read-lock both sets and build a
//! brand new, unshared result. Neither operand is ever changed and no
//! method ever holds an exclusive lock on more than one set.
//!
//! The two read locks are taken in a fixed global order (by address), so
//! `a.intersection(&b)` and `b.intersection(&a)` may run concurrently
//! with writers queued on both sets without deadlocking. Passing the same
//! set as both operands, such as `a.union(&a)`, takes the lock once.
//!
//! ### Ordering
//!
//! A [`SyncSet`] is unordered. [`SyncSet::members()`] and the
//! [`Display`](core::fmt::Display) rendering (`[1 2 3]`) list members in
//! whatever order the backing [`HashMap`] holds them, so sort them
//! yourself if you need a stable order.
//!
//! [`HashMap`]: std::collections::HashMap
//! [`RwLock`]: parking_lot::RwLock

#![allow(clippy::tabs_in_doc_comments)]
#![allow(clippy::needless_return)]

pub(crate) mod utils;

pub mod set;

pub use crate::set::SyncSet;
