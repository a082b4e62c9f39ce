//! A module containing [`SyncSet`].
//!
//! [`SyncSet`] is a wrapper around a [`HashMap`] whose values are all
//! `()`, guarded by a single [`RwLock`]. Every method takes `&self`, so a
//! set can be shared between threads behind a plain reference or an
//! [`Arc`](std::sync::Arc).

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::{IntoIter as HashMapIntoIter, RandomState};
use std::collections::HashMap;

use itertools::Itertools;
use log::trace;
use parking_lot::RwLock;

use crate::utils::read_both;

/// An unordered, thread-safe set of unique values based on [`HashMap`].
///
/// `E` is the generic type parameter for the members of the set.
///
/// `S` is the generic type parameter for the hasher, which defaults to
/// [`RandomState`] just like it does for [`HashMap`].
///
/// Reads (such as [`SyncSet::contains()`]) take a shared lock and so
/// never block each other, writes (such as [`SyncSet::add()`]) take an
/// exclusive lock. Operations involving two sets (such as
/// [`SyncSet::union()`]) only ever take shared locks on both and return a
/// brand new set.
///
/// # Examples
/// ```
/// use sync_set::SyncSet;
///
/// let set = SyncSet::from([1, 2, 3]);
///
/// set.add([3, 4]);
/// set.delete(&[1]);
///
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(&4));
/// assert!(!set.contains(&1));
///
/// let evens = SyncSet::from([2, 4, 6]);
/// let mut both = set.intersection(&evens).members();
/// both.sort();
///
/// assert_eq!(both, [2, 4]);
/// ```
pub struct SyncSet<E, S = RandomState> {
	inner: RwLock<HashMap<E, (), S>>,
}

impl<E> SyncSet<E, RandomState> {
	/// Makes a new, empty `SyncSet`.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let set: SyncSet<u8> = SyncSet::new();
	///
	/// assert!(set.is_empty());
	/// ```
	pub fn new() -> Self {
		SyncSet::with_hasher(RandomState::new())
	}

	/// Makes a new, empty `SyncSet` with space for at least `capacity`
	/// members before reallocating.
	pub fn with_capacity(capacity: usize) -> Self {
		SyncSet::with_capacity_and_hasher(capacity, RandomState::new())
	}
}

impl<E, S> SyncSet<E, S> {
	/// Makes a new, empty `SyncSet` which will use the given hasher.
	///
	/// # Examples
	/// ```
	/// use std::collections::hash_map::RandomState;
	///
	/// use sync_set::SyncSet;
	///
	/// let set = SyncSet::with_hasher(RandomState::new());
	/// set.add(["a"]);
	///
	/// assert!(set.contains("a"));
	/// ```
	pub fn with_hasher(hasher: S) -> Self {
		SyncSet {
			inner: RwLock::new(HashMap::with_hasher(hasher)),
		}
	}

	/// Makes a new, empty `SyncSet` with space for at least `capacity`
	/// members which will use the given hasher.
	pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
		SyncSet {
			inner: RwLock::new(HashMap::with_capacity_and_hasher(
				capacity, hasher,
			)),
		}
	}

	/// Returns the number of members in the set.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let set = SyncSet::from([1, 2, 2, 3]);
	///
	/// assert_eq!(set.len(), 3);
	/// ```
	pub fn len(&self) -> usize {
		self.inner.read().len()
	}

	/// Returns `true` if the set contains no members, and `false` if it
	/// does.
	pub fn is_empty(&self) -> bool {
		self.inner.read().is_empty()
	}

	/// Removes every member from the set.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let set = SyncSet::from([1, 2]);
	/// set.clear();
	///
	/// assert_eq!(set.len(), 0);
	/// assert!(set.is_empty());
	/// ```
	pub fn clear(&self) {
		let mut inner = self.inner.write();
		trace!("clearing {} members", inner.len());
		inner.clear();
	}

	/// Consumes the set and returns its members in an unspecified order.
	///
	/// No lock is taken since the set is owned.
	pub fn into_members(self) -> Vec<E> {
		self.into_iter().collect()
	}
}

impl<E, S> SyncSet<E, S>
where
	E: Eq + Hash,
	S: BuildHasher,
{
	/// Adds every given value to the set.
	///
	/// Values already present are left as they are, so adding the same
	/// value twice is the same as adding it once.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let set = SyncSet::new();
	///
	/// set.add([1, 2]);
	/// set.add([2, 3]);
	///
	/// assert_eq!(set.len(), 3);
	/// ```
	pub fn add(&self, values: impl IntoIterator<Item = E>) {
		let mut inner = self.inner.write();
		for value in values {
			inner.insert(value, ());
		}
	}

	/// Adds a single value to the set.
	///
	/// Returns `true` if the value was not already a member.
	pub fn insert(&self, value: E) -> bool {
		self.inner.write().insert(value, ()).is_none()
	}

	/// Removes every given value from the set.
	///
	/// Values which are not members are ignored.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let set = SyncSet::from([1, 2, 3]);
	///
	/// set.delete(&[3, 4]);
	///
	/// assert_eq!(set.len(), 2);
	/// assert!(!set.contains(&3));
	/// ```
	pub fn delete<'a, Q>(&self, values: impl IntoIterator<Item = &'a Q>)
	where
		E: Borrow<Q>,
		Q: Eq + Hash + ?Sized + 'a,
	{
		let mut inner = self.inner.write();
		for value in values {
			inner.remove(value);
		}
	}

	/// Removes a single value from the set.
	///
	/// Returns `true` if the value was a member.
	pub fn remove<Q>(&self, value: &Q) -> bool
	where
		E: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.inner.write().remove(value).is_some()
	}

	/// Retains only the members for which `keep` returns `true`.
	///
	/// The exclusive lock is held for the whole pass, so `keep` must not
	/// call back into this set.
	pub fn retain(&self, mut keep: impl FnMut(&E) -> bool) {
		self.inner.write().retain(|member, _| keep(member));
	}

	/// Returns `true` if the given value is a member of the set, and
	/// `false` if not.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let set = SyncSet::from([String::from("a")]);
	///
	/// assert!(set.contains("a"));
	/// assert!(!set.contains("b"));
	/// ```
	pub fn contains<Q>(&self, value: &Q) -> bool
	where
		E: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.inner.read().contains_key(value)
	}

	/// Returns `true` if the set has no members in common with `other`.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// assert!(SyncSet::from([1, 2]).is_disjoint(&SyncSet::from([3, 4])));
	/// assert!(!SyncSet::from([1, 2]).is_disjoint(&SyncSet::from([2, 3])));
	/// ```
	pub fn is_disjoint(&self, other: &SyncSet<E, S>) -> bool {
		read_both(&self.inner, &other.inner, |a, b| {
			let (small, large) = smallest_first(a, b);
			!small.keys().any(|member| large.contains_key(member))
		})
	}

	/// Returns `true` if every member of the set is also a member of
	/// `other`.
	pub fn is_subset(&self, other: &SyncSet<E, S>) -> bool {
		read_both(&self.inner, &other.inner, |a, b| {
			a.len() <= b.len()
				&& a.keys().all(|member| b.contains_key(member))
		})
	}

	/// Returns `true` if every member of `other` is also a member of the
	/// set.
	pub fn is_superset(&self, other: &SyncSet<E, S>) -> bool {
		other.is_subset(self)
	}
}

impl<E, S> SyncSet<E, S>
where
	E: Clone,
{
	/// Returns a snapshot of the members of the set in an unspecified
	/// order.
	///
	/// Later changes to the set are not reflected in the returned
	/// [`Vec`].
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let set = SyncSet::from([3, 1, 2]);
	///
	/// let mut members = set.members();
	/// members.sort();
	///
	/// assert_eq!(members, [1, 2, 3]);
	/// ```
	pub fn members(&self) -> Vec<E> {
		self.inner.read().keys().cloned().collect()
	}
}

impl<E, S> SyncSet<E, S>
where
	E: Eq + Hash + Clone,
	S: BuildHasher + Clone,
{
	/// Returns a new set containing every value that is a member of
	/// either the set or `other`.
	///
	/// Like every operation returning a new set, the result uses a clone
	/// of this set's hasher.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let union = SyncSet::from([1, 2]).union(&SyncSet::from([2, 3]));
	///
	/// assert_eq!(union, SyncSet::from([1, 2, 3]));
	/// ```
	pub fn union(&self, other: &SyncSet<E, S>) -> SyncSet<E, S> {
		read_both(&self.inner, &other.inner, |a, b| {
			let result = collect_members(
				a.keys().chain(b.keys()),
				a.hasher().clone(),
			);
			trace!(
				"union of {} and {} members has {} members",
				a.len(),
				b.len(),
				result.len()
			);
			SyncSet::from_map(result)
		})
	}

	/// Returns a new set containing every value that is a member of both
	/// the set and `other`.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let intersection =
	/// 	SyncSet::from([1, 2]).intersection(&SyncSet::from([2, 3]));
	///
	/// assert_eq!(intersection, SyncSet::from([2]));
	/// ```
	pub fn intersection(&self, other: &SyncSet<E, S>) -> SyncSet<E, S> {
		read_both(&self.inner, &other.inner, |a, b| {
			let (small, large) = smallest_first(a, b);
			let result = collect_members(
				small.keys().filter(|member| large.contains_key(*member)),
				a.hasher().clone(),
			);
			trace!(
				"intersection of {} and {} members has {} members",
				a.len(),
				b.len(),
				result.len()
			);
			SyncSet::from_map(result)
		})
	}

	/// Returns a new set containing every value that is a member of the
	/// set but not of `other`.
	///
	/// # Examples
	/// ```
	/// use sync_set::SyncSet;
	///
	/// let difference =
	/// 	SyncSet::from([1, 2, 3, 4]).difference(&SyncSet::from([3, 4]));
	///
	/// assert_eq!(difference, SyncSet::from([1, 2]));
	/// ```
	pub fn difference(&self, other: &SyncSet<E, S>) -> SyncSet<E, S> {
		read_both(&self.inner, &other.inner, |a, b| {
			let result = collect_members(
				a.keys().filter(|member| !b.contains_key(*member)),
				a.hasher().clone(),
			);
			trace!(
				"difference of {} and {} members has {} members",
				a.len(),
				b.len(),
				result.len()
			);
			SyncSet::from_map(result)
		})
	}

	/// Returns a new set containing every value that is a member of
	/// exactly one of the set and `other`.
	pub fn symmetric_difference(
		&self,
		other: &SyncSet<E, S>,
	) -> SyncSet<E, S> {
		read_both(&self.inner, &other.inner, |a, b| {
			let result: HashMap<E, (), S> = collect_members(
				a.keys()
					.filter(|member| !b.contains_key(*member))
					.chain(b.keys().filter(|member| !a.contains_key(*member))),
				a.hasher().clone(),
			);
			trace!(
				"symmetric difference of {} and {} members has {} members",
				a.len(),
				b.len(),
				result.len()
			);
			SyncSet::from_map(result)
		})
	}

	fn from_map(map: HashMap<E, (), S>) -> Self {
		SyncSet {
			inner: RwLock::new(map),
		}
	}
}

// Helper Functions ==========================

fn first<A, B>((a, _): (A, B)) -> A {
	a
}

fn smallest_first<'a, E, S>(
	a: &'a HashMap<E, (), S>,
	b: &'a HashMap<E, (), S>,
) -> (&'a HashMap<E, (), S>, &'a HashMap<E, (), S>) {
	if a.len() <= b.len() {
		(a, b)
	} else {
		(b, a)
	}
}

fn collect_members<'a, E, S>(
	members: impl Iterator<Item = &'a E>,
	hasher: S,
) -> HashMap<E, (), S>
where
	E: Eq + Hash + Clone + 'a,
	S: BuildHasher,
{
	let mut map = HashMap::with_hasher(hasher);
	map.extend(members.map(|member| (member.clone(), ())));
	map
}

// Trait Impls ==========================

impl<E, S> IntoIterator for SyncSet<E, S> {
	type Item = E;
	type IntoIter = IntoIter<E>;
	fn into_iter(self) -> Self::IntoIter {
		return IntoIter {
			inner: self.inner.into_inner().into_iter(),
		};
	}
}
/// An owning iterator over the members of a [`SyncSet`].
///
/// This `struct` is created by the [`into_iter`] method on
/// [`SyncSet`] (provided by the [`IntoIterator`] trait). See
/// its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
pub struct IntoIter<E> {
	inner: HashMapIntoIter<E, ()>,
}
impl<E> Iterator for IntoIter<E> {
	type Item = E;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(first)
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}
impl<E> ExactSizeIterator for IntoIter<E> {}

impl<E, S> FromIterator<E> for SyncSet<E, S>
where
	E: Eq + Hash,
	S: BuildHasher + Default,
{
	fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
		SyncSet {
			inner: RwLock::new(
				iter.into_iter().map(|value| (value, ())).collect(),
			),
		}
	}
}

impl<E, const N: usize> From<[E; N]> for SyncSet<E, RandomState>
where
	E: Eq + Hash,
{
	fn from(values: [E; N]) -> Self {
		SyncSet::from_iter(values)
	}
}

impl<E, S> Extend<E> for SyncSet<E, S>
where
	E: Eq + Hash,
	S: BuildHasher,
{
	fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
		self.inner
			.get_mut()
			.extend(iter.into_iter().map(|value| (value, ())));
	}
}

impl<E, S> Default for SyncSet<E, S>
where
	S: Default,
{
	fn default() -> Self {
		SyncSet::with_hasher(S::default())
	}
}

impl<E, S> Clone for SyncSet<E, S>
where
	E: Clone,
	S: Clone,
{
	fn clone(&self) -> Self {
		SyncSet {
			inner: RwLock::new(self.inner.read().clone()),
		}
	}
}

impl<E, S> PartialEq for SyncSet<E, S>
where
	E: Eq + Hash,
	S: BuildHasher,
{
	fn eq(&self, other: &Self) -> bool {
		read_both(&self.inner, &other.inner, |a, b| a == b)
	}
}
impl<E, S> Eq for SyncSet<E, S>
where
	E: Eq + Hash,
	S: BuildHasher,
{
}

impl<E, S> fmt::Debug for SyncSet<E, S>
where
	E: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.inner.read().keys()).finish()
	}
}

/// Renders the members space separated inside square brackets, such as
/// `[1 2 3]`, in an unspecified order.
impl<E, S> fmt::Display for SyncSet<E, S>
where
	E: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}]", self.inner.read().keys().format(" "))
	}
}
