use core::ptr;

use parking_lot::RwLock;

/// Runs `f` with shared access to the contents of both `a` and `b`.
///
/// The two read locks are always acquired in ascending address order,
/// regardless of argument order, so that any number of threads calling
/// this concurrently on overlapping pairs cannot form a wait cycle with
/// queued writers. If `a` and `b` are the same lock it is only acquired
/// once.
pub(crate) fn read_both<T, R>(
	a: &RwLock<T>,
	b: &RwLock<T>,
	f: impl FnOnce(&T, &T) -> R,
) -> R {
	if ptr::eq(a, b) {
		let guard = a.read();
		return f(&guard, &guard);
	}

	if ptr::from_ref(a) < ptr::from_ref(b) {
		let a_guard = a.read();
		let b_guard = b.read();
		return f(&a_guard, &b_guard);
	} else {
		let b_guard = b.read();
		let a_guard = a.read();
		return f(&a_guard, &b_guard);
	}
}

#[cfg(test)]
mod tests {
	use std::panic::{self, AssertUnwindSafe};

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn read_both_keeps_argument_order() {
		let low = RwLock::new(1);
		let high = RwLock::new(2);

		assert_eq!(read_both(&low, &high, |a, b| (*a, *b)), (1, 2));
		assert_eq!(read_both(&high, &low, |a, b| (*a, *b)), (2, 1));
	}

	#[test]
	fn read_both_same_lock() {
		let lock = RwLock::new(7);

		assert_eq!(read_both(&lock, &lock, |a, b| a + b), 14);
		//the lock must be free again afterwards
		*lock.write() += 1;
		assert_eq!(*lock.read(), 8);
	}

	#[test]
	fn read_both_releases_on_panic() {
		let a = RwLock::new(0);
		let b = RwLock::new(0);

		let result = panic::catch_unwind(AssertUnwindSafe(|| {
			read_both(&a, &b, |_, _| panic!("boom"));
		}));

		assert!(result.is_err());
		assert!(a.try_write().is_some());
		assert!(b.try_write().is_some());
	}
}
