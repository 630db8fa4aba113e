//! the user-supplied total order over keys

use core::cmp::Ordering;

/// A strict total order over `K`, externalized so that a tree's shape
/// policy is not hard-wired to [`Ord`].
///
/// A comparator must be consistent for the lifetime of any tree built with
/// it: `compare` is expected to behave like a fixed total order (reflexive,
/// antisymmetric, transitive) for as long as any tree or iterator derived
/// from it is alive. Implementations are expected to be cheap to `Clone`;
/// the engine clones the comparator into every persistent snapshot and
/// transient it produces.
pub trait Comparator<K: ?Sized>: Clone {
	/// Compares two keys, establishing the order the tree is built over.
	fn compare(&self, a: &K, b: &K) -> Ordering;

	/// Whether `a` and `b` occupy the same position in the order.
	///
	/// The default implementation follows from `compare`; override it only
	/// if a cheaper equivalence check is available.
	fn equivalent(&self, a: &K, b: &K) -> bool {
		self.compare(a, b) == Ordering::Equal
	}
}

/// The default comparator: delegates to [`Ord`].
///
/// Zero-sized, so wrapping it costs nothing — every `OrdSet`/`OrdMap`
/// constructed without an explicit comparator uses one of these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrdComparator;

impl<K: Ord + ?Sized> Comparator<K> for OrdComparator {
	fn compare(&self, a: &K, b: &K) -> Ordering {
		a.cmp(b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone)]
	struct Reversed;

	impl Comparator<i32> for Reversed {
		fn compare(&self, a: &i32, b: &i32) -> Ordering {
			b.cmp(a)
		}
	}

	#[test]
	fn ord_comparator_matches_ord() {
		let cmp = OrdComparator;
		assert_eq!(cmp.compare(&1, &2), Ordering::Less);
		assert!(cmp.equivalent(&5, &5));
	}

	#[test]
	fn custom_comparator_can_invert_order() {
		let cmp = Reversed;
		assert_eq!(cmp.compare(&1, &2), Ordering::Greater);
	}
}
