//! End-to-end usage scenarios, driven only through the public surface (no
//! access to engine internals — those are exercised by the property tests
//! inside the crate itself).

use ordtree::{
	OrdMap,
	OrdSet,
};

/// Scenario A: build from an unordered sequence, forward iteration comes
/// back sorted.
#[test]
fn scenario_a_build_and_iterate() {
	let map: OrdMap<i32, &str> = [(3, "three"), (1, "one"), (4, "four"), (2, "two")].into_iter().collect();
	let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
	assert_eq!(entries, vec![(1, "one"), (2, "two"), (3, "three"), (4, "four")]);
	assert_eq!(map.len(), 4);
}

/// Scenario B: `set` on a present key replaces it in the new map and
/// leaves the map it was called on unchanged.
#[test]
fn scenario_b_set_is_persistent() {
	let a: OrdMap<i32, &str> = [(3, "three"), (1, "one"), (4, "four"), (2, "two")].into_iter().collect();
	let b = a.set(2, "TWO");

	let b_entries: Vec<_> = b.iter().map(|(k, v)| (*k, *v)).collect();
	assert_eq!(b_entries, vec![(1, "one"), (2, "TWO"), (3, "three"), (4, "four")]);

	let a_entries: Vec<_> = a.iter().map(|(k, v)| (*k, *v)).collect();
	assert_eq!(a_entries, vec![(1, "one"), (2, "two"), (3, "three"), (4, "four")]);
}

/// Scenario C: erasing a present key shrinks the map; erasing an absent
/// key is the identity (and preserves root identity, checked here via
/// equality since the public API exposes no pointer identity).
#[test]
fn scenario_c_erase_present_and_absent() {
	let a: OrdMap<i32, &str> = [(3, "three"), (1, "one"), (4, "four"), (2, "two")].into_iter().collect();
	let b = a.erase(&3);
	assert_eq!(b.len(), 3);
	let entries: Vec<_> = b.iter().map(|(k, v)| (*k, *v)).collect();
	assert_eq!(entries, vec![(1, "one"), (2, "two"), (4, "four")]);

	let c = b.erase(&99);
	assert_eq!(c, b);
}

/// A permutation of `0..n` generated by multiplying by a factor coprime
/// with `n`, so tests exercise an out-of-order insertion sequence without
/// pulling in a dependency on a random number generator.
fn permutation(n: usize) -> Vec<usize> {
	let step = 387;
	(0..n).map(|i| (i * step) % n).collect()
}

/// Scenario D: 1000 keys inserted in a non-sequential order are all
/// present, with the right values, and iterate back out in order.
#[test]
fn scenario_d_bulk_insert_out_of_order() {
	let mut map: OrdMap<i32, String> = OrdMap::new();
	for i in permutation(1000) {
		map = map.set(i as i32, format!("v{i}"));
	}
	assert_eq!(map.len(), 1000);
	for i in 0..1000 {
		assert_eq!(map.get(&i).map(String::as_str), Some(format!("v{i}")).as_deref());
	}
	let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
	let expected: Vec<_> = (0..1000).collect();
	assert_eq!(keys, expected);
}

/// Scenario E: a transient batch-erase of every even key leaves the odd
/// keys in order, and does not disturb the map it was seeded from.
#[test]
fn scenario_e_transient_batch_erase_leaves_source_untouched() {
	let mut map: OrdMap<i32, String> = OrdMap::new();
	for i in permutation(1000) {
		map = map.set(i as i32, format!("v{i}"));
	}

	let mut transient = map.transient();
	for i in (0..1000).step_by(2) {
		transient.erase(&i);
	}
	let odds = transient.persistent();

	assert_eq!(odds.len(), 500);
	let keys: Vec<_> = odds.iter().map(|(k, _)| *k).collect();
	let expected: Vec<_> = (0..1000).filter(|k| k % 2 != 0).collect();
	assert_eq!(keys, expected);

	assert_eq!(map.len(), 1000);
	let original_keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
	assert_eq!(original_keys, (0..1000).collect::<Vec<_>>());
}

/// Scenario F: two maps built from the same pairs in different insertion
/// orders compare equal.
#[test]
fn scenario_f_insertion_order_does_not_affect_equality() {
	let pairs: Vec<(i32, i32)> = (0..200).map(|i| (i, i * i)).collect();

	let ascending: OrdMap<i32, i32> = pairs.iter().copied().collect();
	let shuffled: OrdMap<i32, i32> = permutation(pairs.len()).into_iter().map(|i| pairs[i]).collect();

	assert_eq!(ascending, shuffled);
}

/// §8 property 4 ("upsert idempotence") and property 6 ("round-trip")
/// through the set façade, which exercises a different element shape
/// (value-only) than the map scenarios above.
#[test]
fn set_upsert_is_idempotent_and_round_trips_through_a_transient() {
	let s: OrdSet<i32> = (0..50).collect();
	let once = s.insert(7);
	let twice = once.insert(7);
	assert_eq!(once, twice);
	assert_eq!(once.len(), twice.len());

	let round_tripped = once.transient().persistent();
	assert_eq!(round_tripped, once);
}

/// §4.2 `lower_bound`/`upper_bound`/`equal_range` against a reference
/// computed with plain iteration, over both containers.
#[test]
fn bounds_agree_with_a_linear_scan() {
	let set: OrdSet<i32> = [2, 4, 6, 8, 10].into_iter().collect();

	for probe in 0..12 {
		let lower: Vec<_> = set.lower_bound(&probe).copied().collect();
		let expected_lower: Vec<_> = set.iter().copied().filter(|&v| v >= probe).collect();
		assert_eq!(lower, expected_lower);

		let upper: Vec<_> = set.upper_bound(&probe).copied().collect();
		let expected_upper: Vec<_> = set.iter().copied().filter(|&v| v > probe).collect();
		assert_eq!(upper, expected_upper);

		let found = set.find(&probe).copied().collect::<Vec<_>>();
		let expected_found: Vec<_> = set.iter().copied().filter(|&v| v == probe).collect();
		assert_eq!(found, expected_found);
	}
}

/// `update`/`update_if_exists` (spec §4.5, §6) through the public API.
#[test]
fn update_and_update_if_exists() {
	let map: OrdMap<&str, i32> = OrdMap::new();

	let map = map.update("hits", |prior| Some(prior.copied().unwrap_or(0) + 1));
	assert_eq!(map.get(&"hits"), Some(&1));

	let map = map.update("hits", |prior| Some(prior.copied().unwrap_or(0) + 1));
	assert_eq!(map.get(&"hits"), Some(&2));

	let unchanged = map.update_if_exists(&"misses", |v| v + 1);
	assert_eq!(unchanged.get(&"misses"), None);
	assert_eq!(unchanged, map);
}

/// `at` on the map surfaces `Error::KeyNotFound` for an absent key,
/// matching spec §7.
#[test]
fn at_surfaces_key_not_found() {
	let map: OrdMap<i32, &str> = OrdMap::new().insert(1, "one");
	assert_eq!(map.at(&1), Ok(&"one"));
	assert_eq!(map.at(&2), Err(ordtree::Error::KeyNotFound));
}
