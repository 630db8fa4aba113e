//! the shared B+ tree engine underneath [`crate::OrdMap`] and [`crate::OrdSet`]
//!
//! Not part of this crate's public API: [`map`][crate::map] and
//! [`set`][crate::set] are thin façades over [`BTree`] and [`Transient`],
//! which implement the node layout, the path-copying update protocol, and
//! the iterator model exactly once.

pub(crate) mod erase;
pub(crate) mod insert;
pub(crate) mod iter;
pub(crate) mod lookup;
pub(crate) mod node;
pub(crate) mod token;

#[cfg(feature = "rc")]
pub(crate) use std::rc::Rc as NodePtr;
#[cfg(feature = "arc")]
pub(crate) use std::sync::Arc as NodePtr;

use crate::{
	comparator::{
		Comparator,
		OrdComparator,
	},
	engine::{
		node::Node,
		token::EditToken,
	},
};

pub(crate) use iter::Iter;

/// Default tree order (`M`), per the fan-out this crate ships with.
pub(crate) const DEFAULT_ORDER: usize = 32;

/// Smallest order that can still satisfy `⌈order / 2⌉ >= 2`.
pub(crate) const MIN_ORDER: usize = 4;

/// A persistent, ordered B+ tree over `K`, comparing keys with `C`.
///
/// Cloning a `BTree` is O(1): it shares the same root node, bumping a
/// reference count rather than copying anything.
pub(crate) struct BTree<K, V, C = OrdComparator> {
	pub(crate) root: Option<NodePtr<Node<K, V>>>,
	pub(crate) len: usize,
	pub(crate) order: usize,
	pub(crate) cmp: C,
}

impl<K, V, C: Clone> Clone for BTree<K, V, C> {
	fn clone(&self) -> Self {
		BTree {
			root: self.root.clone(),
			len: self.len,
			order: self.order,
			cmp: self.cmp.clone(),
		}
	}
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
	pub(crate) fn new(cmp: C, order: usize) -> Self {
		assert!(order >= MIN_ORDER, "tree order must be at least {MIN_ORDER}");
		BTree {
			root: None,
			len: 0,
			order,
			cmp,
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.len
	}

	pub(crate) fn order(&self) -> usize {
		self.order
	}

	pub(crate) fn comparator(&self) -> &C {
		&self.cmp
	}

	pub(crate) fn get(&self, key: &K) -> Option<&V> {
		let root = self.root.as_ref()?;
		lookup::find(root, key, &self.cmp).map(|(_, v)| v)
	}

	pub(crate) fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
		let root = self.root.as_ref()?;
		lookup::find(root, key, &self.cmp).map(|(k, v)| (k, v))
	}

	pub(crate) fn contains_key(&self, key: &K) -> bool {
		self.get(key).is_some()
	}

	pub(crate) fn iter(&self) -> Iter<'_, K, V> {
		Iter::new_full(self.root.as_deref())
	}

	pub(crate) fn lower_bound(&self, key: &K) -> Iter<'_, K, V> {
		let Some(root) = self.root.as_deref() else {
			return Iter::empty();
		};
		let front = iter::Cursor::at(Some(root), key, &self.cmp, false);
		let back = iter::Cursor::last(Some(root));
		let mut back = back;
		back.advance();
		Iter::new_range(front, back)
	}

	pub(crate) fn upper_bound(&self, key: &K) -> Iter<'_, K, V> {
		let Some(root) = self.root.as_deref() else {
			return Iter::empty();
		};
		let front = iter::Cursor::at(Some(root), key, &self.cmp, true);
		let mut back = iter::Cursor::last(Some(root));
		back.advance();
		Iter::new_range(front, back)
	}

	pub(crate) fn equal_range(&self, key: &K) -> Iter<'_, K, V> {
		let Some(root) = self.root.as_deref() else {
			return Iter::empty();
		};
		let front = iter::Cursor::at(Some(root), key, &self.cmp, false);
		let back = iter::Cursor::at(Some(root), key, &self.cmp, true);
		Iter::new_range(front, back)
	}
}

impl<K: Clone, V: Clone, C: Comparator<K> + Clone> BTree<K, V, C> {
	/// Returns a new tree with `key` mapped to `value`, plus whether this
	/// grew the tree (a fresh key) rather than replacing an entry.
	pub(crate) fn insert(&self, key: K, value: V) -> (Self, bool) {
		let mut root = self.root.clone();
		let token = EditToken::new();
		let grew = insert::insert(&mut root, key, value, &self.cmp, &token, self.order);
		let len = if grew { self.len + 1 } else { self.len };
		(
			BTree {
				root,
				len,
				order: self.order,
				cmp: self.cmp.clone(),
			},
			grew,
		)
	}

	/// Returns a new tree with the element equivalent to `key` removed,
	/// plus whether it was present. If it was not present, the returned
	/// tree shares its root with `self` (same pointer, not merely an
	/// equal value).
	pub(crate) fn erase(&self, key: &K) -> (Self, bool) {
		if self.root.is_none() {
			return (self.clone(), false);
		}
		let mut root = self.root.clone();
		let token = EditToken::new();
		if !erase::erase(&mut root, key, &self.cmp, &token, self.order) {
			return (self.clone(), false);
		}
		(
			BTree {
				root,
				len: self.len - 1,
				order: self.order,
				cmp: self.cmp.clone(),
			},
			true,
		)
	}

	/// Applies `f` to the value currently mapped to `key` (`None` if
	/// absent); `Some(v)` upserts `v`, `None` leaves the tree unchanged
	/// (the §4.5 "fn declines" case). Composes `get` and `insert`, so it
	/// changes no structural invariant beyond what `insert` already can.
	pub(crate) fn update<F>(&self, key: K, f: F) -> Self
	where
		F: FnOnce(Option<&V>) -> Option<V>,
	{
		match f(self.get(&key)) {
			Some(value) => self.insert(key, value).0,
			None => self.clone(),
		}
	}

	/// Like [`Self::update`], but a no-op when `key` is absent: `f` only
	/// ever sees an existing value.
	pub(crate) fn update_if_exists<F>(&self, key: &K, f: F) -> Self
	where
		F: FnOnce(&V) -> V,
	{
		match self.get(key) {
			Some(value) => self.insert(key.clone(), f(value)).0,
			None => self.clone(),
		}
	}
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for BTree<K, V, C> {
	fn eq(&self, other: &Self) -> bool {
		if self.len != other.len {
			return false;
		}
		match (&self.root, &other.root) {
			(Some(a), Some(b)) if NodePtr::ptr_eq(a, b) => true,
			_ => self.iter().eq(other.iter()),
		}
	}
}

impl<K: Eq, V: Eq, C> Eq for BTree<K, V, C> {}

/// A batched-mutation companion to [`BTree`]: obtained from one, edited
/// in place with a single live edit token, then sealed back with
/// `seal()`.
pub(crate) struct Transient<K, V, C = OrdComparator> {
	root: Option<NodePtr<Node<K, V>>>,
	len: usize,
	order: usize,
	cmp: C,
	token: EditToken,
}

impl<K, V, C: Comparator<K> + Clone> Transient<K, V, C> {
	pub(crate) fn new(cmp: C, order: usize) -> Self {
		assert!(order >= MIN_ORDER, "tree order must be at least {MIN_ORDER}");
		Transient {
			root: None,
			len: 0,
			order,
			cmp,
			token: EditToken::new(),
		}
	}

	pub(crate) fn from_tree(tree: &BTree<K, V, C>) -> Self {
		Transient {
			root: tree.root.clone(),
			len: tree.len,
			order: tree.order,
			cmp: tree.cmp.clone(),
			token: EditToken::new(),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.len
	}

	pub(crate) fn get(&self, key: &K) -> Option<&V> {
		let root = self.root.as_ref()?;
		lookup::find(root, key, &self.cmp).map(|(_, v)| v)
	}

	pub(crate) fn iter(&self) -> Iter<'_, K, V> {
		Iter::new_full(self.root.as_deref())
	}

	pub(crate) fn seal(mut self) -> BTree<K, V, C> {
		self.token.retire();
		BTree {
			root: self.root,
			len: self.len,
			order: self.order,
			cmp: self.cmp,
		}
	}
}

impl<K: Clone, V: Clone, C: Comparator<K> + Clone> Transient<K, V, C> {
	/// Inserts `(key, value)`, returning `true` if this grew the tree.
	pub(crate) fn insert(&mut self, key: K, value: V) -> bool {
		let grew = insert::insert(&mut self.root, key, value, &self.cmp, &self.token, self.order);
		if grew {
			self.len += 1;
		}
		grew
	}

	/// Removes the element equivalent to `key`, returning `true` if one
	/// was present.
	pub(crate) fn erase(&mut self, key: &K) -> bool {
		if self.root.is_none() {
			return false;
		}
		if !erase::erase(&mut self.root, key, &self.cmp, &self.token, self.order) {
			return false;
		}
		self.len -= 1;
		true
	}

	/// In-place counterpart to [`BTree::update`].
	pub(crate) fn update<F>(&mut self, key: K, f: F)
	where
		F: FnOnce(Option<&V>) -> Option<V>,
	{
		if let Some(value) = f(self.get(&key)) {
			self.insert(key, value);
		}
	}

	/// In-place counterpart to [`BTree::update_if_exists`].
	pub(crate) fn update_if_exists<F>(&mut self, key: &K, f: F)
	where
		F: FnOnce(&V) -> V,
	{
		if let Some(value) = self.get(key) {
			let new_value = f(value);
			self.insert(key.clone(), new_value);
		}
	}
}
