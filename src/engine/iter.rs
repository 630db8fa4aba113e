//! the leaf zipper: a root-to-leaf path that advances and retreats without
//! physical sibling pointers on the node itself (see `DESIGN.md`)

use crate::engine::node::{
	Internal,
	Leaf,
	Node,
};

/// A position over a borrowed tree: either at some `(leaf, index)`, or
/// past the end. Built once by descending from the root, then stepped by
/// walking the path stack back up and down again — the logical
/// realization of the doubly linked leaf chain.
#[derive(Clone)]
pub(crate) struct Cursor<'a, K, V> {
	root: Option<&'a Node<K, V>>,
	path: Vec<(&'a Internal<K, V>, usize)>,
	leaf: Option<(&'a Leaf<K, V>, usize)>,
}

impl<'a, K, V> Cursor<'a, K, V> {
	pub(crate) fn begin(root: Option<&'a Node<K, V>>) -> Self {
		let mut path = Vec::new();
		let mut node = match root {
			Some(node) => node,
			None => return Cursor { root, path, leaf: None },
		};
		loop {
			match node {
				Node::Leaf(leaf) => {
					let leaf = if leaf.elements.is_empty() { None } else { Some((leaf, 0)) };
					return Cursor { root, path, leaf };
				}
				Node::Internal(internal) => {
					path.push((internal, 0));
					node = &*internal.children[0];
				}
			}
		}
	}

	/// The "one past the last element" sentinel position.
	pub(crate) fn end(root: Option<&'a Node<K, V>>) -> Self {
		Cursor { root, path: Vec::new(), leaf: None }
	}

	pub(crate) fn last(root: Option<&'a Node<K, V>>) -> Self {
		let mut path = Vec::new();
		let mut node = match root {
			Some(node) => node,
			None => return Cursor { root, path, leaf: None },
		};
		loop {
			match node {
				Node::Leaf(leaf) => {
					let leaf = if leaf.elements.is_empty() { None } else { Some((leaf, leaf.elements.len() - 1)) };
					return Cursor { root, path, leaf };
				}
				Node::Internal(internal) => {
					let last = internal.children.len() - 1;
					path.push((internal, last));
					node = &*internal.children[last];
				}
			}
		}
	}

	/// Position at the first element `>= key` (`strict = false`) or
	/// `> key` (`strict = true`).
	pub(crate) fn at<C>(root: Option<&'a Node<K, V>>, key: &K, cmp: &C, strict: bool) -> Self
	where
		C: crate::comparator::Comparator<K>,
	{
		use crate::engine::lookup::{
			child_index,
			leaf_lower_bound,
			leaf_upper_bound,
		};

		let mut path = Vec::new();
		let mut node = match root {
			Some(node) => node,
			None => return Cursor { root, path, leaf: None },
		};
		loop {
			match node {
				Node::Leaf(leaf) => {
					let idx = if strict {
						leaf_upper_bound(&leaf.elements, key, cmp)
					} else {
						leaf_lower_bound(&leaf.elements, key, cmp)
					};
					let mut cursor = Cursor {
						root,
						path,
						leaf: Some((leaf, idx)),
					};
					if idx >= leaf.elements.len() {
						cursor.advance();
					}
					return cursor;
				}
				Node::Internal(internal) => {
					let i = child_index(&internal.separators, key, cmp);
					path.push((internal, i));
					node = &*internal.children[i];
				}
			}
		}
	}

	pub(crate) fn current(&self) -> Option<(&'a K, &'a V)> {
		let (leaf, idx) = self.leaf?;
		let (k, v) = &leaf.elements[idx];
		Some((k, v))
	}

	pub(crate) fn same_position(&self, other: &Self) -> bool {
		match (self.leaf, other.leaf) {
			(None, None) => true,
			(Some((a, ia)), Some((b, ib))) => core::ptr::eq(a, b) && ia == ib,
			_ => false,
		}
	}

	/// Steps to the next element in ascending order, or to "past the end"
	/// if there is none.
	pub(crate) fn advance(&mut self) {
		let Some((leaf, idx)) = self.leaf else {
			return;
		};
		if idx + 1 < leaf.elements.len() {
			self.leaf = Some((leaf, idx + 1));
			return;
		}
		loop {
			let Some((ancestor, taken)) = self.path.pop() else {
				self.leaf = None;
				return;
			};
			if taken + 1 < ancestor.children.len() {
				self.path.push((ancestor, taken + 1));
				let mut node = &*ancestor.children[taken + 1];
				loop {
					match node {
						Node::Leaf(leaf) => {
							self.leaf = Some((leaf, 0));
							return;
						}
						Node::Internal(internal) => {
							self.path.push((internal, 0));
							node = &*internal.children[0];
						}
					}
				}
			}
		}
	}

	/// Steps to the previous element in ascending order. Retreating past
	/// the beginning, or retreating from "past the end", lands on the
	/// tree's last element (or stays at the empty-tree sentinel).
	pub(crate) fn retreat(&mut self) {
		let Some((leaf, idx)) = self.leaf else {
			*self = Cursor::last(self.root);
			return;
		};
		if idx > 0 {
			self.leaf = Some((leaf, idx - 1));
			return;
		}
		loop {
			let Some((ancestor, taken)) = self.path.pop() else {
				self.leaf = None;
				return;
			};
			if taken > 0 {
				self.path.push((ancestor, taken - 1));
				let mut node = &*ancestor.children[taken - 1];
				loop {
					match node {
						Node::Leaf(leaf) => {
							self.leaf = Some((leaf, leaf.elements.len() - 1));
							return;
						}
						Node::Internal(internal) => {
							let last = internal.children.len() - 1;
							self.path.push((internal, last));
							node = &*internal.children[last];
						}
					}
				}
			}
		}
	}
}

/// A double-ended iterator over a borrowed tree or sub-range of one.
///
/// Front and back are independent cursors that meet in the middle; there
/// is no separate "length" bookkeeping to keep in sync, so `next` and
/// `next_back` can be interleaved arbitrarily.
pub struct Iter<'a, K, V> {
	front: Option<Cursor<'a, K, V>>,
	back: Option<Cursor<'a, K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
	pub(crate) fn new_full(root: Option<&'a Node<K, V>>) -> Self {
		let front = Cursor::begin(root);
		if front.leaf.is_none() {
			return Iter { front: None, back: None };
		}
		let back = Cursor::last(root);
		Iter {
			front: Some(front),
			back: Some(back),
		}
	}

	/// Builds a range iterator from an inclusive `front` position through
	/// an *exclusive* `back` position (one past the last element of the
	/// range), as produced by `lower_bound`/`upper_bound`.
	pub(crate) fn new_range(front: Cursor<'a, K, V>, mut back: Cursor<'a, K, V>) -> Self {
		if front.leaf.is_none() || front.same_position(&back) {
			return Iter { front: None, back: None };
		}
		back.retreat();
		Iter {
			front: Some(front),
			back: Some(back),
		}
	}

	pub(crate) fn empty() -> Self {
		Iter { front: None, back: None }
	}
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		let item = self.front.as_ref()?.current()?;
		let done = match self.back.as_ref() {
			Some(back) => self.front.as_ref().expect("checked above").same_position(back),
			None => true,
		};
		if done {
			self.front = None;
			self.back = None;
		} else {
			self.front.as_mut().expect("checked above").advance();
		}
		Some(item)
	}
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
	fn next_back(&mut self) -> Option<Self::Item> {
		let item = self.back.as_ref()?.current()?;
		let done = match self.front.as_ref() {
			Some(front) => front.same_position(self.back.as_ref().expect("checked above")),
			None => true,
		};
		if done {
			self.front = None;
			self.back = None;
		} else {
			self.back.as_mut().expect("checked above").retreat();
		}
		Some(item)
	}
}
