//! erasure: descend, remove, and rebalance underfull children on the way back up

use crate::{
	comparator::Comparator,
	engine::{
		lookup::{
			child_index,
			find,
			leaf_lower_bound,
		},
		node::{
			make_mut,
			min_occupancy,
			node_occupancy,
			Internal,
			Node,
		},
		token::EditToken,
		NodePtr,
	},
};

/// What a recursive erase reports to its caller.
struct Outcome<K> {
	/// this subtree dropped below `⌈order / 2⌉` occupancy and its parent
	/// must borrow or merge it with a sibling
	underfull: bool,
	/// `Some(k)` if this subtree's minimum key changed to `k`; the caller
	/// must fold that into the separator pointing at this subtree, unless
	/// this subtree is itself the leftmost child, in which case the new
	/// minimum propagates one level further up instead
	new_min: Option<K>,
}

/// Removes the element equivalent to `key`, if any. Returns `true` if an
/// element was removed. Looks the key up read-only first, so an absent
/// key leaves `*slot` byte-for-byte untouched — no node along the search
/// path is copied on a miss.
pub(crate) fn erase<K, V, C>(slot: &mut Option<NodePtr<Node<K, V>>>, key: &K, cmp: &C, token: &EditToken, order: usize) -> bool
where
	K: Clone,
	V: Clone,
	C: Comparator<K>,
{
	let Some(root) = slot.as_ref() else {
		return false;
	};
	if find(root, key, cmp).is_none() {
		return false;
	}
	let root = slot.as_mut().expect("checked above");
	erase_rec(root, key, cmp, token, order);

	match slot.as_ref().expect("checked above").as_ref() {
		Node::Leaf(leaf) if leaf.elements.is_empty() => {
			log::debug!("root leaf emptied out");
			*slot = None;
		}
		Node::Internal(internal) if internal.children.len() == 1 => {
			log::debug!("root collapsed a level, single child promoted");
			let only_child = internal.children[0].clone();
			*slot = Some(only_child);
		}
		_ => {}
	}
	true
}

fn erase_rec<K, V, C>(slot: &mut NodePtr<Node<K, V>>, key: &K, cmp: &C, token: &EditToken, order: usize) -> Outcome<K>
where
	K: Clone,
	V: Clone,
	C: Comparator<K>,
{
	let node = make_mut(slot, token);
	match node {
		Node::Leaf(leaf) => {
			let idx = leaf_lower_bound(&leaf.elements, key, cmp);
			debug_assert!(idx < leaf.elements.len() && cmp.equivalent(&leaf.elements[idx].0, key));
			let was_min = idx == 0;
			leaf.elements.remove(idx);
			let underfull = leaf.elements.len() < min_occupancy(order);
			let new_min = if was_min { leaf.elements.first().map(|(k, _)| k.clone()) } else { None };
			Outcome { underfull, new_min }
		}
		Node::Internal(internal) => {
			let i = child_index(&internal.separators, key, cmp);
			let child = erase_rec(&mut internal.children[i], key, cmp, token, order);
			if let Some(new_min) = &child.new_min {
				if i > 0 {
					internal.separators[i - 1] = new_min.clone();
				}
			}
			let propagate_new_min = if i == 0 { child.new_min } else { None };
			if !child.underfull {
				return Outcome {
					underfull: false,
					new_min: propagate_new_min,
				};
			}
			rebalance_child(internal, i, token, order);
			let underfull = internal.children.len() < min_occupancy(order);
			Outcome {
				underfull,
				new_min: propagate_new_min,
			}
		}
	}
}

/// Restores child `i`'s minimum occupancy by borrowing a single
/// element/child from a sibling that can spare one, or, failing that,
/// merging it with a sibling.
fn rebalance_child<K, V>(internal: &mut Internal<K, V>, i: usize, token: &EditToken, order: usize)
where
	K: Clone,
	V: Clone,
{
	let min_occ = min_occupancy(order);
	if i > 0 && node_occupancy(&internal.children[i - 1]) > min_occ {
		log::trace!("borrowing from the left sibling at index {}", i - 1);
		borrow_from_left(internal, i, token);
		return;
	}
	if i + 1 < internal.children.len() && node_occupancy(&internal.children[i + 1]) > min_occ {
		log::trace!("borrowing from the right sibling at index {}", i + 1);
		borrow_from_right(internal, i, token);
		return;
	}
	if i > 0 {
		log::trace!("merging child {} into its left sibling", i);
		merge_children(internal, i - 1, token);
	} else {
		log::trace!("merging child {} with its right sibling", i);
		merge_children(internal, i, token);
	}
}

fn borrow_from_left<K, V>(internal: &mut Internal<K, V>, i: usize, token: &EditToken)
where
	K: Clone,
	V: Clone,
{
	let (left_slice, right_slice) = internal.children.split_at_mut(i);
	let left = make_mut(&mut left_slice[i - 1], token);
	let right_slot = &mut right_slice[0];
	match left {
		Node::Leaf(left_leaf) => {
			let moved = left_leaf.elements.pop().expect("left sibling has spare elements");
			let Node::Leaf(right_leaf) = make_mut(right_slot, token) else {
				unreachable!("siblings at the same level share node kind")
			};
			right_leaf.elements.insert(0, moved);
			internal.separators[i - 1] = right_leaf.elements[0].0.clone();
		}
		Node::Internal(left_internal) => {
			let moved_child = left_internal.children.pop().expect("left sibling has spare children");
			let moved_sep = left_internal.separators.pop().expect("left sibling has spare separators");
			let Node::Internal(right_internal) = make_mut(right_slot, token) else {
				unreachable!("siblings at the same level share node kind")
			};
			right_internal.children.insert(0, moved_child);
			let sunk = core::mem::replace(&mut internal.separators[i - 1], moved_sep);
			right_internal.separators.insert(0, sunk);
		}
	}
}

fn borrow_from_right<K, V>(internal: &mut Internal<K, V>, i: usize, token: &EditToken)
where
	K: Clone,
	V: Clone,
{
	let (left_slice, right_slice) = internal.children.split_at_mut(i + 1);
	let left_slot = &mut left_slice[i];
	let right = make_mut(&mut right_slice[0], token);
	match right {
		Node::Leaf(right_leaf) => {
			let moved = right_leaf.elements.remove(0);
			let new_sep = right_leaf.elements[0].0.clone();
			let Node::Leaf(left_leaf) = make_mut(left_slot, token) else {
				unreachable!("siblings at the same level share node kind")
			};
			left_leaf.elements.push(moved);
			internal.separators[i] = new_sep;
		}
		Node::Internal(right_internal) => {
			let moved_child = right_internal.children.remove(0);
			let moved_sep = right_internal.separators.remove(0);
			let Node::Internal(left_internal) = make_mut(left_slot, token) else {
				unreachable!("siblings at the same level share node kind")
			};
			let sunk = core::mem::replace(&mut internal.separators[i], moved_sep);
			left_internal.children.push(moved_child);
			left_internal.separators.push(sunk);
		}
	}
}

/// Merges `children[left_idx + 1]` into `children[left_idx]`, consuming
/// the separator between them.
fn merge_children<K, V>(internal: &mut Internal<K, V>, left_idx: usize, token: &EditToken)
where
	K: Clone,
	V: Clone,
{
	let sep = internal.separators.remove(left_idx);
	let right_child = internal.children.remove(left_idx + 1);
	let left = make_mut(&mut internal.children[left_idx], token);
	match left {
		Node::Leaf(left_leaf) => {
			let Node::Leaf(right_leaf) = &*right_child else {
				unreachable!("siblings at the same level share node kind")
			};
			left_leaf.elements.extend(right_leaf.elements.iter().cloned());
		}
		Node::Internal(left_internal) => {
			let Node::Internal(right_internal) = &*right_child else {
				unreachable!("siblings at the same level share node kind")
			};
			left_internal.separators.push(sep);
			left_internal.separators.extend(right_internal.separators.iter().cloned());
			left_internal.children.extend(right_internal.children.iter().cloned());
		}
	}
}
