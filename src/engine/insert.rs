//! insertion: descend, replace-or-append, split on overflow, grow the root

use crate::{
	comparator::Comparator,
	engine::{
		lookup::{
			child_index,
			leaf_lower_bound,
		},
		node::{
			make_mut,
			Internal,
			Leaf,
			Node,
		},
		token::EditToken,
		NodePtr,
	},
};

/// What a recursive insert handed back to its caller: either the subtree
/// absorbed the new element without changing shape, or it split and the
/// caller must link in the new sibling.
enum Split<K, V> {
	None,
	Some { separator: K, right: NodePtr<Node<K, V>> },
}

/// Inserts `(key, value)` into `*slot` (an empty tree if `None`).
/// Returns `true` if this grew the tree (a fresh key), `false` if an
/// existing entry was replaced.
pub(crate) fn insert<K, V, C>(slot: &mut Option<NodePtr<Node<K, V>>>, key: K, value: V, cmp: &C, token: &EditToken, order: usize) -> bool
where
	K: Clone,
	V: Clone,
	C: Comparator<K>,
{
	let root = match slot {
		Some(root) => root,
		None => {
			*slot = Some(NodePtr::new(Node::Leaf(Leaf {
				tag: Some(token.clone()),
				elements: vec![(key, value)],
			})));
			return true;
		}
	};
	match insert_rec(root, key, value, cmp, token, order) {
		(grew, Split::None) => grew,
		(grew, Split::Some { separator, right }) => {
			log::debug!("root grew a level after a split");
			let left = root.clone();
			*slot = Some(NodePtr::new(Node::Internal(Internal {
				tag: Some(token.clone()),
				children: vec![left, right],
				separators: vec![separator],
			})));
			grew
		}
	}
}

fn insert_rec<K, V, C>(slot: &mut NodePtr<Node<K, V>>, key: K, value: V, cmp: &C, token: &EditToken, order: usize) -> (bool, Split<K, V>)
where
	K: Clone,
	V: Clone,
	C: Comparator<K>,
{
	let node = make_mut(slot, token);
	match node {
		Node::Leaf(leaf) => {
			let idx = leaf_lower_bound(&leaf.elements, &key, cmp);
			if idx < leaf.elements.len() && cmp.equivalent(&leaf.elements[idx].0, &key) {
				leaf.elements[idx] = (key, value);
				return (false, Split::None);
			}
			leaf.elements.insert(idx, (key, value));
			if leaf.elements.len() <= order {
				return (true, Split::None);
			}
			log::trace!("splitting a full leaf of {} elements", leaf.elements.len());
			let mid = (leaf.elements.len() + 1) / 2;
			let right_elements = leaf.elements.split_off(mid);
			let separator = right_elements[0].0.clone();
			let right = NodePtr::new(Node::Leaf(Leaf {
				tag: Some(token.clone()),
				elements: right_elements,
			}));
			(true, Split::Some { separator, right })
		}
		Node::Internal(internal) => {
			let i = child_index(&internal.separators, &key, cmp);
			let (grew, split) = insert_rec(&mut internal.children[i], key, value, cmp, token, order);
			let split = match split {
				Split::None => return (grew, Split::None),
				Split::Some { separator, right } => {
					internal.separators.insert(i, separator);
					internal.children.insert(i + 1, right);
					split_internal_if_full(internal, token, order)
				}
			};
			(grew, split)
		}
	}
}

/// If an internal node overflowed past `order` children, splits it in two
/// and promotes the middle separator to the caller.
fn split_internal_if_full<K, V>(internal: &mut Internal<K, V>, token: &EditToken, order: usize) -> Split<K, V>
where
	K: Clone,
	V: Clone,
{
	if internal.children.len() <= order {
		return Split::None;
	}
	log::trace!("splitting a full internal node of {} children", internal.children.len());
	let mid = (internal.children.len() + 1) / 2;
	let right_children = internal.children.split_off(mid);
	let right_separators = internal.separators.split_off(mid);
	let promoted = internal.separators.pop().expect("an internal node being split has at least one separator on its left side");
	Split::Some {
		separator: promoted,
		right: NodePtr::new(Node::Internal(Internal {
			tag: Some(token.clone()),
			children: right_children,
			separators: right_separators,
		})),
	}
}
