//! node layer: leaves, internal nodes, and the copy-on-write rule

use crate::engine::{
	token::EditToken,
	NodePtr,
};

/// A leaf holding elements in ascending key order.
pub(crate) struct Leaf<K, V> {
	pub(crate) tag: Option<EditToken>,
	pub(crate) elements: Vec<(K, V)>,
}

/// An internal node: `children.len() == separators.len() + 1`, and
/// `separators[i]` equals the minimum key reachable through
/// `children[i + 1]`.
pub(crate) struct Internal<K, V> {
	pub(crate) tag: Option<EditToken>,
	pub(crate) children: Vec<NodePtr<Node<K, V>>>,
	pub(crate) separators: Vec<K>,
}

pub(crate) enum Node<K, V> {
	Leaf(Leaf<K, V>),
	Internal(Internal<K, V>),
}

impl<K: Clone, V: Clone> Clone for Leaf<K, V> {
	fn clone(&self) -> Self {
		Leaf {
			tag: self.tag.clone(),
			elements: self.elements.clone(),
		}
	}
}

impl<K: Clone, V: Clone> Clone for Internal<K, V> {
	fn clone(&self) -> Self {
		Internal {
			tag: self.tag.clone(),
			children: self.children.clone(),
			separators: self.separators.clone(),
		}
	}
}

impl<K: Clone, V: Clone> Clone for Node<K, V> {
	fn clone(&self) -> Self {
		match self {
			Node::Leaf(leaf) => Node::Leaf(leaf.clone()),
			Node::Internal(internal) => Node::Internal(internal.clone()),
		}
	}
}

impl<K, V> Node<K, V> {
	pub(crate) fn tag(&self) -> Option<&EditToken> {
		match self {
			Node::Leaf(leaf) => leaf.tag.as_ref(),
			Node::Internal(internal) => internal.tag.as_ref(),
		}
	}

	pub(crate) fn set_tag(&mut self, tag: Option<EditToken>) {
		match self {
			Node::Leaf(leaf) => leaf.tag = tag,
			Node::Internal(internal) => internal.tag = tag,
		}
	}

	/// Number of direct elements (leaf) or children (internal node).
	pub(crate) fn occupancy(&self) -> usize {
		match self {
			Node::Leaf(leaf) => leaf.elements.len(),
			Node::Internal(internal) => internal.children.len(),
		}
	}
}

pub(crate) fn node_occupancy<K, V>(node: &NodePtr<Node<K, V>>) -> usize {
	node.occupancy()
}

/// `⌈order / 2⌉`, the minimum occupancy of any non-root node.
pub(crate) fn min_occupancy(order: usize) -> usize {
	(order + 1) / 2
}

/// Obtains a mutable view of the node behind `slot`, realizing the
/// abstract "tag matches the caller's live edit token" rule (§4.1) as a
/// concrete, safe-Rust copy-on-write step.
///
/// A node tagged with `token` is only ever reachable through the one
/// transient that stamped it, so whenever the tag matches, `get_mut`
/// either succeeds outright or the match was already stale (the node
/// escaped through a clone taken before the tag was retired) — in both
/// cases falling back to a freshly tagged clone is correct. Every node
/// returned from here carries `token`, so subsequent descents through the
/// same transient reuse it in place instead of copying again.
pub(crate) fn make_mut<'a, K, V>(slot: &'a mut NodePtr<Node<K, V>>, token: &EditToken) -> &'a mut Node<K, V>
where
	K: Clone,
	V: Clone,
{
	let reuse = token.is_live() && slot.tag().is_some_and(|tag| token.matches(tag));
	if reuse {
		if let Some(node) = NodePtr::get_mut(slot) {
			return node;
		}
		log::trace!("edit token matched a node still shared elsewhere; copying instead of mutating in place");
	}
	let mut cloned: Node<K, V> = (**slot).clone();
	cloned.set_tag(Some(token.clone()));
	*slot = NodePtr::new(cloned);
	NodePtr::get_mut(slot).expect("node allocated just above must be uniquely owned")
}
