//! edit tokens: the license to mutate a node in place

use core::sync::atomic::{
	AtomicBool,
	Ordering,
};

use crate::engine::NodePtr;

/// A process-unique stamp a [`crate::engine::Transient`] mints for itself
/// and carries for its whole lifetime.
///
/// A node tagged with a token may be mutated in place only by the holder
/// of that exact token, and only while the token is still live (not yet
/// retired by `persistent()`/`seal`). Matching is by pointer identity of
/// the token's inner cell, never by value — two tokens are never equal
/// just because they happen to compare alike.
#[derive(Clone)]
pub(crate) struct EditToken(NodePtr<AtomicBool>);

impl EditToken {
	/// Mints a fresh, live token, distinct from every other token that has
	/// ever existed in this process.
	pub(crate) fn new() -> Self {
		EditToken(NodePtr::new(AtomicBool::new(false)))
	}

	/// Retires the token. After this, `matches` never licenses in-place
	/// mutation again for any node still tagged with it.
	pub(crate) fn retire(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	/// Whether this token may still license mutation.
	pub(crate) fn is_live(&self) -> bool {
		!self.0.load(Ordering::Relaxed)
	}

	/// Whether `self` and `other` are the very same token.
	pub(crate) fn matches(&self, other: &EditToken) -> bool {
		NodePtr::ptr_eq(&self.0, &other.0)
	}
}
