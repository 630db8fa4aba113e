//! error types shared by [`crate::OrdMap`] and [`crate::OrdSet`]

/// Errors produced by this crate's containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// [`crate::OrdMap::at`] was called with a key that is not present.
	#[error("key not found")]
	KeyNotFound,
	/// an iterator was dereferenced or advanced past the end of the tree
	/// version it was derived from.
	///
	/// Nothing in this crate's safe API can currently construct this
	/// variant — the borrow checker ties every [`crate::MapIter`]/
	/// [`crate::SetIter`] to the tree it was obtained from, which rules out
	/// the foreign- and stale-iterator misuse this variant exists for in
	/// the abstract model. It is kept on `Error` for interface parity.
	#[error("invalid iterator")]
	InvalidIterator,
}

/// convenience alias for `Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
