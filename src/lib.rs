//! persistent (immutable) ordered set and map, backed by a shared B+ tree
//!
//! [`OrdSet`] and [`OrdMap`] are persistent containers: every mutating
//! operation returns a new container while leaving the one it was called
//! on observably unchanged, sharing whatever structure did not change
//! between the two. [`TransientMap`] and [`TransientSet`] are their
//! batched-mutation companions — obtain one with `transient()`, perform a
//! run of in-place edits against it, then call `persistent()` to seal the
//! result back into an immutable value in O(1).
//!
//! Both containers are thin façades over a single engine (`engine`,
//! private to this crate) that implements the node layout, path-copying
//! update protocol, and iterator model once. See `DESIGN.md` in the
//! repository for how the pieces are grounded.

#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/ordtree/0.1.0")]

#[cfg(all(feature = "rc", feature = "arc"))]
compile_error!("features \"rc\" and \"arc\" are mutually exclusive");
#[cfg(not(any(feature = "rc", feature = "arc")))]
compile_error!("exactly one of the \"rc\" or \"arc\" features must be enabled");

mod comparator;
mod engine;
mod error;
mod map;
mod set;

pub use crate::{
	comparator::{
		Comparator,
		OrdComparator,
	},
	error::{
		Error,
		Result,
	},
	map::{
		Iter as MapIter,
		OrdMap,
		TransientMap,
	},
	set::{
		Iter as SetIter,
		OrdSet,
		TransientSet,
	},
};
