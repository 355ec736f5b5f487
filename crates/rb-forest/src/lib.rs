//! Arena-based red-black tree primitives.
//!
//! The engine behind the `treemap` crate's ordered map and set. Nodes live in
//! a caller-owned `Vec<N>`; every link is an `Option<u32>` index into that
//! arena, so rotations and parent back-references need no raw pointers.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] and [`KvNode`] link/payload traits |
//! | [`util`] | `first`, `last`, `next`, `prev`, `find`, navigation `seek`, `swap`, `relocate` |
//! | [`red_black`] | [`RbNode`], insert/remove with rebalancing, invariant checker, debug printer |

pub mod red_black;
pub mod types;
pub mod util;

pub use red_black::{assert_red_black_tree, Color, RbNode, RbNodeLike};
pub use types::{KvNode, Node};
pub use util::{ceiling, find, first, floor, height, higher, last, lower, next, prev, seek, size, Seek};
