//! Red-black tree discipline over arena-indexed nodes.

pub mod types;
pub mod util;

pub use types::{Color, RbNode, RbNodeLike};
pub use util::{assert_red_black_tree, insert, insert_left, insert_right, print, remove};
