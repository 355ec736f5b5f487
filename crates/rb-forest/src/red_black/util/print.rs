use std::fmt::Debug;

use crate::types::KvNode;

use super::super::types::{Color, RbNodeLike};

/// Renders the subtree under `node` as an indented multi-line dump, one
/// node per line with its arena index and color.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: RbNodeLike + KvNode<K, V>,
{
    let Some(i) = node else {
        return "∅".to_string();
    };
    let n = &arena[i as usize];
    let color = match n.color() {
        Color::Black => "B",
        Color::Red => "R",
    };
    let child_tab = format!("{tab}  ");
    let left = print::<K, V, N>(arena, n.l(), &child_tab);
    let right = print::<K, V, N>(arena, n.r(), &child_tab);
    format!(
        "#{i} {color} {:?} => {:?}\n{tab}├─ {left}\n{tab}└─ {right}",
        n.key(),
        n.value()
    )
}
