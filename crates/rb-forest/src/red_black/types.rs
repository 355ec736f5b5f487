use crate::types::{KvNode, Node};

/// Node color. Absent children count as [`Color::Black`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Red,
    Black,
}

impl From<bool> for Color {
    /// `true` is black.
    fn from(black: bool) -> Self {
        if black {
            Color::Black
        } else {
            Color::Red
        }
    }
}

/// Arena slot of a red-black tree: links, payload and color.
///
/// Fresh nodes are detached and red; [`insert`](super::insert) links them and
/// the fixup recolors as needed.
#[derive(Clone, Debug)]
pub struct RbNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    pub color: Color,
}

impl<K, V> RbNode<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self::with_color(k, v, Color::Red)
    }

    pub fn with_color(k: K, v: V, color: Color) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            color,
        }
    }

    /// Moves the payload out of an unlinked node.
    pub fn into_pair(self) -> (K, V) {
        (self.k, self.v)
    }
}

impl<K, V> Node for RbNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }
    fn l(&self) -> Option<u32> {
        self.l
    }
    fn r(&self) -> Option<u32> {
        self.r
    }
    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }
    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }
    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K, V> KvNode<K, V> for RbNode<K, V> {
    fn key(&self) -> &K {
        &self.k
    }
    fn value(&self) -> &V {
        &self.v
    }
    fn value_mut(&mut self) -> &mut V {
        &mut self.v
    }
    fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.v, value)
    }
}

/// Color access used by the rebalancing code.
pub trait RbNodeLike: Node {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);

    fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    fn set_black(&mut self, black: bool) {
        self.set_color(Color::from(black));
    }
}

impl<K, V> RbNodeLike for RbNode<K, V> {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
