//! ラティス内の連結リストをたどるイテレータ。

use std::iter::FusedIterator;

use super::Lattice;
use crate::node::{Node, NodeId};

#[derive(Clone, Copy, Debug)]
enum Link {
    Begin,
    End,
}

/// 同じ開始位置、または同じ終了位置を持つノードを列挙するイテレータ。
///
/// 後から挿入されたノードから順に`(NodeId, &Node)`を返します。
#[derive(Clone)]
pub struct Chain<'a> {
    lattice: &'a Lattice,
    cur: Option<NodeId>,
    link: Link,
}

impl<'a> Chain<'a> {
    #[inline(always)]
    pub(super) fn begin(lattice: &'a Lattice, head: Option<NodeId>) -> Self {
        Self {
            lattice,
            cur: head,
            link: Link::Begin,
        }
    }

    #[inline(always)]
    pub(super) fn end(lattice: &'a Lattice, head: Option<NodeId>) -> Self {
        Self {
            lattice,
            cur: head,
            link: Link::End,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = (NodeId, &'a Node);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        let node = self.lattice.node(id);
        self.cur = match self.link {
            Link::Begin => node.begin_next,
            Link::End => node.end_next,
        };
        Some((id, node))
    }
}

impl FusedIterator for Chain<'_> {}

/// 文頭ノードから最良パスを列挙するイテレータ。
///
/// デコーダが[`Lattice::connect`]で記録したリンクをたどります。
/// リンクが途中で途切れていれば、そこで終了します。
#[derive(Clone)]
pub struct BestPath<'a> {
    lattice: &'a Lattice,
    cur: Option<NodeId>,
    remaining: usize,
}

impl<'a> BestPath<'a> {
    #[inline(always)]
    pub(super) fn new(lattice: &'a Lattice, head: Option<NodeId>) -> Self {
        Self {
            lattice,
            cur: head,
            remaining: lattice.num_nodes(),
        }
    }
}

impl<'a> Iterator for BestPath<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        // Bounded by the node count so that a cyclic chain terminates.
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.cur?;
        let node = self.lattice.get(id).ok()?;
        self.cur = node.best_next;
        Some((id, node))
    }
}

impl FusedIterator for BestPath<'_> {}
