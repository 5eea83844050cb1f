//! ノードアリーナ
//!
//! ノードを連続したバッファにまとめて確保し、リセット時に一括で解放します。
//! 個々のノードを解放する操作はありません。ノード間のリンクはすべて
//! [`NodeId`]で表現されるため、バッファが伸長してもハンドルは無効になりません。

use crate::errors::{LatticeError, Result};
use crate::node::{Node, NodeData, NodeId};

/// ノードを一括確保・一括解放するアリーナ。
#[derive(Default, Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
    generation: u32,
}

impl NodeArena {
    /// 空のアリーナを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 少なくとも`capacity`個のノードを再確保なしで保持できるアリーナを作成します。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            generation: 0,
        }
    }

    /// 初期化済みのノードを1つ確保します。
    ///
    /// 返されるノードは空の読み・表層形、接続ID 0、コスト 0、
    /// [`NodeKind::Ordinary`](crate::node::NodeKind::Ordinary)で、リンクを持ちません。
    #[inline]
    pub fn alloc(&mut self) -> NodeId {
        self.alloc_with(Node::new())
    }

    #[inline]
    pub(crate) fn alloc_with(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len(), self.generation);
        self.nodes.push(node);
        id
    }

    /// 発行済みのすべてのノードを解放します。
    ///
    /// バッファの容量は保持されます。世代が1つ進むため、
    /// これ以前に発行されたハンドルはすべて無効になります。
    pub fn reset(&mut self) {
        log::trace!(
            "reset node arena: released {} nodes (capacity {})",
            self.nodes.len(),
            self.nodes.capacity()
        );
        self.nodes.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// 現在の世代を返します。
    #[inline(always)]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// 現在の世代で発行されたノード数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 再確保なしで保持できるノード数を返します。
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// ハンドルが現在の世代のものかどうかを判定します。
    #[inline(always)]
    pub fn contains(&self, id: NodeId) -> bool {
        id.generation == self.generation && id.index < self.nodes.len()
    }

    /// ハンドルに対応するノードを取得します。
    ///
    /// # エラー
    ///
    /// 以前の世代のハンドルが渡された場合、[`LatticeError::StaleNode`]を返します。
    #[inline]
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        if self.contains(id) {
            Ok(&self.nodes[id.index])
        } else {
            Err(LatticeError::StaleNode(id))
        }
    }

    /// ハンドルに対応するノードのデータ部を可変参照で取得します。
    ///
    /// チェーンのリンクと配置範囲は変更できません。
    ///
    /// # エラー
    ///
    /// 以前の世代のハンドルが渡された場合、[`LatticeError::StaleNode`]を返します。
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.node_mut(id).map(Node::data_mut)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        if self.contains(id) {
            Ok(&mut self.nodes[id.index])
        } else {
            Err(LatticeError::StaleNode(id))
        }
    }

    /// 発行済みのノードをハンドルと共に発行順に列挙します。
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        let generation = self.generation;
        self.nodes
            .iter()
            .enumerate()
            .map(move |(i, node)| (NodeId::new(i, generation), node))
    }

    pub(crate) fn nodes_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }
}
