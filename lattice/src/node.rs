//! ラティスのノード定義
//!
//! ノードはキーの区間 `[start, end)` に対する変換候補を表します。
//! 1つのレコードが開始位置チェーン、終了位置チェーン、最良パスの3つの
//! 連結構造に同時に属しますが、リンクはすべてアリーナ内のハンドルで表現され、
//! 所有関係は持ちません。

use std::fmt;
use std::ops::{Deref, Range};

use crate::common::BOS_EOS_CONNECTION_ID;

/// アリーナ内のノードを指すハンドル。
///
/// ハンドルは発行したアリーナの世代を保持します。アリーナがリセットされると
/// 世代が進み、それ以前のハンドルはすべて無効になります。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    #[inline(always)]
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// アリーナ内の通し番号を返します。
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// ノードの種類。
///
/// 文頭・文末の番兵と通常の候補ノードを区別します。これ以外の種類はありません。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum NodeKind {
    /// 辞書引きで登録された通常の候補。
    #[default]
    Ordinary,
    /// 文頭（BOS）の番兵。
    BeginOfSequence,
    /// 文末（EOS）の番兵。
    EndOfSequence,
}

/// ノードのうち、辞書引き（生成側）とデコーダ（消費側）が書き込むデータ。
///
/// [`Lattice::node_mut`](crate::Lattice::node_mut)で可変参照を取得できます。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeData {
    /// ノードが覆うキーの部分文字列（読み）。
    pub key: String,
    /// 変換後の表層形。
    pub value: String,
    /// 左側の接続ID。
    pub left_id: u16,
    /// 右側の接続ID。
    pub right_id: u16,
    /// 単語コスト。
    pub word_cost: i32,
    /// 最良パスに沿った累積コスト。デコーダが書き込みます。
    pub path_cost: i32,
    /// 最良パス上の直前のノード。
    pub best_prev: Option<NodeId>,
    /// 最良パス上の直後のノード。
    pub best_next: Option<NodeId>,
}

/// ラティス内のノード。
///
/// [`NodeData`]のフィールドは`Deref`で読み取れます。
/// チェーンのリンク、配置範囲、種類は挿入時にラティスが設定し、外部からは変更できません。
#[derive(Debug, PartialEq, Eq)]
pub struct Node {
    data: NodeData,
    pub(crate) kind: NodeKind,
    pub(crate) range: Option<(usize, usize)>,
    pub(crate) begin_next: Option<NodeId>,
    pub(crate) end_next: Option<NodeId>,
}

impl Deref for Node {
    type Target = NodeData;

    #[inline(always)]
    fn deref(&self) -> &NodeData {
        &self.data
    }
}

impl Node {
    /// 未挿入の通常ノードを作成します。
    pub(crate) fn new() -> Self {
        Self {
            data: NodeData::default(),
            kind: NodeKind::Ordinary,
            range: None,
            begin_next: None,
            end_next: None,
        }
    }

    /// 位置 `pos` に置かれた番兵ノードを作成します。
    pub(crate) fn sentinel(kind: NodeKind, pos: usize) -> Self {
        debug_assert_ne!(kind, NodeKind::Ordinary);
        Self {
            data: NodeData {
                left_id: BOS_EOS_CONNECTION_ID,
                right_id: BOS_EOS_CONNECTION_ID,
                ..Default::default()
            },
            kind,
            range: Some((pos, pos)),
            begin_next: None,
            end_next: None,
        }
    }

    /// 書き込み可能なデータ部を返します。
    #[inline(always)]
    pub(crate) fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    /// ノードの種類を返します。
    #[inline(always)]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline(always)]
    pub fn is_bos(&self) -> bool {
        self.kind == NodeKind::BeginOfSequence
    }

    #[inline(always)]
    pub fn is_eos(&self) -> bool {
        self.kind == NodeKind::EndOfSequence
    }

    /// 番兵ノードかどうかを判定します。
    #[inline(always)]
    pub fn is_sentinel(&self) -> bool {
        self.kind != NodeKind::Ordinary
    }

    /// ラティスに挿入済みかどうかを判定します。番兵は常に挿入済みです。
    #[inline(always)]
    pub const fn is_inserted(&self) -> bool {
        self.range.is_some()
    }

    /// 開始位置。未挿入なら`None`。
    #[inline(always)]
    pub fn start(&self) -> Option<usize> {
        self.range.map(|(start, _)| start)
    }

    /// 終了位置。未挿入なら`None`。
    #[inline(always)]
    pub fn end(&self) -> Option<usize> {
        self.range.map(|(_, end)| end)
    }

    /// 覆う区間。未挿入なら`None`。
    #[inline(always)]
    pub fn range(&self) -> Option<Range<usize>> {
        self.range.map(|(start, end)| start..end)
    }

    /// 区間の長さを返します。
    ///
    /// 挿入時に確定した値であり、挿入後に[`NodeData::key`]を書き換えても変わりません。
    /// 未挿入のノードでは0です。
    #[inline(always)]
    pub fn span(&self) -> usize {
        self.range.map_or(0, |(start, end)| end - start)
    }

    /// 同じ開始位置を持つ次のノード。
    #[inline(always)]
    pub const fn begin_next(&self) -> Option<NodeId> {
        self.begin_next
    }

    /// 同じ終了位置を持つ次のノード。
    #[inline(always)]
    pub const fn end_next(&self) -> Option<NodeId> {
        self.end_next
    }

    /// デコーダが書き込むフィールドを初期状態に戻します。
    #[inline]
    pub(crate) fn reset_cost(&mut self) {
        self.data.path_cost = 0;
        self.data.best_prev = None;
        self.data.best_next = None;
    }
}
