//! エラー型の定義
//!
//! このモジュールは、ラティス操作で発生するすべてのエラー型を定義します。
//! いずれも呼び出し側の契約違反を表し、再試行しても結果は変わりません。

use crate::node::NodeId;

/// ラティス専用のResult型
///
/// エラー型としてデフォルトで[`LatticeError`]を使用します。
pub type Result<T, E = LatticeError> = std::result::Result<T, E>;

/// ラティスのエラー型
///
/// エラーが返された操作はラティスの状態を一切変更しません。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// 位置がキーの範囲 `[0, len]` の外にある
    #[error("OutOfRange: position {position} is outside 0..={len}")]
    OutOfRange {
        /// 指定された位置
        position: usize,
        /// キーの長さ
        len: usize,
    },

    /// ノードの終了位置がキーの末尾を超える
    #[error("OutOfRange: node spanning {start}..{end} exceeds key length {len}")]
    SpanOutOfRange {
        /// 開始位置
        start: usize,
        /// 終了位置
        end: usize,
        /// キーの長さ
        len: usize,
    },

    /// 挿入済みのノードを再び挿入しようとした
    #[error("DoubleInsert: node {0} is already linked into the lattice")]
    DoubleInsert(NodeId),

    /// `set_key`/`clear`より前に発行されたハンドルが使われた
    #[error("StaleNode: node {0} was issued before the last reset")]
    StaleNode(NodeId),
}

impl LatticeError {
    /// 範囲外エラーを生成します
    ///
    /// # 引数
    ///
    /// * `position` - 指定された位置
    /// * `len` - キーの長さ
    pub(crate) const fn out_of_range(position: usize, len: usize) -> Self {
        Self::OutOfRange { position, len }
    }
}
