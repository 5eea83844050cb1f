//! 共通の定数定義

/// 文頭・文末ノードの左右の接続ID。
pub const BOS_EOS_CONNECTION_ID: u16 = 0;
