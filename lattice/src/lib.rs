//! # henkan-lattice
//!
//! かな漢字変換のためのラティス（格子）構造の実装です。
//!
//! ## 概要
//!
//! 読み文字列（キー）に対して辞書引きで見つかった変換候補を、開始位置と終了位置の
//! 両方から引ける形で保持します。ビタビアルゴリズムなどのデコーダは、
//! 各位置の索引をたどって最良パスを求め、その結果をノードに書き戻します。
//!
//! 辞書引き、コスト計算、探索そのものはこのライブラリの範囲外です。
//!
//! ## 主な機能
//!
//! - **アリーナによる一括管理**: ノードはハンドル（[`NodeId`]）で参照され、キーの再設定で一括解放
//! - **位置索引**: 各位置から始まるノード・終わるノードの連結リスト
//! - **番兵ノード**: 文頭（BOS）と文末（EOS）を常に保持
//! - **最良パスの記録**: デコーダが選んだパスをノード間のリンクとして保持
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use henkan_lattice::Lattice;
//!
//! let mut lattice = Lattice::new();
//! lattice.set_key("きょうは");
//!
//! for (start, key, value) in [(0, "きょう", "今日"), (3, "は", "は"), (0, "き", "木")] {
//!     let node = lattice.new_node();
//!     lattice.node_mut(node).key = key.to_string();
//!     lattice.node_mut(node).value = value.to_string();
//!     lattice.insert(start, node)?;
//! }
//!
//! let ending_at_3: Vec<_> = lattice.end_chain(3).map(|(_, n)| n.value.as_str()).collect();
//! assert_eq!(ending_at_3, ["今日"]);
//!
//! let starting_at_0: Vec<_> = lattice
//!     .begin_chain(0)
//!     .filter(|(_, n)| !n.is_sentinel())
//!     .map(|(_, n)| n.value.as_str())
//!     .collect();
//! assert_eq!(starting_at_0, ["木", "今日"]);
//! # Ok(())
//! # }
//! ```

/// ノードアリーナ
pub mod arena;

/// 共通の定数定義
pub mod common;

/// ラティスの設定
pub mod config;

/// エラー型の定義
pub mod errors;

/// 読み文字列の内部表現
pub mod key;

/// ラティス本体
pub mod lattice;

/// ノードの定義
pub mod node;


// Re-exports
pub use config::{LatticeConfig, PositionUnit};
pub use lattice::Lattice;
pub use node::{Node, NodeData, NodeId, NodeKind};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
