//! ラティス（格子）構造の実装モジュール。
//!
//! 読み文字列（キー）の各位置について、その位置から始まるノードと
//! その位置で終わるノードをそれぞれ連結リストとして保持します。
//! 辞書引きがノードを登録し、デコーダが両方の索引をたどって最良パスを求めます。
//!
//! ノードはすべてラティスが所有する[`NodeArena`]に置かれ、
//! [`Lattice::set_key`]または[`Lattice::clear`]で一括して解放されます。
//!
//! # 例
//!
//! ```
//! use henkan_lattice::Lattice;
//!
//! let mut lattice = Lattice::new();
//! lattice.set_key("test");
//!
//! let node = lattice.new_node();
//! lattice.node_mut(node).key = "es".to_string();
//! lattice.node_mut(node).value = "ho".to_string();
//! lattice.insert(1, node)?;
//!
//! assert_eq!(lattice.begin_nodes(1), Some(node));
//! assert_eq!(lattice.end_nodes(3), Some(node));
//! # Ok::<(), henkan_lattice::errors::LatticeError>(())
//! ```
mod chain;

use std::fmt;
use std::ops::Index;

use crate::arena::NodeArena;
use crate::config::{LatticeConfig, PositionUnit};
use crate::errors::{LatticeError, Result};
use crate::key::Key;
use crate::node::{Node, NodeData, NodeId, NodeKind};

pub use chain::{BestPath, Chain};

/// 1回の変換要求に対応するラティス。
///
/// 状態は「キー未設定」と「キー設定済み」の2つで、[`set_key`](Self::set_key)で
/// 後者に、[`clear`](Self::clear)で前者に遷移します。キー未設定の状態では
/// 有効な位置は0のみです。
///
/// 内部で排他制御は行いません。要求ごとに1つのインスタンスを所有してください。
pub struct Lattice {
    config: LatticeConfig,
    key: Key,
    arena: NodeArena,
    begin_index: Vec<Option<NodeId>>,
    end_index: Vec<Option<NodeId>>,
    bos: Option<NodeId>,
    eos: Option<NodeId>,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new()
    }
}

impl Lattice {
    /// 既定の設定で空のラティスを作成します。
    pub fn new() -> Self {
        Self::with_config(LatticeConfig::default())
    }

    /// 設定を指定して空のラティスを作成します。
    pub fn with_config(config: LatticeConfig) -> Self {
        Self {
            key: Key::new(config.unit()),
            arena: NodeArena::with_capacity(config.capacity()),
            begin_index: vec![None],
            end_index: vec![None],
            bos: None,
            eos: None,
            config,
        }
    }

    /// 設定を返します。
    #[inline(always)]
    pub const fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// 位置の単位を返します。
    #[inline(always)]
    pub const fn unit(&self) -> PositionUnit {
        self.config.unit()
    }

    /// キーを設定し、新しい要求の処理を準備します。
    ///
    /// それまでのノード・索引・番兵はすべて破棄され、以前に発行された
    /// [`NodeId`]は無効になります。文頭ノードを位置0の開始索引に、
    /// 文末ノードを位置`len`の終了索引に登録します。
    ///
    /// # 引数
    ///
    /// * `key` - 変換する読み文字列
    pub fn set_key<S>(&mut self, key: S)
    where
        S: AsRef<str>,
    {
        self.key.set(key.as_ref());
        self.reset();

        let len = self.len();
        let bos = self
            .arena
            .alloc_with(Node::sentinel(NodeKind::BeginOfSequence, 0));
        let eos = self
            .arena
            .alloc_with(Node::sentinel(NodeKind::EndOfSequence, len));
        self.begin_index[0] = Some(bos);
        self.end_index[len] = Some(eos);
        self.bos = Some(bos);
        self.eos = Some(eos);

        log::trace!("set lattice key {:?} (len {len})", self.key.as_str());
    }

    /// ラティスを空の状態に戻します。
    ///
    /// キーは空文字列になり、番兵を含むすべてのノードが解放されます。
    pub fn clear(&mut self) {
        self.key.clear();
        self.reset();
        log::trace!("cleared lattice");
    }

    /// ノードと索引を現在のキーの長さに合わせて作り直します。
    fn reset(&mut self) {
        self.arena.reset();
        self.bos = None;
        self.eos = None;
        Self::reset_index(&mut self.begin_index, self.key.len() + 1);
        Self::reset_index(&mut self.end_index, self.key.len() + 1);
    }

    fn reset_index(index: &mut Vec<Option<NodeId>>, new_len: usize) {
        index.clear();
        index.resize(new_len, None);
    }

    /// 現在のキーを返します。未設定なら空文字列です。
    #[inline(always)]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// キーの長さを位置の単位で返します。未設定なら0です。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// キーが空かどうかを判定します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// キーが設定されているかどうかを判定します。
    #[inline(always)]
    pub fn has_key(&self) -> bool {
        self.bos.is_some()
    }

    /// 区間`[start, end)`のキー部分文字列を返します。
    ///
    /// 範囲外、または文字境界に乗らない区間では`None`を返します。
    #[inline]
    pub fn key_slice(&self, start: usize, end: usize) -> Option<&str> {
        self.key.slice(start, end)
    }

    /// 文頭（BOS）ノード。キーが設定されていれば常に`Some`です。
    #[inline(always)]
    pub const fn begin_sentinel(&self) -> Option<NodeId> {
        self.bos
    }

    /// 文末（EOS）ノード。キーが設定されていれば常に`Some`です。
    #[inline(always)]
    pub const fn end_sentinel(&self) -> Option<NodeId> {
        self.eos
    }

    /// 初期化済みのノードをアリーナから確保します。
    ///
    /// キーの設定前でも呼び出せます。確保したノードは[`insert`](Self::insert)
    /// するまでどの索引にも属しません。
    #[inline]
    pub fn new_node(&mut self) -> NodeId {
        self.arena.alloc()
    }

    /// 現在のキーに対して発行されたノード数を返します（番兵を含む）。
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.arena.len()
    }

    /// ハンドルに対応するノードを取得します。
    ///
    /// # エラー
    ///
    /// 無効なハンドルでは[`LatticeError::StaleNode`]を返します。
    #[inline]
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.arena.get(id)
    }

    /// ハンドルに対応するノードのデータ部を可変参照で取得します。
    ///
    /// # エラー
    ///
    /// 無効なハンドルでは[`LatticeError::StaleNode`]を返します。
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.arena.get_mut(id)
    }

    /// ハンドルに対応するノードを取得します。
    ///
    /// # パニック
    ///
    /// 以前のキーに対して発行されたハンドルを渡すとパニックします。
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        match self.arena.get(id) {
            Ok(node) => node,
            Err(e) => panic!("{e}"),
        }
    }

    /// ハンドルに対応するノードのデータ部を可変参照で取得します。
    ///
    /// 書き換えられるのは[`NodeData`]のフィールドだけです。
    /// チェーンのリンクと配置範囲はラティスが管理するため、
    /// ノード全体を置き換えることはできません。
    ///
    /// ```compile_fail
    /// use henkan_lattice::Lattice;
    ///
    /// let mut lattice = Lattice::new();
    /// lattice.set_key("a");
    /// let a = lattice.new_node();
    /// let b = lattice.new_node();
    /// lattice[a] = lattice[b].clone();
    /// ```
    ///
    /// # パニック
    ///
    /// 以前のキーに対して発行されたハンドルを渡すとパニックします。
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        match self.arena.get_mut(id) {
            Ok(node) => node,
            Err(e) => panic!("{e}"),
        }
    }

    /// ノードを開始位置`start`に挿入します。
    ///
    /// ノードの区間長は`node.key`を位置の単位で数えたものです。
    /// ノードは開始索引`start`と終了索引`start + span`のそれぞれ先頭に追加されるため、
    /// 同じ位置では後から挿入したノードほど先に列挙されます。
    /// `node.key`とラティスのキーの内容は照合しません。
    ///
    /// # 引数
    ///
    /// * `start` - 開始位置
    /// * `id` - [`new_node`](Self::new_node)で確保した未挿入のノード
    ///
    /// # エラー
    ///
    /// 以下の場合にエラーを返し、ラティスは変更されません。
    ///
    /// * `start`が`[0, len]`の外にある ([`LatticeError::OutOfRange`])
    /// * 終了位置が`len`を超える ([`LatticeError::SpanOutOfRange`])
    /// * ノードが挿入済み、または番兵である ([`LatticeError::DoubleInsert`])
    /// * ハンドルが無効 ([`LatticeError::StaleNode`])
    pub fn insert(&mut self, start: usize, id: NodeId) -> Result<()> {
        let len = self.len();
        let node = self.arena.get(id)?;
        if node.is_inserted() {
            log::debug!("rejected insertion of {id}: already linked");
            return Err(LatticeError::DoubleInsert(id));
        }
        if start > len {
            log::debug!("rejected insertion of {id}: start {start} > {len}");
            return Err(LatticeError::out_of_range(start, len));
        }
        let end = start + self.key.measure(&node.key);
        if end > len {
            log::debug!("rejected insertion of {id}: end {end} > {len}");
            return Err(LatticeError::SpanOutOfRange { start, end, len });
        }

        let begin_head = self.begin_index[start].replace(id);
        let end_head = self.end_index[end].replace(id);
        let node = self.arena.node_mut(id)?;
        node.range = Some((start, end));
        node.begin_next = begin_head;
        node.end_next = end_head;

        log::trace!("inserted {id} at {start}..{end}");
        Ok(())
    }

    /// 位置`pos`から始まるノードの連結リストの先頭を返します。
    ///
    /// 残りのノードは[`Node::begin_next`]でたどれます。
    ///
    /// # パニック
    ///
    /// `pos`が`[0, len]`の外にある場合パニックします。
    #[inline]
    pub fn begin_nodes(&self, pos: usize) -> Option<NodeId> {
        match self.try_begin_nodes(pos) {
            Ok(head) => head,
            Err(e) => panic!("{e}"),
        }
    }

    /// 位置`pos`で終わるノードの連結リストの先頭を返します。
    ///
    /// 残りのノードは[`Node::end_next`]でたどれます。
    ///
    /// # パニック
    ///
    /// `pos`が`[0, len]`の外にある場合パニックします。
    #[inline]
    pub fn end_nodes(&self, pos: usize) -> Option<NodeId> {
        match self.try_end_nodes(pos) {
            Ok(head) => head,
            Err(e) => panic!("{e}"),
        }
    }

    /// [`begin_nodes`](Self::begin_nodes)の範囲検査付き版。
    ///
    /// # エラー
    ///
    /// `pos`が範囲外なら[`LatticeError::OutOfRange`]を返します。
    #[inline]
    pub fn try_begin_nodes(&self, pos: usize) -> Result<Option<NodeId>> {
        self.begin_index
            .get(pos)
            .copied()
            .ok_or_else(|| LatticeError::out_of_range(pos, self.len()))
    }

    /// [`end_nodes`](Self::end_nodes)の範囲検査付き版。
    ///
    /// # エラー
    ///
    /// `pos`が範囲外なら[`LatticeError::OutOfRange`]を返します。
    #[inline]
    pub fn try_end_nodes(&self, pos: usize) -> Result<Option<NodeId>> {
        self.end_index
            .get(pos)
            .copied()
            .ok_or_else(|| LatticeError::out_of_range(pos, self.len()))
    }

    /// 位置`pos`から始まるノードを列挙します。
    ///
    /// # パニック
    ///
    /// `pos`が`[0, len]`の外にある場合パニックします。
    #[inline]
    pub fn begin_chain(&self, pos: usize) -> Chain<'_> {
        Chain::begin(self, self.begin_nodes(pos))
    }

    /// 位置`pos`で終わるノードを列挙します。
    ///
    /// # パニック
    ///
    /// `pos`が`[0, len]`の外にある場合パニックします。
    #[inline]
    pub fn end_chain(&self, pos: usize) -> Chain<'_> {
        Chain::end(self, self.end_nodes(pos))
    }

    /// 位置`pos`から始まるノードが存在するかを判定します。範囲外では`false`です。
    #[inline(always)]
    pub fn has_begin_nodes(&self, pos: usize) -> bool {
        self.begin_index.get(pos).map_or(false, Option::is_some)
    }

    /// 位置`pos`で終わるノードが存在するかを判定します。範囲外では`false`です。
    #[inline(always)]
    pub fn has_end_nodes(&self, pos: usize) -> bool {
        self.end_index.get(pos).map_or(false, Option::is_some)
    }

    /// 最良パス上で`prev`の直後に`next`が続くことを記録します。
    ///
    /// # エラー
    ///
    /// いずれかのハンドルが無効なら[`LatticeError::StaleNode`]を返し、
    /// どちらのノードも変更しません。
    pub fn connect(&mut self, prev: NodeId, next: NodeId) -> Result<()> {
        self.arena.get(prev)?;
        self.arena.get_mut(next)?.best_prev = Some(prev);
        self.arena.get_mut(prev)?.best_next = Some(next);
        Ok(())
    }

    /// 文頭ノードから[`NodeData::best_next`]をたどって最良パスを列挙します。
    ///
    /// キー未設定なら何も返しません。
    #[inline]
    pub fn best_path(&self) -> BestPath<'_> {
        BestPath::new(self, self.bos)
    }

    /// すべてのノードの累積コストと最良パスのリンクを初期化します。
    ///
    /// 同じラティスに対してデコーダをやり直すときに使います。
    pub fn reset_costs(&mut self) {
        for node in self.arena.nodes_mut() {
            node.reset_cost();
        }
    }

    /// 発行済みのノードをハンドルと共に発行順に列挙します。
    #[inline]
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.arena.iter()
    }
}

impl Index<NodeId> for Lattice {
    type Output = Node;

    #[inline(always)]
    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

impl fmt::Debug for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Lattice {{ key: {:?}, has_key: {}, nodes: {}, begin: [",
            self.key(),
            self.has_key(),
            self.num_nodes()
        )?;
        for pos in 0..=self.len() {
            write!(f, "{pos} =>")?;
            for (id, node) in self.begin_chain(pos) {
                match node.kind() {
                    NodeKind::Ordinary => {
                        write!(f, " {id}:{:?}/{:?}", node.key, node.value)?
                    }
                    NodeKind::BeginOfSequence => write!(f, " {id}:BOS")?,
                    NodeKind::EndOfSequence => write!(f, " {id}:EOS")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "]}}")
    }
}
