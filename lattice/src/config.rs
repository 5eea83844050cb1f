//! ラティスの設定
//!
//! 位置の単位とアリーナの事前確保量を指定します。

/// キー上の位置を数える単位。
///
/// 生成側とデコーダは同じ単位で位置を扱う必要があります。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum PositionUnit {
    /// Unicodeスカラー値（`char`）単位。
    #[default]
    Char,
    /// UTF-8のバイト単位。
    Byte,
}

/// [`Lattice`](crate::Lattice)の設定。
///
/// # 例
///
/// ```
/// use henkan_lattice::{Lattice, LatticeConfig, PositionUnit};
///
/// let config = LatticeConfig::default()
///     .position_unit(PositionUnit::Byte)
///     .node_capacity(256);
/// let mut lattice = Lattice::with_config(config);
/// lattice.set_key("きょう");
/// assert_eq!(lattice.len(), 9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeConfig {
    pub(crate) unit: PositionUnit,
    pub(crate) node_capacity: usize,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            unit: PositionUnit::Char,
            node_capacity: 64,
        }
    }
}

impl LatticeConfig {
    /// 位置の単位を指定します。
    pub const fn position_unit(mut self, unit: PositionUnit) -> Self {
        self.unit = unit;
        self
    }

    /// アリーナに事前確保するノード数を指定します。
    pub const fn node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    /// 位置の単位を返します。
    #[inline(always)]
    pub const fn unit(&self) -> PositionUnit {
        self.unit
    }

    /// 事前確保するノード数を返します。
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.node_capacity
    }
}
