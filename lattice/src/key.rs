//! 読み文字列（キー）の内部表現
//!
//! 入力キーを保持し、位置からバイト位置へのマッピングを計算します。
//! 位置の単位は[`PositionUnit`]で決まり、ラティス全体で同じ単位が使われます。

use crate::config::PositionUnit;

/// ラティスのキー。
///
/// # フィールド
///
/// * `text` - キー文字列
/// * `unit` - 位置の単位
/// * `p2b` - 位置からバイト位置へのマッピング（文字単位のときのみ使用）
#[derive(Clone, Debug)]
pub struct Key {
    text: String,
    unit: PositionUnit,
    p2b: Vec<usize>,
}

impl Default for Key {
    fn default() -> Self {
        Self::new(PositionUnit::default())
    }
}

impl Key {
    /// 指定した単位で空のキーを作成します。
    pub fn new(unit: PositionUnit) -> Self {
        let mut key = Self {
            text: String::new(),
            unit,
            p2b: Vec::new(),
        };
        key.compute_positions();
        key
    }

    /// キー文字列を置き換えます。
    pub fn set<S>(&mut self, text: S)
    where
        S: AsRef<str>,
    {
        self.text.clear();
        self.text.push_str(text.as_ref());
        self.compute_positions();
    }

    /// キーを空にします。
    #[inline]
    pub fn clear(&mut self) {
        self.set("");
    }

    fn compute_positions(&mut self) {
        self.p2b.clear();
        if self.unit == PositionUnit::Char {
            self.p2b.extend(self.text.char_indices().map(|(bi, _)| bi));
            self.p2b.push(self.text.len());
        }
    }

    /// キー文字列を返します。
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 位置の単位を返します。
    #[inline(always)]
    pub const fn unit(&self) -> PositionUnit {
        self.unit
    }

    /// キーの長さを位置の単位で返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        match self.unit {
            PositionUnit::Char => self.p2b.len() - 1,
            PositionUnit::Byte => self.text.len(),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 位置`pos`に対応するバイト位置を返します。範囲外なら`None`。
    #[inline]
    pub fn byte_position(&self, pos: usize) -> Option<usize> {
        match self.unit {
            PositionUnit::Char => self.p2b.get(pos).copied(),
            PositionUnit::Byte => (pos <= self.text.len()).then_some(pos),
        }
    }

    /// 区間`[start, end)`の部分文字列を返します。
    ///
    /// 範囲外、逆順、または文字境界に乗らない区間（バイト単位のとき）では`None`を返します。
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        if start > end {
            return None;
        }
        let bs = self.byte_position(start)?;
        let be = self.byte_position(end)?;
        self.text.get(bs..be)
    }

    /// 文字列の長さをこのキーの単位で数えます。
    #[inline]
    pub fn measure(&self, s: &str) -> usize {
        match self.unit {
            PositionUnit::Char => s.chars().count(),
            PositionUnit::Byte => s.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_positions() {
        let mut key = Key::new(PositionUnit::Char);
        assert_eq!(key.len(), 0);
        key.set("きょうは");
        assert_eq!(key.len(), 4);
        assert_eq!(key.byte_position(0), Some(0));
        assert_eq!(key.byte_position(1), Some(3));
        assert_eq!(key.byte_position(4), Some(12));
        assert_eq!(key.byte_position(5), None);
        assert_eq!(key.slice(1, 3), Some("ょう"));
        assert_eq!(key.slice(2, 2), Some(""));
        assert_eq!(key.slice(3, 2), None);
        assert_eq!(key.slice(0, 5), None);
        assert_eq!(key.measure("ょう"), 2);
    }

    #[test]
    fn test_byte_positions() {
        let mut key = Key::new(PositionUnit::Byte);
        key.set("aきb");
        assert_eq!(key.len(), 5);
        assert_eq!(key.slice(1, 4), Some("き"));
        assert_eq!(key.slice(1, 2), None);
        assert_eq!(key.measure("き"), 3);
    }

    #[test]
    fn test_clear() {
        let mut key = Key::new(PositionUnit::Char);
        key.set("test");
        key.clear();
        assert!(key.is_empty());
        assert_eq!(key.as_str(), "");
        assert_eq!(key.len(), 0);
    }
}
