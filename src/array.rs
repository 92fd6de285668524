//! 順序付きキー・値コンテナ（Array）
//!
//! 挿入順を保持し、キーは一意。既存キーへの再代入は位置を変えずに上書きする。
//! エントリはim::Vector（構造共有でclone()が安価）、キー索引はahash付きim::HashMap。

use crate::error::{Result, TsumikiError};
use crate::key::Key;
use im::Vector;
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

type Index = crate::HashMap<Key, usize>;

/// 順序付きキー・値コンテナ
#[derive(Clone)]
pub struct Array<V: Clone> {
    entries: Vector<(Key, V)>,
    index: Index,
    next_index: NextIndex,
}

/// 次にpushで使う整数キー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextIndex {
    /// 一度も整数キーを持っていない（0から）
    Unused,
    At(i64),
    /// i64::MAXが使われた
    Exhausted,
}

/// `&Array`のイテレータ
pub type Iter<'a, V> =
    std::iter::Map<im::vector::Iter<'a, (Key, V)>, fn(&'a (Key, V)) -> (&'a Key, &'a V)>;

fn split_entry<V>(entry: &(Key, V)) -> (&Key, &V) {
    (&entry.0, &entry.1)
}

impl<V: Clone> Array<V> {
    pub fn new() -> Self {
        Array {
            entries: Vector::new(),
            index: crate::new_hashmap(),
            next_index: NextIndex::Unused,
        }
    }

    /// 値の列から0始まりの連番キーで作成
    pub fn from_values<I: IntoIterator<Item = V>>(values: I) -> Self {
        let mut array = Array::new();
        for (n, value) in (0i64..).zip(values) {
            array.insert(n, value);
        }
        array
    }

    /// キー・値の組から作成（重複キーは後勝ちで、最初の位置に上書き）
    pub fn from_pairs<K: Into<Key>, I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut array = Array::new();
        for (key, value) in pairs {
            array.insert(key, value);
        }
        array
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// キーに値を設定する
    ///
    /// 既存キーなら位置を保ったまま上書きし、古い値を返す。新しいキーなら末尾に追加。
    pub fn insert<K: Into<Key>>(&mut self, key: K, value: V) -> Option<V> {
        let key = key.into();
        if let Key::Int(n) = key {
            self.next_index = match (self.next_index, n.checked_add(1)) {
                (NextIndex::Exhausted, _) | (_, None) => NextIndex::Exhausted,
                (NextIndex::Unused, Some(next)) => NextIndex::At(next),
                (NextIndex::At(current), Some(next)) => NextIndex::At(current.max(next)),
            };
        }

        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push_back((key, value));
                None
            }
        }
    }

    /// 次の整数キーで末尾に追加し、使ったキーを返す
    ///
    /// i64::MAXのキーが既にあるときは追加せずエラー。
    pub fn push(&mut self, value: V) -> Result<Key> {
        let key = Key::Int(
            self.next_index()
                .ok_or_else(TsumikiError::next_index_unavailable)?,
        );
        self.insert(key.clone(), value);
        Ok(key)
    }

    /// 次にpushで使われる整数キー（i64::MAXが使用済みならNone）
    pub fn next_index(&self) -> Option<i64> {
        match self.next_index {
            NextIndex::Unused => Some(0),
            NextIndex::At(n) => Some(n),
            NextIndex::Exhausted => None,
        }
    }

    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&V> {
        self.index
            .get(&key.into())
            .map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut<K: Into<Key>>(&mut self, key: K) -> Option<&mut V> {
        let pos = *self.index.get(&key.into())?;
        Some(&mut self.entries[pos].1)
    }

    pub fn contains_key<K: Into<Key>>(&self, key: K) -> bool {
        self.index.contains_key(&key.into())
    }

    /// 位置（0始まり）でエントリを取得
    pub fn entry_at(&self, pos: usize) -> Option<(&Key, &V)> {
        self.entries.get(pos).map(split_entry)
    }

    pub fn first_entry(&self) -> Option<(&Key, &V)> {
        self.entries.front().map(split_entry)
    }

    pub fn last_entry(&self) -> Option<(&Key, &V)> {
        self.entries.back().map(split_entry)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.entries
            .iter()
            .map(split_entry as fn(&(Key, V)) -> (&Key, &V))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    /// 整数キーを0からの連番に振り直し、文字列キーはそのまま残す
    ///
    /// 配列のスライス・先頭削除・マージと同じキー規則。
    pub fn renumbered(&self) -> Self {
        let mut result = Array::new();
        let mut next = 0i64;
        for (key, value) in self.iter() {
            match key {
                Key::Int(_) => {
                    result.insert(next, value.clone());
                    next += 1;
                }
                Key::Str(_) => {
                    result.insert(key.clone(), value.clone());
                }
            }
        }
        result
    }

    /// 位置範囲[start, end)を切り出す（スライス規則でキーを振り直す）
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        let mut result = Array::new();
        let mut next = 0i64;
        for (key, value) in self.entries.clone().slice(start..end) {
            match key {
                Key::Int(_) => {
                    result.insert(next, value);
                    next += 1;
                }
                Key::Str(_) => {
                    result.insert(key, value);
                }
            }
        }
        result
    }
}

impl<V: Clone> Default for Array<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + PartialEq> PartialEq for Array<V> {
    /// 同じキー・値の組が同じ順序で並んでいれば等しい
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a == b)
    }
}

impl<V: Clone + Eq> Eq for Array<V> {}

impl<V: Clone + Hash> Hash for Array<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self.iter() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for Array<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Clone + Serialize> Serialize for Array<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<V: Clone> IntoIterator for Array<V> {
    type Item = (Key, V);
    type IntoIter = im::vector::ConsumingIter<(Key, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V: Clone> IntoIterator for &'a Array<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Clone> FromIterator<(Key, V)> for Array<V> {
    fn from_iter<I: IntoIterator<Item = (Key, V)>>(iter: I) -> Self {
        Array::from_pairs(iter)
    }
}

impl<V: Clone> Extend<(Key, V)> for Array<V> {
    fn extend<I: IntoIterator<Item = (Key, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: Clone> From<Vec<V>> for Array<V> {
    fn from(values: Vec<V>) -> Self {
        Array::from_values(values)
    }
}

/// Arrayリテラル
///
/// ```
/// use tsumiki::{array, Key};
///
/// let list = array![10, 20, 30];
/// assert_eq!(list.get(1), Some(&20));
///
/// let map = array! { "a" => 1, "b" => 2 };
/// assert_eq!(map.get("b"), Some(&2));
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Array::from_pairs(::std::vec![$(($crate::Key::from($key), $value)),+])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Array::from_values(::std::vec![$($value),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_uses_next_free_index() {
        let mut array = Array::new();
        array.insert(5, "a");
        array.insert("x", "b");
        assert_eq!(array.push("c").unwrap(), Key::Int(6));

        let mut negative = Array::new();
        negative.insert(-5, 1);
        assert_eq!(negative.push(2).unwrap(), Key::Int(-4));

        let mut strings: Array<i32> = Array::new();
        strings.insert("only", 1);
        assert_eq!(strings.next_index(), Some(0));
        assert_eq!(strings.push(2).unwrap(), Key::Int(0));
    }

    #[test]
    fn test_push_after_max_key_fails() {
        let mut array = Array::new();
        array.insert(i64::MAX, "last");
        assert_eq!(array.next_index(), None);

        let err = array.push("next").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::DataIntegrity);
        assert_eq!(array.len(), 1);
        assert_eq!(array.get(i64::MAX), Some(&"last"));

        array.insert(0, "low");
        assert_eq!(array.next_index(), None);
        assert!(array.push("again").is_err());
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut array = array! { "a" => 1, "b" => 2, "c" => 3 };
        assert_eq!(array.insert("b", 20), Some(2));
        let keys: Vec<_> = array.keys().cloned().collect();
        assert_eq!(keys, vec![Key::from("a"), Key::from("b"), Key::from("c")]);
        assert_eq!(array.get("b"), Some(&20));
    }

    #[test]
    fn test_numeric_string_keys_are_ints() {
        let array = array! { "1" => 'a', "2" => 'b' };
        assert_eq!(array.get(1), Some(&'a'));
        assert!(array.contains_key(Key::Int(2)));
    }

    #[test]
    fn test_equality_is_ordered() {
        let a = array! { "a" => 1, "b" => 2 };
        let b = array! { "b" => 2, "a" => 1 };
        assert_ne!(a, b);
        assert_eq!(a, array! { "a" => 1, "b" => 2 });
    }

    #[test]
    fn test_renumbered_keeps_string_keys() {
        let array = array! { 3 => 'a', "k" => 'b', 9 => 'c' };
        let renumbered = array.renumbered();
        assert_eq!(renumbered, array! { 0 => 'a', "k" => 'b', 1 => 'c' });
    }

    #[test]
    fn test_slice() {
        let array = array!['a', 'b', 'c', 'd'];
        assert_eq!(array.slice(1, 3), array!['b', 'c']);
        assert_eq!(array.slice(3, 10), array!['d']);
        assert!(array.slice(5, 2).is_empty());
    }
}
