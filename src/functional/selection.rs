//! 配列操作 - 選択・並び替え関数
//!
//! init/tail/reverseの結果は、整数キーを連番に振り直し文字列キーを残す
//! （配列の先頭・末尾を取り除いたときと同じキー規則）。

use crate::array::Array;
use std::cmp::Ordering;

/// first - 先頭の値（空ならNone）
pub fn first<V: Clone>(array: &Array<V>) -> Option<&V> {
    array.first_entry().map(|(_, v)| v)
}

/// last - 末尾の値（空ならNone）
pub fn last<V: Clone>(array: &Array<V>) -> Option<&V> {
    array.last_entry().map(|(_, v)| v)
}

/// init - 末尾の要素を取り除く
pub fn init<V: Clone>(array: &Array<V>) -> Array<V> {
    array.slice(0, array.len().saturating_sub(1))
}

/// tail - 先頭の要素を取り除く
pub fn tail<V: Clone>(array: &Array<V>) -> Array<V> {
    array.slice(1, array.len())
}

/// reverse - 逆順にする
///
/// `preserve_keys`がtrueなら全てのキーを保持する。
pub fn reverse<V: Clone>(array: &Array<V>, preserve_keys: bool) -> Array<V> {
    let reversed: Array<V> = array
        .iter()
        .rev()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if preserve_keys {
        reversed
    } else {
        reversed.renumbered()
    }
}

/// sort - 値の昇順に並べる（安定ソート、キーは保持）
pub fn sort<V: Clone + Ord>(array: &Array<V>) -> Array<V> {
    sort_by(array, V::cmp)
}

/// sort_by - 比較関数で並べる（安定ソート、キーは保持）
pub fn sort_by<V, F>(array: &Array<V>, mut comparator: F) -> Array<V>
where
    V: Clone,
    F: FnMut(&V, &V) -> Ordering,
{
    let mut entries: Vec<_> = array.iter().collect();
    entries.sort_by(|(_, a), (_, b)| comparator(*a, *b));
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// sort_keys - キーの昇順に並べる（整数キーが文字列キーより前）
pub fn sort_keys<V: Clone>(array: &Array<V>) -> Array<V> {
    let mut entries: Vec<_> = array.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;

    #[test]
    fn test_first_last() {
        let array = array! { "x" => 1, "y" => 2 };
        assert_eq!(first(&array), Some(&1));
        assert_eq!(last(&array), Some(&2));

        let empty: Array<i32> = Array::new();
        assert_eq!(first(&empty), None);
        assert_eq!(last(&empty), None);
    }

    #[test]
    fn test_init_and_tail() {
        let array = array! { 5 => 'a', "k" => 'b', 9 => 'c' };
        assert_eq!(tail(&array), array! { "k" => 'b', 0 => 'c' });
        assert_eq!(init(&array), array! { 0 => 'a', "k" => 'b' });

        let empty: Array<char> = Array::new();
        assert!(tail(&empty).is_empty());
        assert!(init(&empty).is_empty());
    }

    #[test]
    fn test_reverse() {
        let array = array! { 0 => 'a', "k" => 'b', 1 => 'c' };
        assert_eq!(
            reverse(&array, false),
            array! { 0 => 'c', "k" => 'b', 1 => 'a' }
        );
        assert_eq!(
            reverse(&array, true),
            array! { 1 => 'c', "k" => 'b', 0 => 'a' }
        );
    }

    #[test]
    fn test_sort_is_stable_and_keeps_keys() {
        let array = array! { "a" => 3, "b" => 1, "c" => 3, "d" => 2 };
        assert_eq!(
            sort(&array),
            array! { "b" => 1, "d" => 2, "a" => 3, "c" => 3 }
        );
        assert_eq!(
            sort_by(&array, |a, b| b.cmp(a)),
            array! { "a" => 3, "c" => 3, "d" => 2, "b" => 1 }
        );
    }

    #[test]
    fn test_sort_keys() {
        let array = array! { "b" => 1, 2 => 2, "a" => 3, 1 => 4 };
        assert_eq!(
            sort_keys(&array),
            array! { 1 => 4, 2 => 2, "a" => 3, "b" => 1 }
        );
    }
}
