//! 配列操作 - 述語・フィルタ関数

use crate::array::Array;
use crate::equality::Truthy;
use crate::key::Key;

/// all - 全要素が真か（空配列はtrue）
pub fn all<V: Clone + Truthy>(array: &Array<V>) -> bool {
    array.values().all(Truthy::is_truthy)
}

/// all_by - 全要素が述語を満たすか（最初に満たさない要素で打ち切り）
pub fn all_by<V, F>(array: &Array<V>, mut predicate: F) -> bool
where
    V: Clone,
    F: FnMut(&V) -> bool,
{
    array.values().all(|v| predicate(v))
}

/// some - いずれかの要素が真か（空配列はfalse）
pub fn some<V: Clone + Truthy>(array: &Array<V>) -> bool {
    array.values().any(Truthy::is_truthy)
}

/// some_by - いずれかの要素が述語を満たすか
pub fn some_by<V, F>(array: &Array<V>, mut predicate: F) -> bool
where
    V: Clone,
    F: FnMut(&V) -> bool,
{
    array.values().any(|v| predicate(v))
}

/// contains - 構造的に等しい要素を含むか
///
/// 緩い比較はしないので、`contains(&[1, 2, 3], &"3")`に相当する呼び出しはfalse。
pub fn contains<V: Clone + PartialEq>(array: &Array<V>, value: &V) -> bool {
    array.values().any(|item| item == value)
}

/// filter - 真の要素だけを残す（キーは保持）
pub fn filter<V: Clone + Truthy>(array: &Array<V>) -> Array<V> {
    filter_by(array, |v, _| v.is_truthy())
}

/// filter_by - 述語(value, key)を満たす要素だけを残す（キーは保持）
pub fn filter_by<V, F>(array: &Array<V>, mut predicate: F) -> Array<V>
where
    V: Clone,
    F: FnMut(&V, &Key) -> bool,
{
    array
        .iter()
        .filter(|(k, v)| predicate(*v, *k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
