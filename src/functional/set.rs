//! 配列操作 - 集合演算関数
//!
//! unique/containsは構造的等価性（`PartialEq`）で比較するが、
//! diff/intersectは文字列化した値（`LooseEq::string_form`）で比較する。
//! 呼び出し側がどちらかの挙動に依存しうるため、この非対称性は揃えない。

use crate::array::Array;
use crate::equality::LooseEq;
use ahash::AHashSet;
use std::cmp::Ordering;

/// unique - 各値の最初の出現だけを残す（キーは保持、振り直さない）
pub fn unique<V: Clone + PartialEq>(array: &Array<V>) -> Array<V> {
    unique_by(array, |v| v.clone())
}

/// unique_by - key_fn(value)が最初に出現した要素だけを残す
///
/// 既出集合は線形走査（`PartialEq`しか要求しないため）。
pub fn unique_by<V, K, F>(array: &Array<V>, mut key_fn: F) -> Array<V>
where
    V: Clone,
    K: PartialEq,
    F: FnMut(&V) -> K,
{
    let mut seen: Vec<K> = Vec::new();
    let mut result = Array::new();
    for (key, value) in array.iter() {
        let id = key_fn(value);
        if !seen.contains(&id) {
            seen.push(id);
            result.insert(key.clone(), value.clone());
        }
    }
    result
}

fn string_forms<'a, V, I>(others: I) -> Vec<AHashSet<String>>
where
    V: Clone + LooseEq + 'a,
    I: IntoIterator<Item = &'a Array<V>>,
{
    others
        .into_iter()
        .map(|other| other.values().map(LooseEq::string_form).collect())
        .collect()
}

/// diff - othersのいずれにも含まれない値を残す（キーは保持）
///
/// 値は文字列化して比較するので、`1`と`"1"`は同じ値として扱う。
pub fn diff<'a, V, I>(array: &Array<V>, others: I) -> Array<V>
where
    V: Clone + LooseEq + 'a,
    I: IntoIterator<Item = &'a Array<V>>,
{
    let excluded: AHashSet<String> = string_forms(others).into_iter().flatten().collect();
    array
        .iter()
        .filter(|(_, v)| !excluded.contains(&v.string_form()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// intersect - othersの全てに含まれる値を残す（キーは保持）
///
/// 比較はdiffと同じく文字列化した値で行う。
pub fn intersect<'a, V, I>(array: &Array<V>, others: I) -> Array<V>
where
    V: Clone + LooseEq + 'a,
    I: IntoIterator<Item = &'a Array<V>>,
{
    let required = string_forms(others);
    array
        .iter()
        .filter(|(_, v)| {
            let form = v.string_form();
            required.iter().all(|set| set.contains(&form))
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// diff_using - 比較関数がEqualを返す要素がotherにない値を残す
pub fn diff_using<V, F>(array: &Array<V>, other: &Array<V>, mut comparator: F) -> Array<V>
where
    V: Clone,
    F: FnMut(&V, &V) -> Ordering,
{
    array
        .iter()
        .filter(|(_, v)| !other.values().any(|o| comparator(*v, o) == Ordering::Equal))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// intersect_using - 比較関数がEqualを返す要素がotherにある値を残す
pub fn intersect_using<V, F>(array: &Array<V>, other: &Array<V>, mut comparator: F) -> Array<V>
where
    V: Clone,
    F: FnMut(&V, &V) -> Ordering,
{
    array
        .iter()
        .filter(|(_, v)| other.values().any(|o| comparator(*v, o) == Ordering::Equal))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// intersect_keys - othersの全てに存在するキーの要素を残す
pub fn intersect_keys<'a, V, W, I>(array: &Array<V>, others: I) -> Array<V>
where
    V: Clone,
    W: Clone + 'a,
    I: IntoIterator<Item = &'a Array<W>>,
{
    let others: Vec<&Array<W>> = others.into_iter().collect();
    array
        .iter()
        .filter(|(k, _)| others.iter().all(|o| o.contains_key(*k)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
