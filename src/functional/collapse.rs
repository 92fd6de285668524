//! 配列操作 - 展開・結合関数

use crate::array::Array;
use crate::equality::AsArray;
use crate::error::{Result, TsumikiError};
use crate::key::{Key, ToKey};
use crate::log;

/// 配列を別の配列の末尾へマージする
///
/// 整数キーはnextからの連番で追加、文字列キーは既存の値を上書きする。
fn merge_into<V: Clone>(target: &mut Array<V>, source: &Array<V>, next: &mut i64) {
    for (key, value) in source.iter() {
        match key {
            Key::Int(_) => {
                target.insert(*next, value.clone());
                *next += 1;
            }
            Key::Str(_) => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// collect - 各要素についてf(value, key)が返すペア列を順に連結する
///
/// fが返したキーは捨て、結果は連番キーになる。
pub fn collect<V, K, U, I, F>(array: &Array<V>, mut f: F) -> Array<U>
where
    V: Clone,
    U: Clone,
    I: IntoIterator<Item = (K, U)>,
    F: FnMut(&V, &Key) -> I,
{
    let mut result = Array::new();
    let mut next = 0i64;
    for (key, value) in array.iter() {
        for (_, item) in f(value, key) {
            result.insert(next, item);
            next += 1;
        }
    }
    result
}

/// collect_with_keys - collectと同じだが、fが返したキーを保持する
///
/// キーが重複した場合（yield件数と異なるキー数が一致しない）はデータ損失としてエラー。
/// 配列キーにできないキーもエラー。どちらの場合も途中までの結果は返さない。
pub fn collect_with_keys<V, K, U, I, F>(array: &Array<V>, mut f: F) -> Result<Array<U>>
where
    V: Clone,
    U: Clone,
    K: ToKey,
    I: IntoIterator<Item = (K, U)>,
    F: FnMut(&V, &Key) -> I,
{
    let mut result = Array::new();
    let mut yielded = 0usize;

    for (key, value) in array.iter() {
        for (k, item) in f(value, key) {
            let Some(new_key) = k.to_key() else {
                log::debug(
                    "collect_with_keys: invalid yielded key",
                    &[("type", k.key_type_name().to_string())],
                );
                return Err(TsumikiError::invalid_yielded_key(k.key_type_name()));
            };
            result.insert(new_key, item);
            yielded += 1;
        }
    }

    if yielded != result.len() {
        log::debug(
            "collect_with_keys: duplicated keys",
            &[
                ("yielded", yielded.to_string()),
                ("distinct", result.len().to_string()),
            ],
        );
        return Err(TsumikiError::duplicated_keys(yielded, result.len()));
    }
    Ok(result)
}

/// flatten - 配列の配列を1段階だけ平坦化する
///
/// 整数キーは連番に振り直し、文字列キーは後の値で上書きする。
pub fn flatten<V, E>(arrays: &Array<V>) -> Result<Array<E>>
where
    V: Clone + AsArray<E>,
    E: Clone,
{
    let mut result = Array::new();
    let mut next = 0i64;
    for (key, value) in arrays.iter() {
        let inner = value.as_array().ok_or_else(|| {
            TsumikiError::not_an_array("flatten", &key.to_string(), value.array_type_name())
        })?;
        merge_into(&mut result, &inner, &mut next);
    }
    Ok(result)
}

/// concat - 複数の配列を順に連結する（flattenと同じキー規則）
pub fn concat<'a, V, I>(arrays: I) -> Array<V>
where
    V: Clone + 'a,
    I: IntoIterator<Item = &'a Array<V>>,
{
    let mut result = Array::new();
    let mut next = 0i64;
    for array in arrays {
        merge_into(&mut result, array, &mut next);
    }
    result
}
