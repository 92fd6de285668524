//! 配列操作 - 構築関数

use crate::array::Array;
use crate::error::{Result, TsumikiError};
use std::ops::RangeInclusive;

/// startから始まるcount個の整数キーの範囲（i64を超えるならエラー）
fn key_range(op: &str, start: i64, count: usize) -> Result<Option<RangeInclusive<i64>>> {
    let Some(span) = count.checked_sub(1) else {
        return Ok(None);
    };
    i64::try_from(span)
        .ok()
        .and_then(|span| start.checked_add(span))
        .map(|last| Some(start..=last))
        .ok_or_else(|| TsumikiError::key_range_overflow(op, start, count))
}

/// fill - startから始まる連続した整数キーにcount個の同じ値を並べる
pub fn fill<V: Clone>(start: i64, count: usize, value: V) -> Result<Array<V>> {
    let mut result = Array::new();
    for key in key_range("fill", start, count)?.into_iter().flatten() {
        result.insert(key, value.clone());
    }
    Ok(result)
}

/// fill_with - arrayのstart..start+countのキーに、generator()の値を設定する
///
/// 既存のキーは位置を保ったまま上書きし、ないキーは末尾に追加する。
/// キーの範囲がi64を超えるときはgeneratorを呼ばずにエラー。
pub fn fill_with<V, F>(
    array: &Array<V>,
    start: i64,
    count: usize,
    mut generator: F,
) -> Result<Array<V>>
where
    V: Clone,
    F: FnMut() -> V,
{
    let keys = key_range("fill_with", start, count)?;
    let mut result = array.clone();
    for key in keys.into_iter().flatten() {
        result.insert(key, generator());
    }
    Ok(result)
}

/// zip - 各配列の同じ位置の値を行にまとめる
///
/// 行数は最も長い配列に合わせ、足りない位置は`V::default()`で埋める。
pub fn zip<'a, V, I>(arrays: I) -> Array<Array<V>>
where
    V: Clone + Default + 'a,
    I: IntoIterator<Item = &'a Array<V>>,
{
    let arrays: Vec<&Array<V>> = arrays.into_iter().collect();
    let rows = arrays.iter().map(|a| a.len()).max().unwrap_or(0);

    Array::from_values((0..rows).map(|pos| {
        Array::from_values(arrays.iter().map(|a| {
            a.entry_at(pos)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        }))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;
    use crate::error::ErrorKind;
    use crate::value::Value;

    #[test]
    fn test_fill() {
        assert_eq!(fill(5, 3, 'x').unwrap(), array! { 5 => 'x', 6 => 'x', 7 => 'x' });
        assert_eq!(fill(-2, 2, 0).unwrap(), array! { -2 => 0, -1 => 0 });
        assert!(fill(0, 0, 'x').unwrap().is_empty());
    }

    #[test]
    fn test_fill_at_key_limit() {
        assert_eq!(fill(i64::MAX, 1, 7).unwrap(), array! { i64::MAX => 7 });
        assert_eq!(
            fill(i64::MAX - 1, 2, 7).unwrap(),
            array! { i64::MAX - 1 => 7, i64::MAX => 7 }
        );
        assert!(fill(i64::MAX, 0, 7).unwrap().is_empty());

        let err = fill(i64::MAX, 2, 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(fill(0, usize::MAX, 7).is_err());

        let mut calls = 0;
        let err = fill_with(&array![1], i64::MAX, 3, || {
            calls += 1;
            0
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_fill_with_overwrites_and_extends() {
        let mut next = 0;
        let base = array! { 0 => 'a', 1 => 'b', "k" => 'c' };
        let letters = ['x', 'y', 'z'];
        let result = fill_with(&base, 1, 3, || {
            next += 1;
            letters[next - 1]
        })
        .unwrap();
        assert_eq!(
            result,
            array! { 0 => 'a', 1 => 'x', "k" => 'c', 2 => 'y', 3 => 'z' }
        );
        assert_eq!(base.get(1), Some(&'b'));
    }

    #[test]
    fn test_zip_pads_with_default() {
        let a = array![Value::Int(1), Value::Int(2)];
        let b = array![Value::from("a")];
        assert_eq!(
            zip([&a, &b]),
            array![
                array![Value::Int(1), Value::from("a")],
                array![Value::Int(2), Value::Null],
            ]
        );
    }
}
