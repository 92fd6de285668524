//! 配列操作 - キー操作関数

use crate::array::Array;
use crate::equality::AsArray;
use crate::error::{Result, TsumikiError};
use crate::key::{Key, ToKey};
use crate::log;

/// 値をキーに変換（変換できなければDataIntegrityエラー）
fn require_key<T: ToKey + ?Sized>(op: &str, value: &T) -> Result<Key> {
    value.to_key().ok_or_else(|| {
        log::debug(
            "invalid array key",
            &[
                ("op", op.to_string()),
                ("type", value.key_type_name().to_string()),
            ],
        );
        TsumikiError::invalid_key(op, value.key_type_name())
    })
}

/// keys - キーの配列（連番）
pub fn keys<V: Clone>(array: &Array<V>) -> Array<Key> {
    Array::from_values(array.keys().cloned())
}

/// values - 値の配列（連番に振り直す）
pub fn values<V: Clone>(array: &Array<V>) -> Array<V> {
    Array::from_values(array.values().cloned())
}

/// flip - キーと値を入れ替える
///
/// 同じ値が複数あれば後のキーが残る（位置は最初の出現）。値がキーにできなければエラー。
pub fn flip<V: Clone + ToKey>(array: &Array<V>) -> Result<Array<Key>> {
    let mut result = Array::new();
    for (key, value) in array.iter() {
        result.insert(require_key("flip", value)?, key.clone());
    }
    Ok(result)
}

/// index_by - key_fn(value)をキーにした配列（後の要素が上書き）
pub fn index_by<V, K, F>(array: &Array<V>, mut key_fn: F) -> Result<Array<V>>
where
    V: Clone,
    K: ToKey,
    F: FnMut(&V) -> K,
{
    let mut result = Array::new();
    for value in array.values() {
        let key = require_key("index_by", &key_fn(value))?;
        result.insert(key, value.clone());
    }
    Ok(result)
}

/// combine - keysの値をキー、valuesの値を値とする配列
///
/// 要素数が異なるか、どちらかが空なら引数エラー。
pub fn combine<K, V>(keys: &Array<K>, values: &Array<V>) -> Result<Array<V>>
where
    K: Clone + ToKey,
    V: Clone,
{
    if keys.len() != values.len() || keys.is_empty() {
        return Err(TsumikiError::combine_mismatch(keys.len(), values.len()));
    }

    let mut result = Array::new();
    for (key, value) in keys.values().zip(values.values()) {
        result.insert(require_key("combine", key)?, value.clone());
    }
    Ok(result)
}

/// column - 各レコードからcolumnの値を取り出す
///
/// `index`を指定すると、そのフィールドの値を結果のキーにする
/// （フィールドがないレコードは次の整数キーで追加）。
/// columnを持たないレコードは読み飛ばす。
pub fn column<V, E>(records: &Array<V>, column: Key, index: Option<Key>) -> Result<Array<E>>
where
    V: Clone + AsArray<E>,
    E: Clone + ToKey,
{
    let mut result = Array::new();
    for (key, record) in records.iter() {
        let fields = record.as_array().ok_or_else(|| {
            TsumikiError::not_an_array("column", &key.to_string(), record.array_type_name())
        })?;
        let Some(value) = fields.get(&column) else {
            continue;
        };

        match index.as_ref().and_then(|idx| fields.get(idx)) {
            Some(index_value) => {
                result.insert(require_key("column", index_value)?, value.clone());
            }
            None => {
                result.push(value.clone())?;
            }
        }
    }
    Ok(result)
}
