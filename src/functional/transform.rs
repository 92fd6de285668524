//! 配列操作 - 変換・走査関数

use crate::array::Array;
use crate::equality::AsArray;
use crate::error::{Result, TsumikiError};
use crate::key::Key;
use crate::value::Value;
use std::ops::ControlFlow;

/// eachのコールバックの戻り値が表す「続行/中断」
///
/// 中断するのは`false`（と`Value::Bool(false)`、`ControlFlow::Break`）だけで、
/// 0や空文字列のような他の偽の値では中断しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Break,
}

impl From<()> for Step {
    fn from(_: ()) -> Self {
        Step::Continue
    }
}

impl From<bool> for Step {
    fn from(b: bool) -> Self {
        if b {
            Step::Continue
        } else {
            Step::Break
        }
    }
}

impl From<Value> for Step {
    fn from(v: Value) -> Self {
        match v {
            Value::Bool(false) => Step::Break,
            _ => Step::Continue,
        }
    }
}

impl<B, C> From<ControlFlow<B, C>> for Step {
    fn from(flow: ControlFlow<B, C>) -> Self {
        match flow {
            ControlFlow::Continue(_) => Step::Continue,
            ControlFlow::Break(_) => Step::Break,
        }
    }
}

/// 各要素を配列として取り出し、末尾にキーを追加した引数列を作る
fn spread_args<V, E>(op: &str, key: &Key, value: &V) -> Result<Vec<E>>
where
    V: AsArray<E>,
    E: Clone + From<Key>,
{
    let items = value
        .as_array()
        .ok_or_else(|| TsumikiError::not_an_array(op, &key.to_string(), value.array_type_name()))?;
    let mut args: Vec<E> = items.values().cloned().collect();
    args.push(E::from(key.clone()));
    Ok(args)
}

/// map - 各値にfを適用する（キーは保持）
pub fn map<V, U, F>(array: &Array<V>, mut f: F) -> Array<U>
where
    V: Clone,
    U: Clone,
    F: FnMut(&V) -> U,
{
    array.iter().map(|(k, v)| (k.clone(), f(v))).collect()
}

/// map_with_key - 各要素にf(value, key)を適用する（キーは保持）
pub fn map_with_key<V, U, F>(array: &Array<V>, mut f: F) -> Array<U>
where
    V: Clone,
    U: Clone,
    F: FnMut(&V, &Key) -> U,
{
    array.iter().map(|(k, v)| (k.clone(), f(v, k))).collect()
}

/// map_spread - 各値（配列）の要素と、最後にキーを引数列としてfに渡す（キーは保持）
///
/// 配列でない値があれば引数エラー。
pub fn map_spread<V, E, U, F>(array: &Array<V>, mut f: F) -> Result<Array<U>>
where
    V: Clone + AsArray<E>,
    E: Clone + From<Key>,
    U: Clone,
    F: FnMut(&[E]) -> U,
{
    let mut result = Array::new();
    for (key, value) in array.iter() {
        let args = spread_args("map_spread", key, value)?;
        result.insert(key.clone(), f(args.as_slice()));
    }
    Ok(result)
}

/// each - 各要素にf(value, key)を順に適用する
///
/// fが`false`を返したところで打ち切る。入力配列をそのまま返す。
pub fn each<V, R, F>(array: &Array<V>, mut f: F) -> &Array<V>
where
    V: Clone,
    R: Into<Step>,
    F: FnMut(&V, &Key) -> R,
{
    for (key, value) in array.iter() {
        if f(value, key).into() == Step::Break {
            break;
        }
    }
    array
}

/// each_spread - map_spreadと同じ引数列でeachする
///
/// 全要素が配列であることを先に確認してから走査を始める。
pub fn each_spread<V, E, R, F>(array: &Array<V>, mut f: F) -> Result<&Array<V>>
where
    V: Clone + AsArray<E>,
    E: Clone + From<Key>,
    R: Into<Step>,
    F: FnMut(&[E]) -> R,
{
    let calls = array
        .iter()
        .map(|(key, value)| spread_args("each_spread", key, value))
        .collect::<Result<Vec<Vec<E>>>>()?;

    for args in &calls {
        if f(args.as_slice()).into() == Step::Break {
            break;
        }
    }
    Ok(array)
}

/// reduce - 左畳み込み（空配列ならinitialをそのまま返す）
pub fn reduce<V, A, F>(array: &Array<V>, mut reducer: F, initial: A) -> A
where
    V: Clone,
    F: FnMut(A, &V) -> A,
{
    array.values().fold(initial, |acc, v| reducer(acc, v))
}

/// reduce_with_key - reducer(accumulator, value, key)で左畳み込み
pub fn reduce_with_key<V, A, F>(array: &Array<V>, mut reducer: F, initial: A) -> A
where
    V: Clone,
    F: FnMut(A, &V, &Key) -> A,
{
    array.iter().fold(initial, |acc, (k, v)| reducer(acc, v, k))
}
