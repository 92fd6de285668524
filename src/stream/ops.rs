//! ストリーム操作関数
//!
//! 派生ストリームを返す関数（sfilter、smap等）は上流をまだ読まない。
//! 終端操作（sall、sreduce等）は必要な分だけ上流を読み、結果を返す。
//! 派生ストリームのコールバックは再走査のたびに呼び直されるため`Fn + Send + Sync`。

use super::source::{Cursor, Pairs};
use super::{IntoPairs, Stream};
use crate::equality::{self, AsArray, LooseEq, LooseSeenSet, Strictness, Truthy};
use crate::error::{Result, TsumikiError};
use crate::key::Key;
use ahash::AHashSet;
use std::hash::Hash;
use std::sync::Arc;

/// upstreamから派生したストリームを作る
///
/// buildは走査のたびに上流のカーソルを受け取ってペア列を作る。上流のカーソルは
/// 派生ストリームが最初に読まれたときに取得する。upstreamが再開可能なら派生も再開可能。
fn derived<'a, V, U, B>(upstream: Stream<'a, V>, build: B) -> Stream<'a, U>
where
    V: Send + 'a,
    U: Send + 'a,
    B: Fn(Cursor<'a, V>) -> Pairs<'a, U> + Send + Sync + 'a,
{
    let restartable = upstream.is_restartable();
    let build = Arc::new(build);
    let make = move || -> Pairs<'a, U> {
        let upstream = upstream.clone();
        let build = Arc::clone(&build);
        Box::new(
            std::iter::once_with(move || -> Pairs<'a, U> {
                match upstream.cursor() {
                    Ok(cursor) => build(cursor),
                    Err(e) => Box::new(std::iter::once(Err(e))),
                }
            })
            .flatten(),
        )
    };

    if restartable {
        Stream::from_factory(Arc::new(make))
    } else {
        Stream::from_pairs(make())
    }
}

/// sall - 全要素が真か（最初の偽で打ち切り）
pub fn sall<'a, V: Truthy + Send + 'a>(stream: Stream<'a, V>) -> Result<bool> {
    sall_by(stream, |v, _| v.is_truthy())
}

/// sall_by - 全要素が述語(value, key)を満たすか
pub fn sall_by<'a, V, F>(stream: Stream<'a, V>, mut predicate: F) -> Result<bool>
where
    V: Send + 'a,
    F: FnMut(&V, &Key) -> bool,
{
    for item in stream.cursor()? {
        let (key, value) = item?;
        if !predicate(&value, &key) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// ssome - いずれかの要素が真か（最初の真で打ち切り）
pub fn ssome<'a, V: Truthy + Send + 'a>(stream: Stream<'a, V>) -> Result<bool> {
    ssome_by(stream, |v, _| v.is_truthy())
}

/// ssome_by - いずれかの要素が述語(value, key)を満たすか
pub fn ssome_by<'a, V, F>(stream: Stream<'a, V>, mut predicate: F) -> Result<bool>
where
    V: Send + 'a,
    F: FnMut(&V, &Key) -> bool,
{
    for item in stream.cursor()? {
        let (key, value) = item?;
        if predicate(&value, &key) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// scollect - 各要素についてf(value, key)が返す列を、次の要素を読む前に全て流す
///
/// fが返したキーはそのまま残る（重複してもよい）。
pub fn scollect<'a, V, U, S, F>(stream: Stream<'a, V>, f: F) -> Stream<'a, U>
where
    V: Send + 'a,
    U: Send + 'a,
    S: IntoPairs<'a, U>,
    F: Fn(&V, &Key) -> S + Send + Sync + 'a,
{
    let f = Arc::new(f);
    derived(stream, move |cursor| -> Pairs<'a, U> {
        let f = Arc::clone(&f);
        Box::new(cursor.flat_map(move |item| -> Pairs<'a, U> {
            match item {
                Ok((key, value)) => f(&value, &key).into_pairs(),
                Err(e) => Box::new(std::iter::once(Err(e))),
            }
        }))
    })
}

/// sconcat - 複数のストリームを順につなげる（キーはそのまま）
///
/// 全てのストリームが再開可能なときだけ再開可能。
pub fn sconcat<'a, V: Send + 'a>(streams: Vec<Stream<'a, V>>) -> Stream<'a, V> {
    let restartable = streams.iter().all(Stream::is_restartable);
    let make = move || -> Pairs<'a, V> {
        Box::new(
            streams
                .clone()
                .into_iter()
                .flat_map(|stream| -> Pairs<'a, V> { stream.into_pairs() }),
        )
    };

    if restartable {
        Stream::from_factory(Arc::new(make))
    } else {
        Stream::from_pairs(make())
    }
}

/// scontains - valueと等しい要素があるか（見つかった時点で打ち切り）
pub fn scontains<'a, V>(stream: Stream<'a, V>, value: &V, strictness: Strictness) -> Result<bool>
where
    V: PartialEq + LooseEq + Send + 'a,
{
    ssome_by(stream, |item, _| equality::matches(item, value, strictness))
}

/// sfilter - 真の要素だけを流す（キーはそのまま）
pub fn sfilter<'a, V: Truthy + Send + 'a>(stream: Stream<'a, V>) -> Stream<'a, V> {
    sfilter_by(stream, |v, _| v.is_truthy())
}

/// sfilter_by - 述語(value, key)を満たす要素だけを流す
pub fn sfilter_by<'a, V, F>(stream: Stream<'a, V>, predicate: F) -> Stream<'a, V>
where
    V: Send + 'a,
    F: Fn(&V, &Key) -> bool + Send + Sync + 'a,
{
    let predicate = Arc::new(predicate);
    derived(stream, move |cursor| -> Pairs<'a, V> {
        let predicate = Arc::clone(&predicate);
        Box::new(cursor.filter(move |item| match item {
            Ok((key, value)) => predicate(value, key),
            Err(_) => true,
        }))
    })
}

/// sfirst - 最初の値（1要素だけ読む。空ならNone）
pub fn sfirst<'a, V: Send + 'a>(stream: Stream<'a, V>) -> Result<Option<V>> {
    match stream.cursor()?.next() {
        Some(item) => item.map(|(_, value)| Some(value)),
        None => Ok(None),
    }
}

/// slast - 最後の値（最後まで読む。空ならNone）
pub fn slast<'a, V: Send + 'a>(stream: Stream<'a, V>) -> Result<Option<V>> {
    let mut last = None;
    for item in stream.cursor()? {
        let (_, value) = item?;
        last = Some(value);
    }
    Ok(last)
}

/// sflatten - 各要素（配列）の中身を順に流す（内側のキーはそのまま）
///
/// 配列でない要素はその位置でエラーを流す。
pub fn sflatten<'a, V, E>(stream: Stream<'a, V>) -> Stream<'a, E>
where
    V: AsArray<E> + Send + 'a,
    E: Clone + Send + Sync + 'a,
{
    derived(stream, |cursor| -> Pairs<'a, E> {
        Box::new(cursor.flat_map(|item| -> Pairs<'a, E> {
            match item {
                Ok((key, value)) => match value.as_array() {
                    Some(inner) => inner.into_pairs(),
                    None => Box::new(std::iter::once(Err(TsumikiError::not_an_array(
                        "sflatten",
                        &key.to_string(),
                        value.array_type_name(),
                    )))),
                },
                Err(e) => Box::new(std::iter::once(Err(e))),
            }
        }))
    })
}

/// 成功した要素だけに0からの連番を振る
fn renumber<'a, T: Send + 'a>(
    items: impl Iterator<Item = Result<T>> + Send + 'a,
) -> Pairs<'a, T> {
    Box::new(items.scan(0i64, |next, item| {
        Some(item.map(|value| {
            let key = Key::Int(*next);
            *next += 1;
            (key, value)
        }))
    }))
}

/// skeys - キーを値として流す（連番キー）
pub fn skeys<'a, V: Send + 'a>(stream: Stream<'a, V>) -> Stream<'a, Key> {
    derived(stream, |cursor| renumber(cursor.map(|item| item.map(|(key, _)| key))))
}

/// svalues - 値を連番キーで流す
pub fn svalues<'a, V: Send + 'a>(stream: Stream<'a, V>) -> Stream<'a, V> {
    derived(stream, |cursor| {
        renumber(cursor.map(|item| item.map(|(_, value)| value)))
    })
}

/// smap - 各要素にf(value, key)を適用する（キーはそのまま）
pub fn smap<'a, V, U, F>(stream: Stream<'a, V>, f: F) -> Stream<'a, U>
where
    V: Send + 'a,
    U: Send + 'a,
    F: Fn(&V, &Key) -> U + Send + Sync + 'a,
{
    let f = Arc::new(f);
    derived(stream, move |cursor| -> Pairs<'a, U> {
        let f = Arc::clone(&f);
        Box::new(cursor.map(move |item| {
            item.map(|(key, value)| {
                let mapped = f(&value, &key);
                (key, mapped)
            })
        }))
    })
}

/// sreduce - reducer(accumulator, value, key)で左畳み込み
pub fn sreduce<'a, V, A, F>(stream: Stream<'a, V>, mut reducer: F, initial: A) -> Result<A>
where
    V: Send + 'a,
    F: FnMut(A, &V, &Key) -> A,
{
    let mut acc = initial;
    for item in stream.cursor()? {
        let (key, value) = item?;
        acc = reducer(acc, &value, &key);
    }
    Ok(acc)
}

/// soffset - 最初のn要素を読み捨て、残りを流す
///
/// 読み捨てる要素も実際に上流から取り出す（ソースの副作用はそのまま起きる）。
pub fn soffset<'a, V: Send + 'a>(stream: Stream<'a, V>, n: usize) -> Stream<'a, V> {
    derived(stream, move |cursor| -> Pairs<'a, V> {
        let mut remaining = n;
        Box::new(cursor.filter(move |item| {
            if item.is_ok() && remaining > 0 {
                remaining -= 1;
                false
            } else {
                true
            }
        }))
    })
}

/// sunique - 各値の最初の出現だけを流す（キーはそのまま）
///
/// 既出集合は読んだ分だけ大きくなる。Strictはハッシュ集合、Looseは線形走査。
pub fn sunique<'a, V>(stream: Stream<'a, V>, strictness: Strictness) -> Stream<'a, V>
where
    V: Clone + Hash + Eq + LooseEq + Send + 'a,
{
    match strictness {
        Strictness::Strict => sunique_by(stream, |v, _| v.clone()),
        Strictness::Loose => sunique_by_loose(stream, |v, _| v.clone()),
    }
}

/// sunique_by - key_fn(value, key)が最初に出現した要素だけを流す（厳密な比較）
pub fn sunique_by<'a, V, K, F>(stream: Stream<'a, V>, key_fn: F) -> Stream<'a, V>
where
    V: Send + 'a,
    K: Hash + Eq + Send + 'a,
    F: Fn(&V, &Key) -> K + Send + Sync + 'a,
{
    let key_fn = Arc::new(key_fn);
    derived(stream, move |cursor| -> Pairs<'a, V> {
        let key_fn = Arc::clone(&key_fn);
        let mut seen = AHashSet::new();
        Box::new(cursor.filter(move |item| match item {
            Ok((key, value)) => seen.insert(key_fn(value, key)),
            Err(_) => true,
        }))
    })
}

/// sunique_by_loose - sunique_byの緩い比較版（`LooseEq`、線形走査）
pub fn sunique_by_loose<'a, V, K, F>(stream: Stream<'a, V>, key_fn: F) -> Stream<'a, V>
where
    V: Send + 'a,
    K: LooseEq + Send + 'a,
    F: Fn(&V, &Key) -> K + Send + Sync + 'a,
{
    let key_fn = Arc::new(key_fn);
    derived(stream, move |cursor| -> Pairs<'a, V> {
        let key_fn = Arc::clone(&key_fn);
        let mut seen = LooseSeenSet::new();
        Box::new(cursor.filter(move |item| match item {
            Ok((key, value)) => seen.insert(key_fn(value, key)),
            Err(_) => true,
        }))
    })
}
