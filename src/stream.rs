//! 遅延ストリーム
//!
//! （キー, 値）の組を1つずつ取り出す前方専用の列。派生ストリーム（sfilter、smap等）は
//! 取り出されるまで上流から何も読まない。
//!
//! 状態は NotStarted → InProgress → Exhausted の3つ。一度きりのソースを二度走査すると
//! 空や途中からの結果を返さずにConsumedSequenceエラーになる。再開可能なソース
//! （`from_array`、`restartable`）と、それだけから派生したストリームは何度でも走査できる。

mod ops;
mod source;

pub use ops::*;
pub use source::{Cursor, Pairs, StreamState};

use crate::array::Array;
use crate::error::Result;
use crate::key::Key;
use parking_lot::Mutex;
use source::{Factory, Shared, Source};
use std::fmt;
use std::sync::Arc;

/// 遅延ストリームのハンドル
///
/// clone()は同じソースを共有する（一度きりのソースなら走査も共有される）。
pub struct Stream<'a, V> {
    shared: Arc<Mutex<Shared<'a, V>>>,
}

impl<'a, V> Clone for Stream<'a, V> {
    fn clone(&self) -> Self {
        Stream {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<'a, V: Send + 'a> Stream<'a, V> {
    pub(crate) fn from_factory(factory: Factory<'a, V>) -> Self {
        Stream {
            shared: Shared::new(Source::Restartable(factory)),
        }
    }

    pub(crate) fn from_pairs(pairs: Pairs<'a, V>) -> Self {
        Stream {
            shared: Shared::new(Source::Once(Some(pairs))),
        }
    }

    /// 走査のたびにfactoryを呼び直す、再開可能なストリーム
    pub fn restartable<F, I, K>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'a,
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: Send + 'a,
        K: Into<Key>,
    {
        Self::from_factory(Arc::new(move || -> Pairs<'a, V> {
            Box::new(factory().into_iter().map(|(k, v)| Ok((k.into(), v))))
        }))
    }

    /// 一度しか走査できないストリーム（ジェネレータ相当）
    pub fn once<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: Send + 'a,
        K: Into<Key>,
    {
        Self::from_pairs(Box::new(
            pairs.into_iter().map(|(k, v)| Ok((k.into(), v))),
        ))
    }

    /// 値だけの列から、0からの連番キーで一度きりのストリームを作る
    pub fn once_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: Send + 'a,
    {
        Self::from_pairs(Box::new(
            (0i64..).zip(values).map(|(k, v)| Ok((Key::Int(k), v))),
        ))
    }

    /// 空のストリーム（再開可能）
    pub fn empty() -> Self {
        Self::from_factory(Arc::new(|| -> Pairs<'a, V> { Box::new(std::iter::empty()) }))
    }

    /// 配列のスナップショットから再開可能なストリームを作る
    pub fn from_array(array: &Array<V>) -> Self
    where
        V: Clone + Sync,
    {
        let snapshot = array.clone();
        Self::from_factory(Arc::new(move || -> Pairs<'a, V> {
            Box::new(snapshot.clone().into_iter().map(Ok))
        }))
    }

    pub fn state(&self) -> StreamState {
        self.shared.lock().state
    }

    pub fn is_restartable(&self) -> bool {
        matches!(self.shared.lock().source, Source::Restartable(_))
    }

    /// 走査を開始する
    pub fn cursor(&self) -> Result<Cursor<'a, V>> {
        source::open(&self.shared)
    }

    /// 最後まで読んで配列にする（キーを保持、重複キーは後の値で上書き）
    pub fn to_array(&self) -> Result<Array<V>>
    where
        V: Clone,
    {
        let mut result = Array::new();
        for item in self.cursor()? {
            let (key, value) = item?;
            result.insert(key, value);
        }
        Ok(result)
    }

    /// 最後まで読んで値だけの配列にする（連番キー）
    pub fn to_values(&self) -> Result<Array<V>>
    where
        V: Clone,
    {
        let mut result = Array::new();
        for item in self.cursor()? {
            let (_, value) = item?;
            result.push(value)?;
        }
        Ok(result)
    }
}

impl<'a, V> fmt::Debug for Stream<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.lock();
        let kind = match shared.source {
            Source::Once(_) => "once",
            Source::Restartable(_) => "restartable",
        };
        write!(f, "Stream {{ source: {}, state: {} }}", kind, shared.state)
    }
}

/// ストリームのペア列に変換できる値（scollectのコールバックの戻り値など）
pub trait IntoPairs<'a, V> {
    fn into_pairs(self) -> Pairs<'a, V>;
}

impl<'a, V: Send + 'a> IntoPairs<'a, V> for Stream<'a, V> {
    /// 最初に取り出されたときに走査を開始する
    fn into_pairs(self) -> Pairs<'a, V> {
        Box::new(
            std::iter::once_with(move || -> Pairs<'a, V> {
                match self.cursor() {
                    Ok(cursor) => Box::new(cursor),
                    Err(e) => Box::new(std::iter::once(Err(e))),
                }
            })
            .flatten(),
        )
    }
}

impl<'a, V: Clone + Send + Sync + 'a> IntoPairs<'a, V> for Array<V> {
    fn into_pairs(self) -> Pairs<'a, V> {
        Box::new(self.into_iter().map(Ok))
    }
}

impl<'a, K, V> IntoPairs<'a, V> for Vec<(K, V)>
where
    K: Into<Key> + Send + 'a,
    V: Send + 'a,
{
    fn into_pairs(self) -> Pairs<'a, V> {
        Box::new(self.into_iter().map(|(k, v)| Ok((k.into(), v))))
    }
}
