//! ストリームのソースとライフサイクル

use crate::error::{Result, TsumikiError};
use crate::key::Key;
use crate::log::{self, LogLevel};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// ストリームが1回の走査で生成する（キー, 値）の列
///
/// 要素ごとに失敗しうる（上流の消費済みエラーや、展開できない要素）。
pub type Pairs<'a, V> = Box<dyn Iterator<Item = Result<(Key, V)>> + Send + 'a>;

/// 走査のたびに新しいペア列を作るファクトリ
pub(crate) type Factory<'a, V> = Arc<dyn Fn() -> Pairs<'a, V> + Send + Sync + 'a>;

/// ストリームの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// まだ一度も走査されていない
    NotStarted,
    /// 走査中（途中まで読まれた）
    InProgress,
    /// 最後まで読まれた
    Exhausted,
}

impl StreamState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamState::NotStarted => "not started",
            StreamState::InProgress => "in progress",
            StreamState::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub(crate) enum Source<'a, V> {
    /// 一度しか走査できないソース（取り出し済みならNone）
    Once(Option<Pairs<'a, V>>),
    /// 何度でも最初から走査できるソース
    Restartable(Factory<'a, V>),
}

pub(crate) struct Shared<'a, V> {
    pub(crate) source: Source<'a, V>,
    pub(crate) state: StreamState,
}

impl<'a, V> Shared<'a, V> {
    pub(crate) fn new(source: Source<'a, V>) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Shared {
            source,
            state: StreamState::NotStarted,
        }))
    }
}

/// 走査を開始してカーソルを返す
///
/// 一度きりのソースで既に走査が始まっていればConsumedSequenceエラー。
pub(crate) fn open<'a, V>(shared: &Arc<Mutex<Shared<'a, V>>>) -> Result<Cursor<'a, V>> {
    let mut guard = shared.lock();
    let state = guard.state;

    let pairs = match &mut guard.source {
        Source::Restartable(factory) => factory(),
        Source::Once(slot) => match slot.take() {
            Some(pairs) if state == StreamState::NotStarted => pairs,
            _ => {
                log::warn(
                    "attempt to traverse a consumed stream",
                    &[("state", state.to_string())],
                );
                return Err(TsumikiError::consumed_sequence(state.as_str()));
            }
        },
    };

    guard.state = StreamState::InProgress;
    if log::enabled(LogLevel::Debug) {
        log::debug(
            "stream started",
            &[(
                "restartable",
                matches!(guard.source, Source::Restartable(_)).to_string(),
            )],
        );
    }

    Ok(Cursor {
        pairs,
        shared: Arc::clone(shared),
        finished: false,
    })
}

/// ストリームの1回分の走査
///
/// 最後まで読み切るとストリームの状態をExhaustedにする。
pub struct Cursor<'a, V> {
    pairs: Pairs<'a, V>,
    shared: Arc<Mutex<Shared<'a, V>>>,
    finished: bool,
}

impl<'a, V> Iterator for Cursor<'a, V> {
    type Item = Result<(Key, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.pairs.next() {
            Some(item) => Some(item),
            None => {
                self.finished = true;
                self.shared.lock().state = StreamState::Exhausted;
                if log::enabled(LogLevel::Debug) {
                    log::debug("stream exhausted", &[]);
                }
                None
            }
        }
    }
}

impl<'a, V> fmt::Debug for Cursor<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor {{ finished: {} }}", self.finished)
    }
}
