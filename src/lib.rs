//! tsumiki - 関数型のコレクション操作
//!
//! 順序付きキー・値配列（`Array`）への即時評価の操作（`functional`）と、
//! 同じ語彙の遅延評価版（`stream`）を提供する。
//!
//! ```
//! use tsumiki::{array, functional, stream, Stream};
//!
//! let scores = array! { "alice" => 3, "bob" => 0, "carol" => 5 };
//! let passed = functional::filter(&scores);
//! assert_eq!(functional::keys(&passed).len(), 2);
//!
//! let lazy = stream::smap(Stream::from_array(&scores), |v, _| v * 2);
//! assert_eq!(stream::sreduce(lazy, |acc, v, _| acc + v, 0).unwrap(), 16);
//! ```

pub mod array;
pub mod config;
pub mod constants;
pub mod equality;
pub mod error;
pub mod functional;
pub mod i18n;
pub mod key;
pub mod log;
pub mod stream;
pub mod value;

pub use array::Array;
pub use config::Config;
pub use equality::{AsArray, LooseEq, Strictness, Truthy};
pub use error::{ErrorCode, ErrorKind, Result, TsumikiError};
pub use functional::{Group, GroupSpec, IntoGroupKeys, Step};
pub use key::{Key, ToKey};
pub use stream::{Cursor, IntoPairs, Stream, StreamState};
pub use value::Value;

// ========================================
// システム共通型定義
// ========================================

use ahash::RandomState;

/// tsumiki内部のHashMap型（im::HashMapにahashを適用）
pub type HashMap<K, V> = im::HashMap<K, V, RandomState>;

/// HashMapを作成するヘルパー関数
#[inline]
pub fn new_hashmap<K, V>() -> HashMap<K, V> {
    im::HashMap::with_hasher(RandomState::new())
}
