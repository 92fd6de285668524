//! 配列キー
//!
//! 配列のキーは整数か文字列のどちらか。10進の整数表記として正規な文字列
//! （"42", "-7"。"042"や"-0"は除く）は整数キーに正規化される。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 配列キー
///
/// `Ord`は整数キーを文字列キーより前に並べる（sort_keysの順序）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// 文字列からキーを作る（正規な整数表記は整数キーになる）
    pub fn parse(s: &str) -> Key {
        match canonical_int(s) {
            Some(n) => Key::Int(n),
            None => Key::Str(s.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }
}

/// 正規な10進整数表記ならi64に変換
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // 先頭ゼロと"-0"は文字列のまま
    if (digits.len() > 1 && digits.starts_with('0')) || s == "-0" {
        return None;
    }
    s.parse::<i64>().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(i64::from(n))
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Int(i64::from(b))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::parse(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(n) => Key::Int(n),
            None => Key::Str(s),
        }
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

/// 要素を配列キーに変換する能力
///
/// flip, index_by, combine, column, group_by, collect_with_keys が使う。
pub trait ToKey {
    /// キーにできなければNone
    fn to_key(&self) -> Option<Key>;

    /// エラーメッセージ用の型名
    fn key_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl ToKey for Key {
    fn to_key(&self) -> Option<Key> {
        Some(self.clone())
    }

    fn key_type_name(&self) -> &'static str {
        "key"
    }
}

impl ToKey for i64 {
    fn to_key(&self) -> Option<Key> {
        Some(Key::Int(*self))
    }
}

impl ToKey for i32 {
    fn to_key(&self) -> Option<Key> {
        Some(Key::from(*self))
    }
}

impl ToKey for usize {
    fn to_key(&self) -> Option<Key> {
        Some(Key::from(*self))
    }
}

impl ToKey for bool {
    fn to_key(&self) -> Option<Key> {
        Some(Key::from(*self))
    }
}

impl ToKey for f64 {
    /// 小数部は切り捨て。NaN・無限大はキーにできない
    fn to_key(&self) -> Option<Key> {
        if self.is_finite() {
            Some(Key::Int(self.trunc() as i64))
        } else {
            None
        }
    }
}

impl ToKey for str {
    fn to_key(&self) -> Option<Key> {
        Some(Key::parse(self))
    }

    fn key_type_name(&self) -> &'static str {
        "string"
    }
}

impl ToKey for String {
    fn to_key(&self) -> Option<Key> {
        Some(Key::parse(self))
    }

    fn key_type_name(&self) -> &'static str {
        "string"
    }
}

impl<T: ToKey + ?Sized> ToKey for &T {
    fn to_key(&self) -> Option<Key> {
        (**self).to_key()
    }

    fn key_type_name(&self) -> &'static str {
        (**self).key_type_name()
    }
}

impl<T: ToKey> ToKey for Option<T> {
    /// Noneは空文字列キー
    fn to_key(&self) -> Option<Key> {
        match self {
            Some(v) => v.to_key(),
            None => Some(Key::Str(String::new())),
        }
    }

    fn key_type_name(&self) -> &'static str {
        match self {
            Some(v) => v.key_type_name(),
            None => "null",
        }
    }
}
