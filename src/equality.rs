//! 要素に求める能力（真偽値判定・緩い比較・配列としての参照）と、
//! unique系が使う「既出」集合

use crate::array::Array;
use crate::key::Key;

/// 述語なしのall/some/filterが使う真偽値判定
///
/// 偽になるのは null、false、数値の0、空文字列、"0"、空の配列。
/// "0.0"や" "は真。
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for i32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for usize {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for f64 {
    /// 0.0と-0.0が偽（NaNは真）
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty() && self != "0"
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        self.as_str().is_truthy()
    }
}

impl Truthy for Key {
    fn is_truthy(&self) -> bool {
        match self {
            Key::Int(n) => n.is_truthy(),
            Key::Str(s) => s.is_truthy(),
        }
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    /// Noneはnull扱い
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<V: Clone> Truthy for Array<V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// ホスト言語ネイティブの比較
///
/// `loose_eq`は型変換を伴う緩い等価比較、`string_form`は文字列化。
/// diff/intersectは`string_form`同士、緩いscontains/suniqueは`loose_eq`で比較する。
pub trait LooseEq {
    fn loose_eq(&self, other: &Self) -> bool;

    fn string_form(&self) -> String;
}

macro_rules! impl_loose_eq_display {
    ($($t:ty),*) => {
        $(
            impl LooseEq for $t {
                fn loose_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn string_form(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_loose_eq_display!(i64, i32, usize, char, String, Key);

impl LooseEq for bool {
    fn loose_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn string_form(&self) -> String {
        if *self { "1".to_string() } else { String::new() }
    }
}

impl LooseEq for f64 {
    fn loose_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn string_form(&self) -> String {
        crate::value::float_string_form(*self)
    }
}

impl LooseEq for &str {
    fn loose_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn string_form(&self) -> String {
        (*self).to_string()
    }
}

/// 要素を入れ子の配列として見る能力
///
/// flatten、map_spread、each_spread、column、sflattenが使う。
/// 配列でない要素はNoneを返し、呼び出し側が引数エラーにする。
pub trait AsArray<E: Clone> {
    fn as_array(&self) -> Option<Array<E>>;

    /// エラーメッセージ用の型名
    fn array_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<E: Clone> AsArray<E> for Array<E> {
    fn as_array(&self) -> Option<Array<E>> {
        Some(self.clone())
    }

    fn array_type_name(&self) -> &'static str {
        "array"
    }
}

impl<E: Clone> AsArray<E> for Vec<E> {
    fn as_array(&self) -> Option<Array<E>> {
        Some(Array::from_values(self.iter().cloned()))
    }

    fn array_type_name(&self) -> &'static str {
        "vec"
    }
}

/// 比較の厳密さ（scontains、sunique）
///
/// 既定は`Strict`。即時評価の`contains`/`unique`と同じ構造的な比較になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strictness {
    /// 構造的な等価性（`PartialEq`）
    #[default]
    Strict,
    /// 緩い比較（`LooseEq::loose_eq`）
    Loose,
}

/// 緩い比較で最初の出現を判定する「既出」集合
///
/// 緩い比較はハッシュと両立しないため線形走査（要素数nに対しO(n²)）。
/// 厳密な判定は`AHashSet`をそのまま使う。
pub(crate) struct LooseSeenSet<T> {
    seen: Vec<T>,
}

impl<T: LooseEq> LooseSeenSet<T> {
    pub(crate) fn new() -> Self {
        LooseSeenSet { seen: Vec::new() }
    }

    /// 未出なら記録してtrueを返す
    pub(crate) fn insert(&mut self, item: T) -> bool {
        if self.seen.iter().any(|s| s.loose_eq(&item)) {
            false
        } else {
            self.seen.push(item);
            true
        }
    }
}

/// 既出集合に含まれるか（厳密なら`PartialEq`、緩いなら`loose_eq`）
pub(crate) fn matches<T: PartialEq + LooseEq>(a: &T, b: &T, strictness: Strictness) -> bool {
    match strictness {
        Strictness::Strict => a == b,
        Strictness::Loose => a.loose_eq(b),
    }
}
