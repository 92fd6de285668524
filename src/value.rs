use crate::array::Array;
use crate::equality::{AsArray, LooseEq, Truthy};
use crate::key::{Key, ToKey};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 動的な要素値
///
/// 型の混在した配列（数値と文字列とレコードが同居するデータ）を扱うための値。
/// `PartialEq`は型に厳密な構造的等価性で、`1`と`"1"`、`1`と`1.0`は等しくない。
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// null値
    #[default]
    Null,
    /// bool値
    Bool(bool),
    /// 整数
    Int(i64),
    /// 浮動小数点数
    Float(f64),
    /// 文字列
    String(String),
    /// 順序付き配列（入れ子のレコードもこれで表す）
    Array(Array<Value>),
}

impl Value {
    /// 0始まりの連番キーを持つ配列値を作る
    pub fn list<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Array(Array::from_values(items.into_iter().map(Into::into)))
    }

    /// 型名を取得（エラーメッセージ用）
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array_ref(&self) -> Option<&Array<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// キーで配列値の要素を取得（配列でなければNone）
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Value> {
        self.as_array_ref().and_then(|a| a.get(key))
    }

    /// 数値として比較するときの値（数値と数値形式の文字列）
    fn numeric(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// 型の並び順（Ordのタイブレーク用）
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Float(_) => 3,
            Value::String(_) => 4,
            Value::Array(_) => 5,
        }
    }

    /// JSON値に変換
    ///
    /// 0..nの連番キーだけを持つ配列はJSON配列、それ以外はオブジェクトになる。
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(a) if is_list(a) => {
                serde_json::Value::Array(a.values().map(Value::to_json).collect())
            }
            Value::Array(a) => serde_json::Value::Object(
                a.iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// キーが0から順に並んでいるか
fn is_list(array: &Array<Value>) -> bool {
    array
        .keys()
        .enumerate()
        .all(|(i, k)| k.as_int() == i64::try_from(i).ok())
}

/// 数値形式の文字列をパース（前後の空白可、inf/nanは数値扱いしない）
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty()
        || !trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        || !trimmed.bytes().any(|b| b.is_ascii_digit())
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// 文字列化で残す有効桁数
const FLOAT_PRECISION: usize = 14;

/// 浮動小数点数の文字列化
///
/// 有効数字14桁に丸め、末尾の0は落とす（整数値は小数点なし）。
/// 指数が-5以下か14以上なら`1.0E+20`の形。非有限値は大文字。
pub(crate) fn float_string_form(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, f);
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    if exp < -4 || exp >= FLOAT_PRECISION as i32 {
        let (head, tail) = digits.split_at(1);
        let tail = if tail.is_empty() { "0" } else { tail };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{}{}.{}E{}{}", sign, head, tail, exp_sign, exp.abs())
    } else if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        format!("{}0.{}{}", sign, zeros, digits)
    } else {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}{}", sign, digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}{}.{}", sign, &digits[..int_len], &digits[int_len..])
        }
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// NaN同士は等しく、NaNは他のどの数より大きい
fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// 型に厳密な構造的等価性（NaNはNaNと等しい）
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_eq(*a, *b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(f) => {
                // -0.0と0.0、全てのNaNを同じハッシュにする
                let canonical = if f.is_nan() {
                    f64::NAN
                } else if *f == 0.0 {
                    0.0
                } else {
                    *f
                };
                canonical.to_bits().hash(state);
            }
            Value::String(s) => s.hash(state),
            Value::Array(a) => a.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 全順序
///
/// 数値（整数・浮動小数点数）同士は数値として比較し、同値なら型順で決める。
/// それ以外は null < bool < 数値 < 文字列 < 配列。
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => float_cmp(*a, *b),
            (Value::Int(a), Value::Float(b)) => {
                float_cmp(*a as f64, *b).then(Ordering::Less)
            }
            (Value::Float(a), Value::Int(b)) => {
                float_cmp(*a, *b as f64).then(Ordering::Greater)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.iter().cmp(b.iter())),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Truthy for Value {
    /// null、false、0、0.0、""、"0"、空配列が偽
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => n.is_truthy(),
            Value::Float(f) => f.is_truthy(),
            Value::String(s) => s.is_truthy(),
            Value::Array(a) => a.is_truthy(),
        }
    }
}

impl LooseEq for Value {
    /// 型変換を伴う比較
    ///
    /// - boolやnullとの比較は両辺の真偽値で比較（null同士、nullと""は等しい）
    /// - 数値と数値形式の文字列は数値として比較
    /// - 配列同士は同じキーの要素を緩く比較（順序は問わない）
    fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
            (Value::Bool(_) | Value::Null, _) | (_, Value::Bool(_) | Value::Null) => {
                self.is_truthy() == other.is_truthy()
            }
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::String(a), Value::String(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
            (Value::Int(_) | Value::Float(_), Value::String(s))
            | (Value::String(s), Value::Int(_) | Value::Float(_)) => {
                let number = if matches!(self, Value::String(_)) { other } else { self };
                match (number.numeric(), parse_numeric(s)) {
                    (Some(x), Some(y)) => x == y,
                    _ => number.string_form() == *s,
                }
            }
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                matches!((self.numeric(), other.numeric()), (Some(x), Some(y)) if x == y)
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.loose_eq(w)))
            }
            _ => false,
        }
    }

    /// 文字列キャスト（null・falseは""、trueは"1"、配列は"Array"）
    fn string_form(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.string_form(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => float_string_form(*f),
            Value::String(s) => s.clone(),
            Value::Array(_) => "Array".to_string(),
        }
    }
}

impl ToKey for Value {
    /// nullは""、boolは0/1、浮動小数点数は切り捨て、配列はキーにできない
    fn to_key(&self) -> Option<Key> {
        match self {
            Value::Null => Some(Key::Str(String::new())),
            Value::Bool(b) => b.to_key(),
            Value::Int(n) => Some(Key::Int(*n)),
            Value::Float(f) => f.to_key(),
            Value::String(s) => Some(Key::parse(s)),
            Value::Array(_) => None,
        }
    }

    fn key_type_name(&self) -> &'static str {
        self.type_name()
    }
}

impl AsArray<Value> for Value {
    fn as_array(&self) -> Option<Array<Value>> {
        self.as_array_ref().cloned()
    }

    fn array_type_name(&self) -> &'static str {
        self.type_name()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", float_string_form(*n)),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, (k, v)) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} => {}", k, v)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(a) if is_list(a) => serializer.collect_seq(a.values()),
            Value::Array(a) => a.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(map) => Value::Array(Array::from_pairs(
                map.into_iter().map(|(k, v)| (Key::from(k), Value::from(v))),
            )),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array<Value>> for Value {
    fn from(a: Array<Value>) -> Self {
        Value::Array(a)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(n) => Value::Int(n),
            Key::Str(s) => Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;

    #[test]
    fn test_falsy_set() {
        let falsy = [
            Value::Null,
            Value::Bool(false),
            Value::Int(0),
            Value::Float(0.0),
            Value::Float(-0.0),
            Value::from(""),
            Value::from("0"),
            Value::Array(Array::new()),
        ];
        for v in &falsy {
            assert!(!v.is_truthy(), "{} should be falsy", v);
        }

        let truthy = [
            Value::from("0.0"),
            Value::from(" "),
            Value::from("false"),
            Value::Int(-1),
            Value::Float(0.1),
            Value::list([0]),
        ];
        for v in &truthy {
            assert!(v.is_truthy(), "{} should be truthy", v);
        }
    }

    #[test]
    fn test_strict_equality_is_type_strict() {
        assert_ne!(Value::Int(1), Value::from("1"));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::list([1, 2]), Value::list([1, 2]));
        assert_ne!(Value::list([1, 2]), Value::list([2, 1]));
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::Int(1).loose_eq(&Value::from("1")));
        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert!(Value::from("1e1").loose_eq(&Value::from("10")));
        assert!(Value::Null.loose_eq(&Value::Bool(false)));
        assert!(Value::Null.loose_eq(&Value::from("")));
        assert!(!Value::Null.loose_eq(&Value::from("0")));
        assert!(Value::Bool(true).loose_eq(&Value::from("a")));
        assert!(!Value::from("abc").loose_eq(&Value::Int(0)));
        assert!(!Value::from("1a").loose_eq(&Value::Int(1)));

        let a = Value::Array(array! { "x" => Value::Int(1), "y" => Value::from("2") });
        let b = Value::Array(array! { "y" => Value::Int(2), "x" => Value::from("1") });
        assert!(a.loose_eq(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_string_form() {
        assert_eq!(Value::Null.string_form(), "");
        assert_eq!(Value::Bool(true).string_form(), "1");
        assert_eq!(Value::Float(2.0).string_form(), "2");
        assert_eq!(Value::Float(2.5).string_form(), "2.5");
        assert_eq!(Value::list([1]).string_form(), "Array");
    }

    #[test]
    fn test_float_string_form_precision() {
        assert_eq!(float_string_form(0.1 + 0.2), "0.3");
        assert_eq!(float_string_form(1.0 / 3.0), "0.33333333333333");
        assert_eq!(float_string_form(-2.5), "-2.5");
        assert_eq!(float_string_form(1500.0), "1500");
        assert_eq!(float_string_form(0.0001), "0.0001");
        assert_eq!(float_string_form(0.00001), "1.0E-5");
        assert_eq!(float_string_form(1e20), "1.0E+20");
        assert_eq!(float_string_form(1.5e-7), "1.5E-7");
        assert_eq!(float_string_form(12345678901234.0), "12345678901234");
        assert_eq!(float_string_form(123456789012344.0), "1.2345678901234E+14");
        assert_eq!(float_string_form(f64::NEG_INFINITY), "-INF");
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![
            Value::from("b"),
            Value::Float(1.5),
            Value::Null,
            Value::Int(2),
            Value::Int(1),
            Value::Bool(true),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(1),
                Value::Float(1.5),
                Value::Int(2),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_to_key() {
        assert_eq!(Value::Null.to_key(), Some(Key::Str(String::new())));
        assert_eq!(Value::Bool(true).to_key(), Some(Key::Int(1)));
        assert_eq!(Value::Float(2.7).to_key(), Some(Key::Int(2)));
        assert_eq!(Value::from("5").to_key(), Some(Key::Int(5)));
        assert_eq!(Value::list([1]).to_key(), None);
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({"id": 1, "tags": ["a", "b"], "score": 1.5, "none": null});
        let value = Value::from(json.clone());
        assert_eq!(value.get("id"), Some(&Value::Int(1)));
        assert_eq!(value.get("tags"), Some(&Value::list(["a", "b"])));
        assert_eq!(value.to_json(), json);

        let serialized = serde_json::to_string(&Value::list([1, 2])).unwrap();
        assert_eq!(serialized, "[1,2]");
        let map = Value::Array(array! { 1 => Value::Int(1) });
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"1":1}"#);
    }
}
