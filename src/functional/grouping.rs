//! 配列操作 - グループ化
//!
//! group_byは1つの関数（`GroupSpec::Single`）か関数の列（`GroupSpec::Chain`）を受け取る。
//! 関数の列は先頭の関数でグループ化したあと、各グループを残りの関数で再帰的にグループ化する。

use crate::array::Array;
use crate::error::{Result, TsumikiError};
use crate::key::{Key, ToKey};
use crate::log;
use crate::value::Value;
use smallvec::{smallvec, SmallVec};

/// グループキーの列（ほとんどの要素は1グループにしか属さない）
pub type GroupKeys = SmallVec<[Key; 1]>;

/// グループ化関数
pub type GroupFn<'f, V, G> = Box<dyn Fn(&V, &Key) -> G + 'f>;

/// グループ化の指定
pub enum GroupSpec<'f, V, G> {
    Single(GroupFn<'f, V, G>),
    Chain(Vec<GroupFn<'f, V, G>>),
}

impl<'f, V, G> GroupSpec<'f, V, G> {
    pub fn single<F>(f: F) -> Self
    where
        F: Fn(&V, &Key) -> G + 'f,
    {
        GroupSpec::Single(Box::new(f))
    }

    /// 次の階層のグループ化関数を追加する
    pub fn then<F>(self, f: F) -> Self
    where
        F: Fn(&V, &Key) -> G + 'f,
    {
        let mut fns = match self {
            GroupSpec::Single(first) => vec![first],
            GroupSpec::Chain(fns) => fns,
        };
        fns.push(Box::new(f));
        GroupSpec::Chain(fns)
    }

    /// 入れ子の深さ
    pub fn depth(&self) -> usize {
        match self {
            GroupSpec::Single(_) => 1,
            GroupSpec::Chain(fns) => fns.len(),
        }
    }

    fn functions(&self) -> &[GroupFn<'f, V, G>] {
        match self {
            GroupSpec::Single(f) => std::slice::from_ref(f),
            GroupSpec::Chain(fns) => fns,
        }
    }
}

/// グループ化関数の戻り値をグループキー列に変換する
///
/// 1つのキーなら1グループ、列なら列挙した全てのグループに属する。
pub trait IntoGroupKeys {
    fn into_group_keys(self) -> Result<GroupKeys>;
}

fn single_key<T: ToKey + ?Sized>(value: &T) -> Result<GroupKeys> {
    match value.to_key() {
        Some(key) => Ok(smallvec![key]),
        None => Err(TsumikiError::invalid_key("group_by", value.key_type_name())),
    }
}

macro_rules! impl_into_group_keys_scalar {
    ($($t:ty),*) => {
        $(
            impl IntoGroupKeys for $t {
                fn into_group_keys(self) -> Result<GroupKeys> {
                    single_key(&self)
                }
            }
        )*
    };
}

impl_into_group_keys_scalar!(Key, i64, i32, usize, bool, String, &str);

impl<T: ToKey> IntoGroupKeys for Vec<T> {
    fn into_group_keys(self) -> Result<GroupKeys> {
        self.iter()
            .map(|item| {
                item.to_key()
                    .ok_or_else(|| TsumikiError::invalid_key("group_by", item.key_type_name()))
            })
            .collect()
    }
}

impl IntoGroupKeys for Value {
    /// 配列値なら各要素がグループキー
    fn into_group_keys(self) -> Result<GroupKeys> {
        match self {
            Value::Array(items) => items.values().cloned().collect::<Vec<_>>().into_group_keys(),
            other => single_key(&other),
        }
    }
}

/// グループ化の結果
#[derive(Debug, Clone, PartialEq)]
pub enum Group<V: Clone> {
    /// 最後の階層のグループ（メンバーの配列）
    Leaf(Array<V>),
    /// 次の階層のグループ
    Nested(Array<Group<V>>),
}

impl<V: Clone> Group<V> {
    pub fn as_leaf(&self) -> Option<&Array<V>> {
        match self {
            Group::Leaf(members) => Some(members),
            Group::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Array<Group<V>>> {
        match self {
            Group::Nested(groups) => Some(groups),
            Group::Leaf(_) => None,
        }
    }

    /// 入れ子のグループをキーで取得
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Group<V>> {
        self.as_nested().and_then(|groups| groups.get(key))
    }
}

/// group_by - 要素をグループ化する
///
/// `preserve_keys`がtrueならメンバーは元のキーを保持し、falseならグループ内の連番になる。
/// 入れ子の深さは`spec`の関数の数に等しい。
pub fn group_by<V, G>(
    array: &Array<V>,
    spec: &GroupSpec<'_, V, G>,
    preserve_keys: bool,
) -> Result<Array<Group<V>>>
where
    V: Clone,
    G: IntoGroupKeys,
{
    let fns = spec.functions();
    if fns.is_empty() {
        return Err(TsumikiError::empty_group_chain());
    }
    group_level(array, fns, preserve_keys).inspect_err(|e| {
        log::debug("group_by failed", &[("error", e.short())]);
    })
}

fn group_level<V, G>(
    array: &Array<V>,
    fns: &[GroupFn<'_, V, G>],
    preserve_keys: bool,
) -> Result<Array<Group<V>>>
where
    V: Clone,
    G: IntoGroupKeys,
{
    let Some((group_fn, rest)) = fns.split_first() else {
        return Err(TsumikiError::empty_group_chain());
    };

    let mut groups: Array<Array<V>> = Array::new();
    for (key, value) in array.iter() {
        for group_key in group_fn(value, key).into_group_keys()? {
            if !groups.contains_key(&group_key) {
                groups.insert(group_key.clone(), Array::new());
            }
            if let Some(members) = groups.get_mut(&group_key) {
                if preserve_keys {
                    members.insert(key.clone(), value.clone());
                } else {
                    members.push(value.clone())?;
                }
            }
        }
    }

    let mut result = Array::new();
    for (group_key, members) in groups {
        let group = if rest.is_empty() {
            Group::Leaf(members)
        } else {
            Group::Nested(group_level(&members, rest, preserve_keys)?)
        };
        result.insert(group_key, group);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;
    use crate::error::ErrorKind;

    fn people() -> Array<Value> {
        let person = |name: &str, city: &str, role: &str| {
            Value::Array(array! {
                "name" => Value::from(name),
                "city" => Value::from(city),
                "role" => Value::from(role),
            })
        };
        array![
            person("ann", "paris", "dev"),
            person("bob", "tokyo", "ops"),
            person("cid", "paris", "ops"),
            person("dan", "paris", "dev"),
        ]
    }

    fn field(name: &'static str) -> impl Fn(&Value, &Key) -> Value {
        move |v, _| v.get(name).cloned().unwrap_or_default()
    }

    #[test]
    fn test_single_group() {
        let spec = GroupSpec::single(|n: &i32, _: &Key| n % 2 == 0);
        let groups = group_by(&array![1, 2, 3, 4, 5], &spec, false).unwrap();
        assert_eq!(
            groups,
            array! {
                0 => Group::Leaf(array![1, 3, 5]),
                1 => Group::Leaf(array![2, 4]),
            }
        );
    }

    #[test]
    fn test_preserve_keys() {
        let spec = GroupSpec::single(|n: &i32, _: &Key| n % 2 == 0);
        let groups = group_by(&array![1, 2, 3], &spec, true).unwrap();
        assert_eq!(
            groups.get(0).and_then(Group::as_leaf),
            Some(&array! { 0 => 1, 2 => 3 })
        );
    }

    #[test]
    fn test_multiple_group_keys() {
        let spec = GroupSpec::single(|word: &&str, _: &Key| {
            word.chars().map(|c| c.to_string()).collect::<Vec<_>>()
        });
        let groups = group_by(&array!["ab", "b"], &spec, false).unwrap();
        assert_eq!(groups.get("a").and_then(Group::as_leaf), Some(&array!["ab"]));
        assert_eq!(
            groups.get("b").and_then(Group::as_leaf),
            Some(&array!["ab", "b"])
        );
    }

    #[test]
    fn test_chain_nests_per_function() {
        let spec = GroupSpec::single(field("city")).then(field("role"));
        assert_eq!(spec.depth(), 2);

        let groups = group_by(&people(), &spec, false).unwrap();
        let paris_devs = groups
            .get("paris")
            .and_then(|g| g.get("dev"))
            .and_then(Group::as_leaf)
            .map(|members| members.len());
        assert_eq!(paris_devs, Some(2));

        // 1段目の各グループを2段目の関数でグループ化したものと一致する
        let by_city = group_by(&people(), &GroupSpec::single(field("city")), false).unwrap();
        let by_role = GroupSpec::single(field("role"));
        for (city, group) in by_city.iter() {
            let members = group.as_leaf().unwrap();
            let expected = group_by(members, &by_role, false).unwrap();
            assert_eq!(groups.get(city).and_then(Group::as_nested), Some(&expected));
        }
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        let spec: GroupSpec<'_, i32, i64> = GroupSpec::Chain(Vec::new());
        let err = group_by(&array![1], &spec, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_invalid_group_key() {
        let spec = GroupSpec::single(|v: &Value, _: &Key| Value::list([v.clone(), Value::list([1])]));
        let err = group_by(&array![Value::Int(1)], &spec, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }
}
