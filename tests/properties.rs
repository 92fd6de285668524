//! 配列操作・ストリーム操作の性質テスト
//!
//! 代表的な入力で、即時評価と遅延評価が同じ結果になることなどを確認する。
//! 実行方法: cargo test --test properties

use tsumiki::functional::{
    all, collect_with_keys, combine, contains, filter_by, group_by, keys, map, some, unique,
    values, window,
};
use tsumiki::stream::{sall, scontains, sfilter_by, smap, ssome, sunique};
use tsumiki::{array, Array, ErrorKind, Group, GroupSpec, Key, Stream, Strictness, Value};

/// 整数キーと文字列キーが混在する入力
fn mixed_inputs() -> Vec<Array<i64>> {
    vec![
        Array::new(),
        array![1, 2, 3, 4, 5, 6, 7, 8, 9],
        array! { "a" => 10, 5 => 11, "b" => 12, 9 => 13 },
        array! { -3 => 3, "x" => 0, 100 => 6, "y" => -9 },
    ]
}

#[test]
fn test_values_is_idempotent() {
    for input in mixed_inputs() {
        let once = values(&input);
        assert_eq!(values(&once), once);
        assert_eq!(once.len(), input.len());
    }
}

#[test]
fn test_map_filter_fusion_matches_streams() {
    fn keep(v: &i64) -> bool {
        v % 3 != 0
    }
    fn square(v: &i64) -> i64 {
        v * v
    }

    for input in mixed_inputs() {
        let eager = values(&map(&filter_by(&input, |v, _| keep(v)), square));

        let lazy = smap(
            sfilter_by(Stream::from_array(&input), |v, _| keep(v)),
            |v, _| square(v),
        )
        .to_values()
        .unwrap();

        assert_eq!(eager, lazy);
    }
}

#[test]
fn test_combine_splits_back_into_keys_and_values() {
    let key_sets: Vec<Array<Key>> = vec![
        array![Key::from("x"), Key::from(7), Key::from("10")],
        array![Key::from(0)],
        array! { "k" => Key::from("first"), "l" => Key::from("second") },
    ];
    let value_sets: Vec<Array<Value>> = vec![
        array![Value::Int(1), Value::from("two"), Value::Null],
        array![Value::Bool(true)],
        array! { 3 => Value::Float(1.5), 4 => Value::list([1, 2]) },
    ];

    for (k, v) in key_sets.iter().zip(&value_sets) {
        let combined = combine(k, v).unwrap();
        assert_eq!(keys(&combined), values(k));
        assert_eq!(values(&combined), values(v));
    }
}

#[test]
fn test_window_bounds() {
    let letters = array!["a", "b", "c", "d", "e"];

    let singles = window(&letters, 1).unwrap();
    assert_eq!(singles.len(), 5);
    assert!(singles.values().all(|w| w.len() == 1));
    assert_eq!(singles.get(4), Some(&array!["e"]));

    let whole = window(&letters, 5).unwrap();
    assert_eq!(whole, array![letters.clone()]);

    for width in [0, 6] {
        let err = window(&letters, width).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_unique_keeps_first_occurrence_keys() {
    assert_eq!(
        unique(&array![1, 1, 3, 1, 2, 1]),
        array! { 0 => 1, 2 => 3, 4 => 2 }
    );
}

#[test]
fn test_collect_with_keys_fails_without_partial_result() {
    let result = collect_with_keys(&array![1, 2, 3, 4, 5], |v, _| {
        if v % 2 == 0 {
            vec![(0, v * 2)]
        } else {
            vec![]
        }
    });
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

fn category(record: &(char, i64), _: &Key) -> String {
    record.0.to_string()
}

fn parity(record: &(char, i64), _: &Key) -> String {
    if record.1 % 2 == 0 {
        "even".to_string()
    } else {
        "odd".to_string()
    }
}

#[test]
fn test_nested_group_by_equals_regrouping_each_leaf() {
    let records = array! {
        "r1" => ('a', 1),
        "r2" => ('b', 2),
        "r3" => ('a', 4),
        "r4" => ('c', 5),
        "r5" => ('b', 7),
        "r6" => ('a', 9),
    };

    for preserve_keys in [true, false] {
        let nested = group_by(
            &records,
            &GroupSpec::single(category).then(parity),
            preserve_keys,
        )
        .unwrap();
        let top = group_by(&records, &GroupSpec::single(category), preserve_keys).unwrap();

        assert_eq!(nested.len(), top.len());
        for (key, group) in top.iter() {
            let members = group.as_leaf().unwrap();
            let regrouped = group_by(members, &GroupSpec::single(parity), preserve_keys).unwrap();
            assert_eq!(nested.get(key), Some(&Group::Nested(regrouped)));
        }
    }
}

#[test]
fn test_falsy_string_boundary_eager_and_lazy() {
    let with_zero_point_zero = array![Value::Bool(true), Value::from("0.0"), Value::Bool(true)];
    let with_zero = array![Value::Bool(true), Value::from("0"), Value::Bool(true)];

    assert!(all(&with_zero_point_zero));
    assert!(!all(&with_zero));
    assert!(sall(Stream::from_array(&with_zero_point_zero)).unwrap());
    assert!(!sall(Stream::from_array(&with_zero)).unwrap());

    let only_zero = array![Value::from("0"), Value::from("")];
    assert!(!some(&only_zero));
    assert!(!ssome(Stream::from_array(&only_zero)).unwrap());
}

#[test]
fn test_contains_and_unique_agree_eager_and_lazy() {
    let mixed = array![
        Value::Int(1),
        Value::from("1"),
        Value::Int(0),
        Value::Null,
        Value::list([1]),
        Value::Int(1),
        Value::from(""),
    ];

    for needle in [
        Value::from("1"),
        Value::Null,
        Value::Bool(false),
        Value::Float(1.0),
        Value::list([1]),
        Value::from("0"),
    ] {
        assert_eq!(
            contains(&mixed, &needle),
            scontains(Stream::from_array(&mixed), &needle, Strictness::default()).unwrap(),
            "contains disagrees for {}",
            needle
        );
    }

    assert_eq!(
        unique(&mixed),
        sunique(Stream::from_array(&mixed), Strictness::default())
            .to_array()
            .unwrap()
    );
}
