//! 定数
//!
//! 実行時の状態は持たない。外部の静的解析ツールが参照するためのデータ。

/// 標準ライブラリの書き方と、代わりに使うtsumikiの関数の対応表
pub mod replacements {
    use crate::i18n::{fmt_msg, MsgKey};

    /// (標準ライブラリの書き方, tsumikiの関数)
    pub const TABLE: &[(&str, &str)] = &[
        ("Iterator::all", "all"),
        ("Iterator::any", "some"),
        ("slice::chunks", "chunk"),
        ("slice::windows", "window"),
        ("Iterator::flat_map", "collect"),
        ("Iterator::flatten", "flatten"),
        ("Iterator::chain", "concat"),
        ("slice::contains", "contains"),
        ("Vec::dedup", "unique"),
        ("Iterator::zip", "combine"),
        ("Iterator::for_each", "each"),
        ("std::iter::repeat", "fill"),
        ("Iterator::filter", "filter"),
        ("slice::first", "first"),
        ("slice::last", "last"),
        ("slice::split_last", "init"),
        ("slice::split_first", "tail"),
        ("Vec::pop", "init"),
        ("HashMap::keys", "keys"),
        ("HashMap::values", "values"),
        ("Iterator::map", "map"),
        ("Iterator::fold", "reduce"),
        ("Iterator::rev", "reverse"),
        ("slice::sort", "sort"),
        ("slice::sort_by", "sort_by"),
    ];

    /// nameに対応するtsumikiの関数名
    pub fn suggest(name: &str) -> Option<&'static str> {
        TABLE
            .iter()
            .find(|(native, _)| *native == name)
            .map(|(_, preferred)| *preferred)
    }

    /// 解析ツール向けの指摘メッセージ
    pub fn advice(name: &str) -> Option<String> {
        suggest(name).map(|preferred| fmt_msg(MsgKey::PreferFunction, &[name, preferred]))
    }
}

#[cfg(test)]
mod tests {
    use super::replacements;
    use crate::functional;

    #[test]
    fn test_suggest() {
        assert_eq!(replacements::suggest("Iterator::any"), Some("some"));
        assert_eq!(replacements::suggest("Vec::pop"), Some("init"));
        assert_eq!(replacements::suggest("Iterator::sum"), None);
    }

    #[test]
    fn test_advice_mentions_both_names() {
        let advice = replacements::advice("slice::windows").unwrap();
        assert!(advice.contains("slice::windows"));
        assert!(advice.contains("window"));
        assert!(replacements::advice("unknown").is_none());
    }

    #[test]
    fn test_table_has_unique_native_names() {
        let mut names: Vec<&str> = replacements::TABLE.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), replacements::TABLE.len());
    }

    #[test]
    fn test_preferred_functions_exist() {
        // 表の関数名が実在することをコンパイル時に確認する
        let _ = (
            functional::all::<i32>,
            functional::chunk::<i32>,
            functional::window::<i32>,
            functional::unique::<i32>,
            functional::init::<i32>,
            functional::tail::<i32>,
        );
    }
}
