//! tsumikiエラー処理システム
//!
//! 構造化されたエラー情報を提供し、以下をサポート：
//! - 呼び出し側が分岐できる安定したエラー種別（ErrorKind）
//! - エラーコードによる分類
//! - ヒントと補足情報
//! - 複数の出力形式（人間向け/JSON）

use crate::i18n::{fmt_msg, msg, MsgKey};
use std::fmt;

/// エラー種別
///
/// 呼び出し側はこの種別で分岐する。メッセージ文言は言語設定で変わるため比較に使わないこと。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 構造的に不正な引数（結果の構築前に検出）
    InvalidArgument,
    /// 実行時のデータ衝突により結果を構築できない（キー重複、不正なキー）
    DataIntegrity,
    /// 再開できないストリームを二度目に走査しようとした
    ConsumedSequence,
    /// 設定ファイル・環境変数の読み込みエラー
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::DataIntegrity => "data integrity",
            ErrorKind::ConsumedSequence => "consumed sequence",
            ErrorKind::Config => "config",
        };
        write!(f, "{}", name)
    }
}

/// エラーコード
///
/// Rustコンパイラ風の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // 2xxx: 引数エラー
    E0201, // 範囲外・非正の数値引数
    E0202, // 要素数の不一致
    E0203, // 期待しない要素の形（配列でない等）
    E0204, // キーの範囲がi64を超える

    // 3xxx: データ整合性エラー
    E0301, // キー重複によるデータ損失
    E0302, // 配列キーとして使えない値
    E0303, // 次の整数キーがない（i64::MAXが使用済み）

    // 4xxx: ストリームエラー
    E0401, // 消費済みストリーム

    // 5xxx: 設定エラー
    E0501, // 設定ファイル読み込みエラー
    E0502, // 設定のパースエラー
}

impl ErrorCode {
    /// コードから種別を決定する
    pub fn kind(self) -> ErrorKind {
        match self {
            ErrorCode::E0201 | ErrorCode::E0202 | ErrorCode::E0203 | ErrorCode::E0204 => {
                ErrorKind::InvalidArgument
            }
            ErrorCode::E0301 | ErrorCode::E0302 | ErrorCode::E0303 => ErrorKind::DataIntegrity,
            ErrorCode::E0401 => ErrorKind::ConsumedSequence,
            ErrorCode::E0501 | ErrorCode::E0502 => ErrorKind::Config,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 構造化されたエラー情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsumikiError {
    /// エラーコード
    code: ErrorCode,
    /// メインメッセージ（1行）
    message: String,
    /// 詳細な説明（note）
    notes: Vec<String>,
    /// 解決のヒント（help）
    help: Vec<String>,
}

/// tsumiki全体で使うResult
pub type Result<T> = std::result::Result<T, TsumikiError>;

impl TsumikiError {
    /// 新しいエラーを作成
    pub fn new<S: Into<String>>(code: ErrorCode, message: S) -> Self {
        Self {
            code,
            message: message.into(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// noteを追加
    pub fn with_note<S: Into<String>>(mut self, note: S) -> Self {
        self.notes.push(note.into());
        self
    }

    /// helpを追加
    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help.push(help.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// シンプルなメッセージのみ取得
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn help(&self) -> &[String] {
        &self.help
    }

    /// エラーコード + メッセージ（ログ用）
    pub fn short(&self) -> String {
        format!("error[{}]: {}", self.code, self.message)
    }

    /// 完全な詳細情報
    pub fn full(&self) -> String {
        let mut output = format!("error[{}]: {}\n", self.code, self.message);

        for note in &self.notes {
            output.push_str(&format!("  = note: {}\n", note));
        }
        for help_text in &self.help {
            output.push_str(&format!("  = help: {}\n", help_text));
        }

        output
    }

    /// JSON形式で出力（ログ・エディタ統合用）
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code.to_string(),
            "kind": self.kind().to_string(),
            "message": self.message,
            "notes": self.notes,
            "help": self.help,
        })
    }
}

impl fmt::Display for TsumikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())
    }
}

impl std::error::Error for TsumikiError {}

// ========================================
// エラー構築ヘルパー関数
// ========================================

impl TsumikiError {
    /// 正の整数であるべき引数が0だった
    pub fn must_be_positive(op: &str, what: &str) -> Self {
        TsumikiError::new(ErrorCode::E0201, fmt_msg(MsgKey::MustBePositive, &[op, what]))
    }

    /// windowの幅が0
    pub fn window_width_zero() -> Self {
        TsumikiError::new(ErrorCode::E0201, msg(MsgKey::WindowWidthZero))
    }

    /// windowの幅が要素数を超えている
    pub fn window_too_wide(width: usize, len: usize) -> Self {
        TsumikiError::new(
            ErrorCode::E0201,
            fmt_msg(
                MsgKey::WindowTooWide,
                &[&width.to_string(), &len.to_string()],
            ),
        )
    }

    /// combineの要素数不一致または空
    pub fn combine_mismatch(keys: usize, values: usize) -> Self {
        TsumikiError::new(
            ErrorCode::E0202,
            fmt_msg(
                MsgKey::CombineLengthMismatch,
                &[&keys.to_string(), &values.to_string()],
            ),
        )
    }

    /// group_byのChainが空
    pub fn empty_group_chain() -> Self {
        TsumikiError::new(ErrorCode::E0203, msg(MsgKey::EmptyGroupChain))
    }

    /// 配列であるべき要素が配列でなかった
    pub fn not_an_array(op: &str, key: &str, type_name: &str) -> Self {
        TsumikiError::new(
            ErrorCode::E0203,
            fmt_msg(MsgKey::NotAnArray, &[op, key, type_name]),
        )
    }

    /// startからcount個の整数キーがi64に収まらない
    pub fn key_range_overflow(op: &str, start: i64, count: usize) -> Self {
        TsumikiError::new(
            ErrorCode::E0204,
            fmt_msg(
                MsgKey::KeyRangeOverflow,
                &[op, &start.to_string(), &count.to_string()],
            ),
        )
    }

    /// キー重複によるデータ損失
    pub fn duplicated_keys(yielded: usize, distinct: usize) -> Self {
        TsumikiError::new(
            ErrorCode::E0301,
            fmt_msg(
                MsgKey::DuplicatedKeysDataLoss,
                &[&yielded.to_string(), &distinct.to_string()],
            ),
        )
        .with_help(msg(MsgKey::HelpUseCollect))
    }

    /// コールバックが配列キーにできない値をyieldした
    pub fn invalid_yielded_key(type_name: &str) -> Self {
        TsumikiError::new(
            ErrorCode::E0302,
            fmt_msg(MsgKey::InvalidYieldedKey, &[type_name]),
        )
    }

    /// 配列キーにできない値
    pub fn invalid_key(op: &str, type_name: &str) -> Self {
        TsumikiError::new(ErrorCode::E0302, fmt_msg(MsgKey::InvalidKey, &[op, type_name]))
    }

    /// i64::MAXのキーが使用済みで、次の整数キーを割り当てられない
    pub fn next_index_unavailable() -> Self {
        TsumikiError::new(ErrorCode::E0303, msg(MsgKey::NextIndexUnavailable))
    }

    /// 消費済みストリームの再走査
    pub fn consumed_sequence(state: &str) -> Self {
        TsumikiError::new(
            ErrorCode::E0401,
            fmt_msg(MsgKey::ConsumedSequence, &[state]),
        )
        .with_help(msg(MsgKey::HelpSnapshotStream))
    }

    /// 設定ファイルの読み込み失敗
    pub fn config_read(path: &str, reason: &str) -> Self {
        TsumikiError::new(
            ErrorCode::E0501,
            fmt_msg(MsgKey::ConfigReadFailed, &[path, reason]),
        )
    }

    /// 設定のパース失敗・不正な値
    pub fn config_parse(source: &str, reason: &str) -> Self {
        TsumikiError::new(
            ErrorCode::E0502,
            fmt_msg(MsgKey::ConfigParseFailed, &[source, reason]),
        )
    }

    /// 設定値が未対応
    pub fn config_value(field: &str, value: &str) -> Self {
        TsumikiError::new(
            ErrorCode::E0502,
            fmt_msg(MsgKey::InvalidConfigValue, &[field, value]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let err = TsumikiError::new(ErrorCode::E0201, "テストエラー");
        assert_eq!(err.message(), "テストエラー");
        assert_eq!(err.short(), "error[E0201]: テストエラー");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_kinds_follow_codes() {
        assert_eq!(
            TsumikiError::window_too_wide(6, 5).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            TsumikiError::combine_mismatch(1, 2).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            TsumikiError::duplicated_keys(2, 1).kind(),
            ErrorKind::DataIntegrity
        );
        assert_eq!(
            TsumikiError::invalid_key("flip", "array").kind(),
            ErrorKind::DataIntegrity
        );
        assert_eq!(
            TsumikiError::key_range_overflow("fill", i64::MAX, 2).code(),
            ErrorCode::E0204
        );
        assert_eq!(
            TsumikiError::next_index_unavailable().kind(),
            ErrorKind::DataIntegrity
        );
        assert_eq!(
            TsumikiError::consumed_sequence("exhausted").kind(),
            ErrorKind::ConsumedSequence
        );
        assert_eq!(
            TsumikiError::config_value("log.level", "loud").kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_full_contains_help() {
        let err = TsumikiError::duplicated_keys(2, 1).with_note("input had 5 elements");

        let full = err.full();
        assert!(full.contains("error[E0301]"));
        assert!(full.contains("= note: input had 5 elements"));
        assert!(full.contains("= help:"));
        assert_eq!(err.help().len(), 1);
    }

    #[test]
    fn test_display_trait() {
        let err = TsumikiError::new(ErrorCode::E0401, "テストエラー").with_help("これはヒントです");

        let displayed = format!("{}", err);
        assert!(displayed.contains("error[E0401]"));
        assert!(displayed.contains("これはヒントです"));
    }

    #[test]
    fn test_to_json() {
        let json = TsumikiError::new(ErrorCode::E0302, "bad key").to_json();
        assert_eq!(json["code"], "E0302");
        assert_eq!(json["kind"], "data integrity");
        assert_eq!(json["message"], "bad key");
    }
}
