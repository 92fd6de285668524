use super::msg_key::MsgKey;
use super::msg_key::MsgKey::*;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 日本語エラーメッセージ
pub static JA_MSGS: LazyLock<HashMap<MsgKey, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // 引数エラー
        (MustBePositive, "{0}: {1}は正の整数である必要があります"),
        (WindowTooWide, "window: 配列の要素数が足りません（幅 {0}、要素数 {1}）"),
        (WindowWidthZero, "window: 幅に0は指定できません"),
        (
            CombineLengthMismatch,
            "combine: 配列の要素数が一致しないか、配列が空です（キー {0}個、値 {1}個）",
        ),
        (
            EmptyGroupChain,
            "group_by: グループ化関数を少なくとも1つ指定してください",
        ),
        (NotAnArray, "{0}: キー {1} の要素は配列ではありません（{2}）"),
        (
            KeyRangeOverflow,
            "{0}: {1} から始まる{2}個のキーは64ビット整数に収まりません",
        ),
        // データ整合性エラー
        (
            DuplicatedKeysDataLoss,
            "キーの重複によりデータが失われました（yield {0}件、異なるキー {1}件）",
        ),
        (
            InvalidYieldedKey,
            "collect_with_keys: コールバックがyieldしたキーは配列キーとして使えません（{0}）",
        ),
        (InvalidKey, "{0}: 配列キーとして使えない値です（{1}）"),
        (
            NextIndexUnavailable,
            "次の整数キーが既に使われているため、配列に要素を追加できません",
        ),
        // ストリームエラー
        (
            ConsumedSequence,
            "ストリームは既に走査されており（{0}）、ソースを再開できません",
        ),
        // 設定エラー
        (ConfigReadFailed, "{0}の読み込みに失敗: {1}"),
        (ConfigParseFailed, "{0}のパースに失敗: {1}"),
        (InvalidConfigValue, "{0}: 未対応の値 '{1}'"),
        // ヒント
        (
            HelpUseCollect,
            "yieldしたキーが不要なら`collect`を、重複キーを扱うなら`scollect`を使ってください（配列は重複キーを持てません）",
        ),
        (
            HelpSnapshotStream,
            "2回走査する前に`to_array()`で配列に確定させるか、`Stream::restartable`で作成してください",
        ),
        // 置き換え提案
        (PreferFunction, "{0}の代わりにtsumiki::{1}を使ってください"),
    ])
});
