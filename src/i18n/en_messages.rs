use super::msg_key::MsgKey;
use super::msg_key::MsgKey::*;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 英語エラーメッセージ
pub static EN_MSGS: LazyLock<HashMap<MsgKey, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // 引数エラー
        (MustBePositive, "{0}: {1} must be a positive integer"),
        (WindowWidthZero, "window: the width must not be zero"),
        (
            WindowTooWide,
            "window: not enough items in array (width {0}, length {1})",
        ),
        (
            CombineLengthMismatch,
            "combine: the number of elements for each array is not equal or the arrays are empty ({0} keys, {1} values)",
        ),
        (
            EmptyGroupChain,
            "group_by: at least one grouping function is required",
        ),
        (NotAnArray, "{0}: the element at key {1} is not an array ({2})"),
        (
            KeyRangeOverflow,
            "{0}: {2} keys starting at {1} do not fit in a 64-bit integer",
        ),
        // データ整合性エラー
        (
            DuplicatedKeysDataLoss,
            "data loss occurred because of duplicated keys ({0} pairs yielded, {1} distinct keys)",
        ),
        (
            InvalidYieldedKey,
            "collect_with_keys: the key yielded in the callback is not a valid array key ({0})",
        ),
        (InvalidKey, "{0}: the value is not a valid array key ({1})"),
        (
            NextIndexUnavailable,
            "cannot add element to the array as the next element is already occupied",
        ),
        // ストリームエラー
        (
            ConsumedSequence,
            "the stream has already been {0} and its source cannot be restarted",
        ),
        // 設定エラー
        (ConfigReadFailed, "failed to read {0}: {1}"),
        (ConfigParseFailed, "failed to parse {0}: {1}"),
        (InvalidConfigValue, "{0}: unsupported value '{1}'"),
        // ヒント
        (
            HelpUseCollect,
            "use `collect` if you do not care about the yielded keys, or `scollect` if you need to support duplicated keys (as arrays cannot)",
        ),
        (
            HelpSnapshotStream,
            "snapshot the stream with `to_array()` before traversing it twice, or build it with `Stream::restartable`",
        ),
        // 置き換え提案
        (PreferFunction, "please use tsumiki::{1} instead of {0}"),
    ])
});
