/// エラーメッセージキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgKey {
    // 引数エラー
    MustBePositive,        // {0}: {1}は正の整数である必要があります
    WindowWidthZero,       // window: 幅0は指定できない
    WindowTooWide,         // window: 幅{0}に対して要素数{1}が足りない
    CombineLengthMismatch, // combine: 要素数不一致または空（キー{0}個、値{1}個）
    EmptyGroupChain,       // group_by: 関数のリストが空
    NotAnArray,            // {0}: キー{1}の要素が配列ではない（{2}）
    KeyRangeOverflow,      // {0}: {1}から{2}個のキーがi64を超える

    // データ整合性エラー
    DuplicatedKeysDataLoss, // yield数{0}に対してキー{1}個
    InvalidYieldedKey,      // collect_with_keys: yieldされたキーが不正（{0}）
    InvalidKey,             // {0}: 配列キーにできない値（{1}）
    NextIndexUnavailable,   // 次の整数キーがない

    // ストリームエラー
    ConsumedSequence, // ストリームは既に{0}

    // 設定エラー
    ConfigReadFailed,   // {0}の読み込みに失敗: {1}
    ConfigParseFailed,  // {0}のパースに失敗: {1}
    InvalidConfigValue, // {0}: 未対応の値 '{1}'

    // ヒント
    HelpUseCollect,
    HelpSnapshotStream,

    // 置き換え提案
    PreferFunction, // {0}の代わりに{1}を使ってください
}
