/// 国際化メッセージ管理
///
/// 言語設定の優先順位:
/// 1. `set_lang`（設定ファイル経由、最初のメッセージ取得前のみ有効）
/// 2. TSUMIKI_LANG 環境変数
/// 3. LANG 環境変数（システムのロケール設定）
/// 4. デフォルト: en
mod en_messages;
mod ja_messages;
mod msg_key;

pub use msg_key::MsgKey;

use en_messages::EN_MSGS;
use ja_messages::JA_MSGS;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Ja,
}

impl Lang {
    /// 環境変数から言語を取得
    /// 優先順位: TSUMIKI_LANG > LANG > デフォルト(en)
    pub fn from_env() -> Self {
        if let Ok(lang) = std::env::var("TSUMIKI_LANG") {
            return Self::parse(&lang);
        }

        // LANGから言語コードを取得（ja_JP.UTF-8 -> ja）
        if let Ok(lang) = std::env::var("LANG") {
            let lang_code = lang.split('_').next().unwrap_or("");
            return Self::parse(lang_code);
        }

        Lang::En
    }

    /// 言語コードをパース（未対応言語は英語にフォールバック）
    pub fn parse(code: &str) -> Self {
        match code {
            "ja" | "ja_JP" => Lang::Ja,
            _ => Lang::En,
        }
    }
}

/// メッセージマネージャー
pub struct Messages {
    lang: Lang,
}

impl Messages {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// メッセージを取得（日本語訳が欠けていれば英語を返す）
    pub fn get(&self, key: MsgKey) -> &'static str {
        let table = match self.lang {
            Lang::En => &*EN_MSGS,
            Lang::Ja => &*JA_MSGS,
        };
        table
            .get(&key)
            .or_else(|| EN_MSGS.get(&key))
            .copied()
            .unwrap_or("")
    }

    /// メッセージをフォーマット（プレースホルダー {0}, {1}, ... を置換）
    pub fn fmt(&self, key: MsgKey, args: &[&str]) -> String {
        let mut result = self.get(key).to_string();

        for (i, arg) in args.iter().enumerate() {
            let placeholder = format!("{{{}}}", i);
            result = result.replace(&placeholder, arg);
        }

        result
    }
}

// ========================================
// グローバルインスタンス
// ========================================

static MESSAGES: OnceLock<Messages> = OnceLock::new();

/// 言語を明示的に設定する
///
/// 既にメッセージが初期化済みなら何もせず`false`を返す。
pub fn set_lang(lang: Lang) -> bool {
    MESSAGES.set(Messages::new(lang)).is_ok()
}

/// グローバルなメッセージインスタンスを取得
pub fn messages() -> &'static Messages {
    MESSAGES.get_or_init(|| Messages::new(Lang::from_env()))
}

/// メッセージを取得してフォーマット
pub fn fmt_msg(key: MsgKey, args: &[&str]) -> String {
    messages().fmt(key, args)
}

/// メッセージを取得
pub fn msg(key: MsgKey) -> &'static str {
    messages().get(key)
}
