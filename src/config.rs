//! 設定（tsumiki.toml）
//!
//! メッセージの言語とログ出力を設定する。
//!
//! ```toml
//! [i18n]
//! lang = "ja"
//!
//! [log]
//! level = "debug"
//! format = "json"
//! ```
//!
//! 環境変数 TSUMIKI_LANG / TSUMIKI_LOG_LEVEL / TSUMIKI_LOG_FORMAT はファイルの値より優先する。

use crate::error::{Result, TsumikiError};
use crate::i18n::{self, Lang};
use crate::log::{self, LogFormat, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "tsumiki.toml";

/// tsumiki設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub i18n: I18nSection,
    #[serde(default)]
    pub log: LogSection,
}

/// [i18n]セクション
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct I18nSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// [log]セクション
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// 設定ファイルを読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| TsumikiError::config_read(&display, &e.to_string()))?;

        Self::parse(&content, &display)
    }

    /// TOML文字列をパースする（sourceはエラーメッセージ用の名前）
    pub fn parse(content: &str, source: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TsumikiError::config_parse(source, &e.to_string()))
    }

    /// カレントディレクトリからtsumiki.tomlを探す（なければデフォルト）
    pub fn find_and_load() -> Result<Self> {
        let current = std::env::current_dir()
            .map_err(|e| TsumikiError::config_read(CONFIG_FILE_NAME, &e.to_string()))?;

        let path = current.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug(
                "config file not found, using defaults",
                &[("path", path.display().to_string())],
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// デフォルト設定に環境変数を重ねたもの
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 環境変数の値で上書きする
    pub fn with_env(self) -> Self {
        self.overlay(|name| std::env::var(name).ok())
    }

    fn overlay<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Self {
        if let Some(lang) = lookup("TSUMIKI_LANG") {
            self.i18n.lang = Some(lang);
        }
        if let Some(level) = lookup("TSUMIKI_LOG_LEVEL") {
            self.log.level = Some(level);
        }
        if let Some(format) = lookup("TSUMIKI_LOG_FORMAT") {
            self.log.format = Some(format);
        }
        self
    }

    /// ログレベル（未設定ならNone、不正な値ならエラー）
    pub fn log_level(&self) -> Result<Option<LogLevel>> {
        self.log.level.as_deref().map(LogLevel::parse).transpose()
    }

    pub fn log_format(&self) -> Result<Option<LogFormat>> {
        self.log.format.as_deref().map(LogFormat::parse).transpose()
    }

    /// 設定をi18nとlogに反映する
    ///
    /// 値を全て検証してから反映する（不正な値があれば何も変えない）。
    /// 言語はメッセージが初めて使われる前にだけ切り替えられる。
    pub fn apply(&self) -> Result<()> {
        let level = self.log_level()?;
        let format = self.log_format()?;

        if let Some(level) = level {
            log::set_level(level);
        }
        if let Some(format) = format {
            log::set_format(format);
        }
        if let Some(code) = &self.i18n.lang {
            let lang = Lang::parse(code);
            if !i18n::set_lang(lang) {
                log::warn(
                    "message language already initialized",
                    &[
                        ("requested", code.clone()),
                        ("current", format!("{:?}", i18n::messages().lang())),
                    ],
                );
            }
        }
        Ok(())
    }
}
