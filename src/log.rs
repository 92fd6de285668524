//! ログ出力
//!
//! 標準エラー出力へのレベル付きログ。テキスト形式とJSON Lines形式に対応。
//! デフォルトはWARN以上のみ出力する。

use crate::error::{Result, TsumikiError};
use chrono::Local;
use parking_lot::RwLock;
use std::sync::LazyLock;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// 文字列からパース（大文字小文字は区別しない）
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(TsumikiError::config_value("log.level", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// ログフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(TsumikiError::config_value("log.format", s)),
        }
    }
}

/// ログ設定
struct LogConfig {
    level: LogLevel,
    format: LogFormat,
}

static LOG_CONFIG: LazyLock<RwLock<LogConfig>> = LazyLock::new(|| {
    RwLock::new(LogConfig {
        level: LogLevel::Warn,
        format: LogFormat::Text,
    })
});

/// ログレベルを設定
pub fn set_level(level: LogLevel) {
    LOG_CONFIG.write().level = level;
}

/// ログフォーマットを設定
pub fn set_format(format: LogFormat) {
    LOG_CONFIG.write().format = format;
}

pub fn level() -> LogLevel {
    LOG_CONFIG.read().level
}

/// このレベルのログが出力されるか
///
/// コンテキストの組み立てが重い呼び出し側はこれで先に判定する。
pub fn enabled(level: LogLevel) -> bool {
    level >= LOG_CONFIG.read().level
}

/// 1レコード分の文字列を組み立てる（改行なし）
fn format_record(
    format: LogFormat,
    timestamp: &str,
    level: LogLevel,
    message: &str,
    context: &[(&str, String)],
) -> String {
    match format {
        LogFormat::Text => {
            let mut line = format!("[{}] {} {}", timestamp, level.as_str(), message);
            if !context.is_empty() {
                line.push_str(" |");
                for (k, v) in context {
                    line.push_str(&format!(" {}={}", k, v));
                }
            }
            line
        }
        LogFormat::Json => {
            let mut obj = serde_json::Map::new();
            obj.insert("timestamp".to_string(), timestamp.into());
            obj.insert("level".to_string(), level.as_str().into());
            obj.insert("message".to_string(), message.into());
            for (k, v) in context {
                obj.insert((*k).to_string(), v.as_str().into());
            }
            serde_json::Value::Object(obj).to_string()
        }
    }
}

/// ログ出力の内部実装
fn log_internal(level: LogLevel, message: &str, context: &[(&str, String)]) {
    let config = LOG_CONFIG.read();

    // レベルフィルタ
    if level < config.level {
        return;
    }

    let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string();
    eprintln!(
        "{}",
        format_record(config.format, &timestamp, level, message, context)
    );
}

/// DEBUGレベルのログ出力
pub fn debug(message: &str, context: &[(&str, String)]) {
    log_internal(LogLevel::Debug, message, context);
}

/// INFOレベルのログ出力
pub fn info(message: &str, context: &[(&str, String)]) {
    log_internal(LogLevel::Info, message, context);
}

/// WARNレベルのログ出力
pub fn warn(message: &str, context: &[(&str, String)]) {
    log_internal(LogLevel::Warn, message, context);
}

/// ERRORレベルのログ出力
pub fn error(message: &str, context: &[(&str, String)]) {
    log_internal(LogLevel::Error, message, context);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::parse("warning").unwrap(), LogLevel::Warn);
        assert!(LogLevel::parse("loud").is_err());
        assert_eq!(LogFormat::parse("plain").unwrap(), LogFormat::Text);
        assert!(LogFormat::parse("xml").is_err());
    }

    #[test]
    fn test_enabled_follows_level() {
        set_level(LogLevel::Error);
        assert!(!enabled(LogLevel::Debug));
        assert!(!enabled(LogLevel::Warn));
        assert!(enabled(LogLevel::Error));

        set_level(LogLevel::Warn);
        assert!(!enabled(LogLevel::Debug));
        assert!(enabled(LogLevel::Warn));
        assert_eq!(level(), LogLevel::Warn);
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_text_record() {
        let line = format_record(
            LogFormat::Text,
            "2024-01-01T00:00:00.000+0000",
            LogLevel::Warn,
            "stream reused",
            &[("state", "exhausted".to_string())],
        );
        assert_eq!(
            line,
            "[2024-01-01T00:00:00.000+0000] WARN stream reused | state=exhausted"
        );
    }

    #[test]
    fn test_json_record_escapes() {
        let line = format_record(
            LogFormat::Json,
            "ts",
            LogLevel::Debug,
            "say \"hi\"",
            &[("op", "window".to_string())],
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "say \"hi\"");
        assert_eq!(parsed["level"], "DEBUG");
        assert_eq!(parsed["op"], "window");
    }
}
