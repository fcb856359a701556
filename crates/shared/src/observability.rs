//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//! 3 関数（Task Launcher / Message Router / Model Prompt）で共通のログ初期化ロジックを集約し、
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えに対応する。
//!
//! Lambda 上では CloudWatch Logs に出力されるため、JSON を既定とする。

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 値が未設定または不正な場合は [`Json`](LogFormat::Json) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（Lambda 向け）
    #[default]
    Json,
    /// 人間が読みやすい形式（ローカル実行向け）
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Json`](LogFormat::Json) にフォールバックし、
    /// stderr に警告を出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to json");
                Self::Json
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 関数名（`function` スパンのフィールドに出力）
    pub service_name: String,
    /// ログ出力形式
    pub log_format:   LogFormat,
}

impl TracingConfig {
    /// 新しい設定を作成する
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// 環境変数から設定を読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は `"info,edgar=debug"` をデフォルトとする。
///
/// `tracing_error::ErrorLayer` を登録するため、`InfraError` が保持する
/// SpanTrace にはスパン名とフィールドが記録される。
///
/// JSON モードでは `timestamp`, `level`, `target`, `message` に加え、
/// 現在のスパン（`invocation` の `request_id` など）が出力される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,edgar=debug".into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== LogFormat::parse テスト =====

    #[test]
    fn test_parse_jsonでjsonを返す() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    }

    #[test]
    fn test_parse_prettyでprettyを返す() {
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
    }

    #[test]
    fn test_parse_不正な値でjsonにフォールバックする() {
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Json);
        assert_eq!(LogFormat::parse(""), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Json);
    }

    #[test]
    fn test_defaultでjsonを返す() {
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }

    #[test]
    fn test_newでフィールドが正しく設定される() {
        let config = TracingConfig::new("message-router", LogFormat::Pretty);

        assert_eq!(config.service_name, "message-router");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
