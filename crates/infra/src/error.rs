//! # インフラ層エラー定義
//!
//! データベースや外部サービスとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: sqlx::Error をラップし、AWS SDK のエラーは
//!   エラーコードとメッセージに分解して保持する
//! - **ログ可能性**: Debug によりログ出力時に詳細情報を表示
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Database, Ecs, Bedrock 等）

use std::fmt;

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::Configuration(msg) => { /* 設定不備 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// 接続失敗、認証エラー、SQL の実行失敗、行のデコード失敗など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 設定不備
    ///
    /// 接続に必要な環境変数が未設定、または値が不正な場合。
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// ECS エラー
    ///
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// エラーコードとメッセージに分解して保持する。
    #[error("ECS エラー: {message}")]
    Ecs {
        /// サービスが返したエラーコード（例: `AccessDeniedException`）
        code:    Option<String>,
        message: String,
    },

    /// Bedrock エラー
    #[error("Bedrock エラー: {message}")]
    Bedrock {
        code:    Option<String>,
        message: String,
    },

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraErrorKind {
    /// ログフィールドやエラーペイロード用の種別名
    pub fn name(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Configuration(_) => "configuration",
            Self::Ecs { .. } => "ecs",
            Self::Bedrock { .. } => "bedrock",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

/// 呼び出し元へ返すエラーペイロード
///
/// 上流サービスが返したエラーコードとメッセージをそのまま載せる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub kind:    &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code:    Option<String>,
    pub message: String,
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 上流サービスのエラーコード（ECS / Bedrock の場合のみ）
    pub fn service_code(&self) -> Option<&str> {
        match &self.kind {
            InfraErrorKind::Ecs { code, .. } | InfraErrorKind::Bedrock { code, .. } => {
                code.as_deref()
            }
            _ => None,
        }
    }

    /// エラーペイロードに変換する
    pub fn payload(&self) -> ErrorPayload {
        let message = match &self.kind {
            InfraErrorKind::Ecs { message, .. } | InfraErrorKind::Bedrock { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        };
        ErrorPayload {
            kind: self.kind.name(),
            code: self.service_code().map(str::to_string),
            message,
        }
    }

    // ===== Convenience constructors =====

    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// 設定エラーを生成する
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Configuration(msg.into()))
    }

    /// ECS エラーを生成する
    pub fn ecs(code: Option<String>, message: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Ecs {
            code,
            message: message.into(),
        })
    }

    /// Bedrock エラーを生成する
    pub fn bedrock(code: Option<String>, message: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Bedrock {
            code,
            message: message.into(),
        })
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Unexpected(msg.into()))
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::capture(InfraErrorKind::Database(source))
    }
}
