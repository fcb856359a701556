//! # Model Prompt エラー定義

use edgar_domain::DomainError;
use edgar_infra::InfraError;
use edgar_shared::{FailureKind, event_log::error as log_error};
use thiserror::Error;

/// Model Prompt で発生するエラー
///
/// いずれもモデル側の障害として扱い、失敗種別は
/// [`FailureKind::UpstreamUnavailable`] になる。
#[derive(Debug, Error)]
pub enum PromptError {
    /// リクエスト本文を組み立てられない
    #[error("リクエスト本文の構築に失敗: {0}")]
    Request(#[source] DomainError),

    /// InvokeModel の呼び出しに失敗
    #[error("{0}")]
    Invoke(#[from] InfraError),

    /// 応答を解釈できない、またはテキストブロックがない
    #[error("{0}")]
    Reply(#[source] DomainError),
}

impl PromptError {
    /// 失敗種別
    pub fn failure_kind(&self) -> FailureKind {
        FailureKind::UpstreamUnavailable
    }

    /// ログの `error.category` と `error.kind`
    pub fn log_context(&self) -> (&'static str, &'static str) {
        match self {
            Self::Request(_) => (
                log_error::category::INFRASTRUCTURE,
                log_error::kind::CONFIGURATION,
            ),
            Self::Invoke(_) => (
                log_error::category::EXTERNAL_SERVICE,
                log_error::kind::SERVICE_COMMUNICATION,
            ),
            Self::Reply(_) => (
                log_error::category::EXTERNAL_SERVICE,
                log_error::kind::MALFORMED_REPLY,
            ),
        }
    }
}
