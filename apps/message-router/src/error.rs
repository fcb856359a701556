//! # Message Router エラー定義
//!
//! 1 回の呼び出しで起こりうる失敗と、失敗種別・ログフィールドへの対応を定義する。
//! レスポンス本文は失敗の内容によらず固定文言なので、ここでは本文を組み立てない。

use edgar_domain::DomainError;
use edgar_infra::InfraError;
use edgar_shared::{FailureKind, event_log::error as log_error};
use thiserror::Error;

/// Message Router で発生するエラー
#[derive(Debug, Error)]
pub enum RouterError {
    /// 未対応のルートキー
    #[error("{0}")]
    UnsupportedRoute(#[source] DomainError),

    /// `GET /message/{id}` に `id` がない
    #[error("パスパラメータ id がありません")]
    MissingMessageId,

    /// `id` が整数でない
    #[error("{0}")]
    InvalidMessageId(#[source] DomainError),

    /// 該当する行がない
    #[error("{0}")]
    NotFound(#[source] DomainError),

    /// データベースエラー（設定不備、接続失敗、クエリ失敗）
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl RouterError {
    /// 該当するメッセージがないことを表すエラーを作る
    pub fn message_not_found(id: impl Into<String>) -> Self {
        Self::NotFound(DomainError::NotFound {
            entity_type: "Message",
            id:          id.into(),
        })
    }

    /// 失敗種別
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::UnsupportedRoute(_) | Self::MissingMessageId | Self::InvalidMessageId(_) => {
                FailureKind::Validation
            }
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Database(_) => FailureKind::UpstreamUnavailable,
        }
    }

    /// ログの `error.category` と `error.kind`
    pub fn log_context(&self) -> (&'static str, &'static str) {
        match self {
            Self::UnsupportedRoute(_) => (
                log_error::category::CLIENT_INPUT,
                log_error::kind::UNSUPPORTED_ROUTE,
            ),
            Self::MissingMessageId | Self::InvalidMessageId(_) => (
                log_error::category::CLIENT_INPUT,
                log_error::kind::INVALID_PARAMETER,
            ),
            Self::NotFound(_) => (
                log_error::category::CLIENT_INPUT,
                log_error::kind::NOT_FOUND,
            ),
            Self::Database(e) => match e.kind() {
                edgar_infra::InfraErrorKind::Configuration(_) => (
                    log_error::category::INFRASTRUCTURE,
                    log_error::kind::CONFIGURATION,
                ),
                _ => (
                    log_error::category::INFRASTRUCTURE,
                    log_error::kind::DATABASE,
                ),
            },
        }
    }
}
