//! # 失敗の分類とステータスコード
//!
//! 全関数で共通の失敗種別（[`FailureKind`]）と、種別からステータスコードへの
//! 対応表（[`StatusPolicy`]）を提供する。
//!
//! ## 設計
//!
//! - 失敗種別は閉じた集合: 入力不正・未検出・上流障害の 3 種のみ
//! - 対応表は明示的に選択する。既定の `Uniform` はすべて 500 を返す
//! - `Differentiated` はクライアント起因と基盤起因をステータスで区別する
//! - レスポンス本文には内部情報を載せない（[`ErrorBody`] は固定文言のみ）

use serde::{Deserialize, Serialize};

/// ステータス方針を選ぶ環境変数
pub const STATUS_POLICY_ENV: &str = "ERROR_STATUS_POLICY";

/// 失敗種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 入力不正（未対応ルート、不正な ID など）
    Validation,
    /// 対象が存在しない
    NotFound,
    /// 上流（DB、ECS、Bedrock）の障害
    UpstreamUnavailable,
}

impl FailureKind {
    /// ログフィールド用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::UpstreamUnavailable => "upstream_unavailable",
        }
    }
}

/// 失敗種別からステータスコードへの対応方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// すべての失敗を 500 として返す
    #[default]
    Uniform,
    /// 失敗種別ごとに 400 / 404 / 503 を返す
    Differentiated,
}

impl StatusPolicy {
    /// 文字列から方針をパースする
    ///
    /// 不正な値の場合は [`Uniform`](StatusPolicy::Uniform) にフォールバックし、
    /// stderr に警告を出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "uniform" => Self::Uniform,
            "differentiated" => Self::Differentiated,
            other => {
                eprintln!(
                    "WARNING: unknown {STATUS_POLICY_ENV}={other:?}, falling back to uniform"
                );
                Self::Uniform
            }
        }
    }

    /// 任意のキー検索関数から読み取る
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup(STATUS_POLICY_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// 環境変数 `ERROR_STATUS_POLICY` から読み取る
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 失敗種別に対応するステータスコード
    pub fn status_for(&self, kind: FailureKind) -> u16 {
        match (self, kind) {
            (Self::Uniform, _) => 500,
            (Self::Differentiated, FailureKind::Validation) => 400,
            (Self::Differentiated, FailureKind::NotFound) => 404,
            (Self::Differentiated, FailureKind::UpstreamUnavailable) => 503,
        }
    }
}

/// 汎用エラー本文 `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
