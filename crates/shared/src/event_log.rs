//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! CloudWatch Logs Insights や `jq` で絞り込めるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用。JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側のクレートは `tracing` に依存すること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const TASK: &str = "task";
        pub const MESSAGE: &str = "message";
        pub const MODEL: &str = "model";
    }

    /// イベントアクション
    pub mod action {
        pub const TASK_LAUNCHED: &str = "task.launched";
        pub const TASK_LAUNCH_FAILED: &str = "task.launch_failed";
        pub const MESSAGE_SERVED: &str = "message.served";
        pub const MESSAGE_FAILED: &str = "message.failed";
        pub const MODEL_INVOKED: &str = "model.invoked";
        pub const MODEL_FAILED: &str = "model.failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（ECS、Bedrock）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// 呼び出し元の入力
        pub const CLIENT_INPUT: &str = "client_input";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const CONFIGURATION: &str = "configuration";
        pub const NOT_FOUND: &str = "not_found";
        pub const UNSUPPORTED_ROUTE: &str = "unsupported_route";
        pub const INVALID_PARAMETER: &str = "invalid_parameter";
        pub const SERVICE_COMMUNICATION: &str = "service_communication";
        pub const MALFORMED_REPLY: &str = "malformed_reply";
    }
}
