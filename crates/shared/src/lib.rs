//! # edgar 共有ユーティリティ
//!
//! 各 Lambda 関数で共通に使うレスポンス型とエラー分類、ログ基盤を提供する。
//!
//! ## 設計方針
//!
//! - すべてのクレート（domain を除く）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - tracing 系の依存は `observability` feature の背後に置く

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod event_log;
pub mod function_response;
pub mod observability;

pub use error_response::{ErrorBody, FailureKind, StatusPolicy};
pub use function_response::FunctionResponse;
