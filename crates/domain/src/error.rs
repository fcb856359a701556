//! # ドメイン層エラー定義
//!
//! イベントの値がドメインのルールに合わない場合や、
//! 外部サービスの応答が期待した形でない場合を表現するエラー型。
//!
//! ## エラーの種類
//!
//! | エラー種別 | 用途 |
//! |-----------|------|
//! | `Validation` | 入力値の検証失敗（不正な ID など） |
//! | `NotFound` | エンティティが存在しない |
//! | `MalformedReply` | 外部サービスの応答を解釈できない |
//!
//! ## 使用例
//!
//! ```rust
//! use edgar_domain::DomainError;
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Message",
//!     id:          "42".to_string(),
//! };
//! assert_eq!(error.to_string(), "Message が見つかりません: 42");
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// イベントから取り出した値がルールに違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Message" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 外部サービスの応答を解釈できない
    #[error("応答の形式が不正です: {0}")]
    MalformedReply(String),
}
