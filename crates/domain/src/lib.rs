//! # edgar ドメイン層
//!
//! 各 Lambda 関数が扱う値の型を定義する。
//!
//! ## 設計方針
//!
//! このクレートは外部システム（ECS、PostgreSQL、Bedrock）に一切依存しない。
//! イベントから取り出した値の検証と、外部 API に渡す固定リクエストの形を
//! ここで表現し、通信の詳細はインフラ層に任せる。
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//!   ↘      ↓
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`message`] - メッセージ ID とメッセージ本文
//! - [`route`] - HTTP API のルートキー
//! - [`task`] - ECS タスク起動リクエストと受付応答
//! - [`prompt`] - Bedrock へのプロンプトとモデル応答
//!
//! ## 使用例
//!
//! ```rust
//! use edgar_domain::{message::MessageId, route::RouteKey};
//!
//! let route: RouteKey = "GET /message/{id}".parse().unwrap();
//! assert_eq!(route, RouteKey::MessageById);
//!
//! let id = MessageId::parse("42").unwrap();
//! assert_eq!(id.as_i64(), 42);
//! ```

pub mod error;
pub mod message;
pub mod prompt;
pub mod route;
pub mod task;

pub use error::DomainError;
