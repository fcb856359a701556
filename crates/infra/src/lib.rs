//! # edgar インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: 呼び出しごとに 1 本の PostgreSQL 接続を開閉する
//! - **リポジトリ実装**: メッセージの読み取り（パラメータバインドのみ）
//! - **ECS**: タスク実行リクエストの送信
//! - **Bedrock**: モデル呼び出し
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続設定と接続確立
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`ecs`] - ECS タスク起動
//! - [`bedrock`] - Bedrock モデル呼び出し
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use edgar_infra::{ecs, repository::PostgresMessageRepositoryFactory};
//!
//! async fn setup() {
//!     let launcher = ecs::EcsTaskLauncher::new(ecs::create_client("us-east-2").await);
//!     let messages = PostgresMessageRepositoryFactory::new();
//! }
//! ```

pub mod bedrock;
pub mod db;
pub mod ecs;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{ErrorPayload, InfraError, InfraErrorKind};
