//! # リポジトリ実装
//!
//! データの読み取りを担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: このシステムは書き込みを行わない
//! - **パラメータバインド**: 値は SQL 文字列に埋め込まず、必ずバインドで渡す
//! - **呼び出しスコープ**: リポジトリは 1 呼び出しの間だけ接続を保持し、
//!   `close()` で必ず解放する

pub mod message_repository;

pub use message_repository::{
    MessageRepository,
    MessageRepositoryFactory,
    PostgresMessageRepository,
    PostgresMessageRepositoryFactory,
};
