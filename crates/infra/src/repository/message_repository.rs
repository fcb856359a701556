//! # MessageRepository
//!
//! `messages` テーブルからメッセージ本文を取得するリポジトリ。
//!
//! ## 接続のライフサイクル
//!
//! 1. [`MessageRepositoryFactory::open`] で呼び出しごとにリポジトリを作る（未接続）
//! 2. 最初のクエリ直前に接続する
//! 3. [`MessageRepository::close`] で解放する。未接続なら何もしない
//!
//! 接続に失敗した場合やクエリを発行しないルートでも、`close()` は失敗しない。

use async_trait::async_trait;
use edgar_domain::message::{Message, MessageId};
use sqlx::PgConnection;

use crate::{
    db::{self, DbConfig},
    error::InfraError,
};

/// 全メッセージの本文を取得する（先頭行のみ使用）
pub const SELECT_ALL_CONTENT: &str = "SELECT content FROM messages";

/// ID を指定してメッセージ本文を取得する（`$1` = id）
pub const SELECT_CONTENT_BY_ID: &str = "SELECT content FROM messages WHERE id = $1";

/// メッセージリポジトリトレイト
///
/// 1 呼び出しの間だけ使われ、最後に必ず `close()` される。
#[async_trait]
pub trait MessageRepository: Send {
    /// 先頭のメッセージを取得する
    async fn find_first(&mut self) -> Result<Option<Message>, InfraError>;

    /// ID でメッセージを検索する
    async fn find_by_id(&mut self, id: MessageId) -> Result<Option<Message>, InfraError>;

    /// 保持している接続を解放する
    ///
    /// 失敗してもエラーは返さない。
    async fn close(&mut self);
}

/// 呼び出しごとにリポジトリを作るファクトリ
pub trait MessageRepositoryFactory: Send + Sync {
    type Repository: MessageRepository;

    fn open(&self) -> Self::Repository;
}

/// PostgreSQL 実装の MessageRepository
///
/// 接続設定は最初のクエリ直前に環境変数から読み込む。
#[derive(Debug, Default)]
pub struct PostgresMessageRepository {
    conn: Option<PgConnection>,
}

impl PostgresMessageRepository {
    pub fn new() -> Self {
        Self { conn: None }
    }

    async fn connection(&mut self) -> Result<&mut PgConnection, InfraError> {
        if self.conn.is_none() {
            let config = DbConfig::from_env()?;
            self.conn = Some(db::connect(&config).await?);
        }
        self.conn
            .as_mut()
            .ok_or_else(|| InfraError::unexpected("接続が確立されていません"))
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn find_first(&mut self) -> Result<Option<Message>, InfraError> {
        let conn = self.connection().await?;
        let row: Option<(String,)> = sqlx::query_as(SELECT_ALL_CONTENT)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.map(|(content,)| Message::new(content)))
    }

    async fn find_by_id(&mut self, id: MessageId) -> Result<Option<Message>, InfraError> {
        let conn = self.connection().await?;
        let row: Option<(String,)> = sqlx::query_as(SELECT_CONTENT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.map(|(content,)| Message::new(content)))
    }

    async fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            db::close(conn).await;
        }
    }
}

/// [`PostgresMessageRepository`] のファクトリ
#[derive(Debug, Clone, Default)]
pub struct PostgresMessageRepositoryFactory;

impl PostgresMessageRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl MessageRepositoryFactory for PostgresMessageRepositoryFactory {
    type Repository = PostgresMessageRepository;

    fn open(&self) -> Self::Repository {
        PostgresMessageRepository::new()
    }
}
