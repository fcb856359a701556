//! # PostgreSQL 接続管理
//!
//! 接続設定の読み込みと、1 呼び出し 1 接続の確立を行う。
//!
//! ## 設計方針
//!
//! - **プールを持たない**: Lambda の呼び出し間で状態を共有しない。
//!   接続は呼び出しの中で開き、返却前に必ず閉じる
//! - **設定は環境変数から**: `DB_USER`, `DB_HOST`, `DB_NAME`, `DB_PASSWORD`, `DB_PORT`。
//!   既定値はなく、欠けていれば接続時点で設定エラーになる
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use edgar_infra::db::{self, DbConfig};
//!
//! async fn example() -> Result<(), edgar_infra::InfraError> {
//!     let config = DbConfig::from_env()?;
//!     let conn = db::connect(&config).await?;
//!     db::close(conn).await;
//!     Ok(())
//! }
//! ```

use std::fmt;

use sqlx::{
    Connection,
    PgConnection,
    postgres::PgConnectOptions,
};

use crate::error::InfraError;

/// PostgreSQL 接続設定
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user:     String,
    pub host:     String,
    pub database: String,
    pub password: String,
    pub port:     u16,
}

impl DbConfig {
    /// 任意のキー検索関数から設定を読み込む
    ///
    /// 未設定のキーやポート番号として解釈できない値は設定エラーになる。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InfraError> {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| InfraError::configuration(format!("{key} が設定されていません")))
        };

        let port = require("DB_PORT")?;
        let port = port.parse::<u16>().map_err(|_| {
            InfraError::configuration(format!("DB_PORT は有効なポート番号である必要があります: {port:?}"))
        })?;

        Ok(Self {
            user: require("DB_USER")?,
            host: require("DB_HOST")?,
            database: require("DB_NAME")?,
            password: require("DB_PASSWORD")?,
            port,
        })
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, InfraError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// sqlx の接続オプションに変換する
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

// パスワードをログに出さない
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("host", &self.host)
            .field("database", &self.database)
            .field("password", &"***")
            .field("port", &self.port)
            .finish()
    }
}

/// 単一の PostgreSQL 接続を確立する
pub async fn connect(config: &DbConfig) -> Result<PgConnection, InfraError> {
    let conn = PgConnection::connect_with(&config.connect_options()).await?;
    tracing::debug!(host = %config.host, database = %config.database, "データベースに接続しました");
    Ok(conn)
}

/// 接続を閉じる
///
/// 切断処理の失敗はログに残すだけで呼び出し元には返さない。
pub async fn close(conn: PgConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "データベース接続のクローズに失敗しました");
    }
}
