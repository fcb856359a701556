//! # Message Router
//!
//! HTTP API のルートキーに応じて PostgreSQL からメッセージを返す Lambda 関数。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DB_USER` | **Yes** | データベースユーザー |
//! | `DB_HOST` | **Yes** | データベースホスト |
//! | `DB_NAME` | **Yes** | データベース名 |
//! | `DB_PASSWORD` | **Yes** | パスワード |
//! | `DB_PORT` | **Yes** | ポート番号 |
//! | `ERROR_STATUS_POLICY` | No | `uniform`（デフォルト）または `differentiated` |
//! | `LOG_FORMAT` | No | `json`（デフォルト）または `pretty` |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,edgar=debug`） |
//!
//! 接続設定は呼び出しごとに最初のクエリ直前で読み込む。未設定の場合も
//! 起動は失敗せず、その呼び出しがエラーレスポンスになる。

use std::sync::Arc;

use edgar_infra::repository::PostgresMessageRepositoryFactory;
use edgar_message_router::{
    event::RouteEvent,
    handler::{FUNCTION_NAME, MessageRouter},
};
use edgar_shared::{
    StatusPolicy,
    canonical_log::CanonicalLogLineLayer,
    observability::{TracingConfig, init_tracing},
};
use lambda_runtime::{LambdaEvent, service_fn, tower::Layer as _};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env(FUNCTION_NAME));

    let status_policy = StatusPolicy::from_env();
    tracing::info!(status_policy = ?status_policy, "Message Router を起動します");

    let router = Arc::new(MessageRouter::new(
        PostgresMessageRepositoryFactory::new(),
        status_policy,
    ));

    let service = CanonicalLogLineLayer::new(FUNCTION_NAME).layer(service_fn(
        move |event: LambdaEvent<Value>| {
            let router = Arc::clone(&router);
            async move {
                let request = RouteEvent::from_value(&event.payload);
                Ok::<_, lambda_runtime::Error>(router.handle(&request).await)
            }
        },
    ));

    lambda_runtime::run(service)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
