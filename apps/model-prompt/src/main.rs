//! # Model Prompt
//!
//! 設定済みの質問を Amazon Bedrock 上のモデルに送り、応答テキストを返す Lambda 関数。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BEDROCK_MODEL_ID` | No | モデル ID（デフォルト: `us.anthropic.claude-3-7-sonnet-20250219-v1:0`） |
//! | `PROMPT_QUESTION` | No | 質問文（デフォルト: `what is the best car?`） |
//! | `PROMPT_MAX_TOKENS` | No | 生成トークン数の上限（デフォルト: `256`） |
//! | `ERROR_STATUS_POLICY` | No | `uniform`（デフォルト）または `differentiated` |
//! | `LOG_FORMAT` | No | `json`（デフォルト）または `pretty` |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,edgar=debug`） |
//!
//! リージョンは SDK のデフォルト（Lambda では `AWS_REGION`）を使う。

use std::sync::Arc;

use edgar_infra::bedrock::{self, BedrockModelInvoker};
use edgar_model_prompt::{
    config::PromptConfig,
    handler::{FUNCTION_NAME, PromptHandler},
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

    let config = PromptConfig::from_env();
    tracing::info!(
        model_id = %config.model_id,
        max_tokens = config.max_tokens,
        "Model Prompt を起動します"
    );

    let client = bedrock::create_client().await;
    let handler = Arc::new(PromptHandler::new(
        BedrockModelInvoker::new(client),
        config.to_request(),
        StatusPolicy::from_env(),
    ));

    let service = CanonicalLogLineLayer::new(FUNCTION_NAME).layer(service_fn(
        move |event: LambdaEvent<Value>| {
            let handler = Arc::clone(&handler);
            async move { Ok::<_, lambda_runtime::Error>(handler.handle(&event.payload).await) }
        },
    ));

    lambda_runtime::run(service)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
