//! # プロンプトハンドラ
//!
//! 設定済みの質問でモデルを 1 回呼び出し、最初のテキストブロックを返す。
//! イベントの内容は使わない。
//!
//! ## レスポンス
//!
//! - 成功: 200 `{ "response": "<テキスト>" }`
//! - 失敗: 500 `{ "error": "Failed to generate a response." }`
//!   （`Differentiated` 方針では 503）
//!
//! どちらも `Content-Type: application/json` を付ける。

use edgar_domain::prompt::{ModelReply, PromptRequest};
use edgar_infra::bedrock::ModelInvoker;
use edgar_shared::{
    ErrorBody,
    FunctionResponse,
    StatusPolicy,
    event_log::event,
    log_business_event,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::PromptError;

/// ログとスパンに出力する関数名
pub const FUNCTION_NAME: &str = "model-prompt";

const FAILURE_MESSAGE: &str = "Failed to generate a response.";

#[derive(Debug, Serialize)]
struct ReplyBody<'a> {
    response: &'a str,
}

/// プロンプトハンドラ
pub struct PromptHandler<M> {
    invoker:       M,
    request:       PromptRequest,
    status_policy: StatusPolicy,
}

impl<M: ModelInvoker> PromptHandler<M> {
    pub fn new(invoker: M, request: PromptRequest, status_policy: StatusPolicy) -> Self {
        Self {
            invoker,
            request,
            status_policy,
        }
    }

    /// イベントを処理する
    pub async fn handle(&self, payload: &Value) -> FunctionResponse {
        tracing::info!(payload = %payload, "イベントを受信");

        let response = match self.ask().await {
            Ok(text) => {
                // 応答本文はログに出さず、長さだけを記録する
                log_business_event!(
                    event.category = event::category::MODEL,
                    event.action = event::action::MODEL_INVOKED,
                    event.result = event::result::SUCCESS,
                    model.id = %self.request.model_id,
                    model.reply_chars = text.chars().count(),
                    "モデルが応答した"
                );
                FunctionResponse::ok(&ReplyBody { response: &text })
            }
            Err(e) => {
                let (category, kind) = e.log_context();
                tracing::error!(
                    error.category = category,
                    error.kind = kind,
                    failure.kind = e.failure_kind().as_str(),
                    model.id = %self.request.model_id,
                    "応答の生成に失敗: {e}"
                );
                log_business_event!(
                    event.category = event::category::MODEL,
                    event.action = event::action::MODEL_FAILED,
                    event.result = event::result::FAILURE,
                    model.id = %self.request.model_id,
                    "モデルの呼び出しに失敗した"
                );
                FunctionResponse::json(
                    self.status_policy.status_for(e.failure_kind()),
                    &ErrorBody::new(FAILURE_MESSAGE),
                )
            }
        };

        response.with_header("Content-Type", "application/json")
    }

    /// モデルを呼び出し、最初のテキストブロックを返す
    async fn ask(&self) -> Result<String, PromptError> {
        let body = self.request.to_body().map_err(PromptError::Request)?;
        let raw = self.invoker.invoke(&self.request.model_id, body).await?;
        let reply = ModelReply::from_slice(&raw).map_err(PromptError::Reply)?;
        let text = reply.first_text().map_err(PromptError::Reply)?;
        Ok(text.to_string())
    }
}
