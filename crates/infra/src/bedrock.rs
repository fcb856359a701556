//! # Bedrock モデル呼び出し
//!
//! Amazon Bedrock Runtime の InvokeModel API を呼び出す。
//! リクエスト本文と応答本文はバイト列のまま扱い、形式の解釈はドメイン層に任せる。

use async_trait::async_trait;
use aws_sdk_bedrockruntime::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata},
    primitives::Blob,
};

use crate::InfraError;

/// モデル呼び出しのインターフェース
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// JSON 本文でモデルを 1 回呼び出し、応答本文を返す
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, InfraError>;
}

/// AWS Bedrock Runtime によるモデル呼び出し
pub struct BedrockModelInvoker {
    client: Client,
}

impl BedrockModelInvoker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelInvoker for BedrockModelInvoker {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, InfraError> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|err| {
                InfraError::bedrock(
                    err.code().map(str::to_string),
                    DisplayErrorContext(&err).to_string(),
                )
            })?;

        Ok(output.body().as_ref().to_vec())
    }
}

/// Bedrock Runtime クライアントを作成する
///
/// リージョンと認証情報は SDK のデフォルトチェーン（Lambda では `AWS_REGION` と実行ロール）で解決する。
pub async fn create_client() -> Client {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    Client::new(&config)
}
