//! # モデルへのプロンプト
//!
//! Bedrock 上の Anthropic モデルへ送るリクエスト本文と、その応答を表現する。
//!
//! リクエスト本文は Anthropic Messages 形式:
//!
//! ```json
//! {
//!   "max_tokens": 256,
//!   "messages": [{ "role": "user", "content": "..." }],
//!   "anthropic_version": "bedrock-2023-05-31"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Bedrock 上の Anthropic モデルが要求する API バージョン
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// 1 問 1 答のプロンプト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// 呼び出すモデル ID（推論プロファイル ID も可）
    pub model_id:   String,
    /// ユーザーとしての質問文
    pub question:   String,
    /// 生成トークン数の上限
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct MessagesBody<'a> {
    max_tokens:        u32,
    messages:          [ChatTurn<'a>; 1],
    anthropic_version: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role:    &'static str,
    content: &'a str,
}

impl PromptRequest {
    /// InvokeModel に渡す JSON 本文を組み立てる
    pub fn to_body(&self) -> Result<Vec<u8>, DomainError> {
        let body = MessagesBody {
            max_tokens:        self.max_tokens,
            messages:          [ChatTurn {
                role:    "user",
                content: &self.question,
            }],
            anthropic_version: ANTHROPIC_VERSION,
        };
        serde_json::to_vec(&body)
            .map_err(|e| DomainError::Validation(format!("リクエスト本文を構築できません: {e}")))
    }
}

/// モデル応答
///
/// `content` は複数ブロックを取り得るが、テキストブロックのみを扱う。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelReply {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl ModelReply {
    /// 応答本文（JSON バイト列）を解釈する
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(bytes).map_err(|e| DomainError::MalformedReply(e.to_string()))
    }

    /// 最初のテキストブロックを返す
    pub fn first_text(&self) -> Result<&str, DomainError> {
        self.content
            .iter()
            .filter(|block| block.kind.as_deref().is_none_or(|kind| kind == "text"))
            .find_map(|block| block.text.as_deref())
            .ok_or_else(|| DomainError::MalformedReply("テキストブロックがありません".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn test_to_bodyでmessages形式の本文を組み立てる() {
        let request = PromptRequest {
            model_id:   "model".to_string(),
            question:   "what is the best car?".to_string(),
            max_tokens: 256,
        };

        let body: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();

        assert_eq!(
            body,
            json!({
                "max_tokens": 256,
                "messages": [{ "role": "user", "content": "what is the best car?" }],
                "anthropic_version": "bedrock-2023-05-31"
            })
        );
    }

    #[test]
    fn test_first_textで最初のテキストブロックを返す() {
        let bytes = br#"{
            "id": "msg_1",
            "content": [
                { "type": "tool_use", "id": "t" },
                { "type": "text", "text": "a fast car" },
                { "type": "text", "text": "second" }
            ]
        }"#;

        let reply = ModelReply::from_slice(bytes).unwrap();

        assert_eq!(reply.first_text().unwrap(), "a fast car");
    }

    #[test]
    fn test_テキストブロックがなければエラー() {
        let reply = ModelReply::from_slice(br#"{ "content": [] }"#).unwrap();

        assert!(matches!(reply.first_text(), Err(DomainError::MalformedReply(_))));
    }

    #[test]
    fn test_jsonでない応答はエラー() {
        let result = ModelReply::from_slice(b"not json");

        assert!(matches!(result, Err(DomainError::MalformedReply(_))));
    }
}
