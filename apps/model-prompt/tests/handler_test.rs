//! PromptHandler のテスト
//!
//! Bedrock の代わりに `MockModelInvoker` を使い、リクエスト本文と
//! レスポンス形式を検証する。

use edgar_infra::mock::MockModelInvoker;
use edgar_model_prompt::{config::PromptConfig, handler::PromptHandler};
use edgar_shared::StatusPolicy;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn reply(text: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn",
    }))
    .unwrap()
}

fn sut(invoker: MockModelInvoker, policy: StatusPolicy) -> PromptHandler<MockModelInvoker> {
    PromptHandler::new(invoker, PromptConfig::default().to_request(), policy)
}

#[tokio::test]
async fn test_最初のテキストブロックをresponseとして返す() {
    let invoker = MockModelInvoker::replying(reply("a fast car"));

    let response = sut(invoker, StatusPolicy::Uniform).handle(&json!({})).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(response.body_json().unwrap(), json!({ "response": "a fast car" }));
}

#[tokio::test]
async fn test_引用符や改行を含む応答も有効なjsonになる() {
    let invoker = MockModelInvoker::replying(reply("the \"best\"\ncar"));

    let response = sut(invoker, StatusPolicy::Uniform).handle(&json!({})).await;

    assert_eq!(
        response.body_json().unwrap(),
        json!({ "response": "the \"best\"\ncar" })
    );
}

#[tokio::test]
async fn test_設定済みのモデルとmessages形式の本文で1回だけ呼び出す() {
    let invoker = MockModelInvoker::replying(reply("ok"));

    sut(invoker.clone(), StatusPolicy::Uniform)
        .handle(&json!({ "question": "ignored" }))
        .await;

    let calls = invoker.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "us.anthropic.claude-3-7-sonnet-20250219-v1:0");
    let body: Value = serde_json::from_slice(&calls[0].1).unwrap();
    assert_eq!(
        body,
        json!({
            "max_tokens": 256,
            "messages": [{ "role": "user", "content": "what is the best car?" }],
            "anthropic_version": "bedrock-2023-05-31",
        })
    );
}

#[rstest]
#[case::呼び出し失敗(MockModelInvoker::failing("ThrottlingException"))]
#[case::jsonでない応答(MockModelInvoker::replying(b"not json".to_vec()))]
#[case::テキストブロックなし(MockModelInvoker::replying(br#"{"content":[]}"#.to_vec()))]
#[tokio::test]
async fn test_失敗時は500と固定の本文を返す(#[case] invoker: MockModelInvoker) {
    let response = sut(invoker, StatusPolicy::Uniform).handle(&json!({})).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.body_json().unwrap(),
        json!({ "error": "Failed to generate a response." })
    );
}

#[tokio::test]
async fn test_differentiated方針では失敗時に503を返す() {
    let invoker = MockModelInvoker::failing("ThrottlingException");

    let response = sut(invoker, StatusPolicy::Differentiated)
        .handle(&json!({}))
        .await;

    assert_eq!(response.status_code, 503);
}
