//! MessageRouter のテスト
//!
//! `MockMessageRepositoryFactory` でクエリと接続の開閉を記録し、
//! ルーティング、パラメータバインド、接続の解放、レスポンス形式を検証する。

use edgar_infra::{
    mock::{MockMessageRepositoryFactory, RecordedQuery},
    repository::message_repository::{SELECT_ALL_CONTENT, SELECT_CONTENT_BY_ID},
};
use edgar_message_router::{event::RouteEvent, handler::MessageRouter};
use edgar_shared::StatusPolicy;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

const GENERIC_ERROR: &str = "Failed to retrieve message from database.";

fn sut(factory: &MockMessageRepositoryFactory) -> MessageRouter<MockMessageRepositoryFactory> {
    MessageRouter::new(factory.clone(), StatusPolicy::Uniform)
}

fn differentiated(
    factory: &MockMessageRepositoryFactory,
) -> MessageRouter<MockMessageRepositoryFactory> {
    MessageRouter::new(factory.clone(), StatusPolicy::Differentiated)
}

fn by_id(id: &str) -> RouteEvent {
    RouteEvent::new("GET /message/{id}").with_path_parameter("id", id)
}

// ===== ルーティング =====

#[tokio::test]
async fn test_ルートは先頭のメッセージを返す() {
    let factory = MockMessageRepositoryFactory::new().with_row(1, "hello");

    let response = sut(&factory).handle(&RouteEvent::new("GET /")).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json().unwrap(), json!({ "message": "hello" }));
    assert_eq!(
        factory.queries(),
        vec![RecordedQuery {
            sql:    SELECT_ALL_CONTENT,
            params: vec![],
        }]
    );
}

#[tokio::test]
async fn test_idはバインドパラメータとして渡す() {
    let factory = MockMessageRepositoryFactory::new().with_row(42, "answer");

    let response = sut(&factory).handle(&by_id("42")).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json().unwrap(), json!({ "message": "answer" }));

    // params は i64 としてバインドされた値をモックが文字列化したもの
    let queries = factory.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].sql, SELECT_CONTENT_BY_ID);
    assert_eq!(queries[0].params, vec!["42".to_string()]);
    assert!(queries[0].sql.contains("$1"));
    assert!(!queries[0].sql.contains("42"));
}

#[tokio::test]
async fn test_idは整数に変換してからバインドする() {
    let factory = MockMessageRepositoryFactory::new().with_row(42, "answer");

    let response = sut(&factory).handle(&by_id("042")).await;

    // パス上の文字列ではなく、整数 42 として検索される
    assert_eq!(response.body_json().unwrap(), json!({ "message": "answer" }));
    assert_eq!(factory.queries()[0].params, vec!["42".to_string()]);
}

#[tokio::test]
async fn test_未対応ルートは500と汎用本文を返し接続しない() {
    let factory = MockMessageRepositoryFactory::new().with_row(1, "hello");

    let response = sut(&factory).handle(&RouteEvent::new("DELETE /")).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body_json().unwrap(), json!({ "error": GENERIC_ERROR }));
    assert!(factory.queries().is_empty());
    assert_eq!(factory.connect_count(), 0);
}

#[tokio::test]
async fn test_ルートキーがないイベントは未対応ルートになる() {
    let factory = MockMessageRepositoryFactory::new();
    let request = RouteEvent::from_value(&json!({ "rawPath": "/" }));

    let response = sut(&factory).handle(&request).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body_json().unwrap(), json!({ "error": GENERIC_ERROR }));
}

// ===== 接続の解放 =====

#[rstest]
#[case::成功(MockMessageRepositoryFactory::new().with_row(1, "hello"), RouteEvent::new("GET /"))]
#[case::未検出(MockMessageRepositoryFactory::new(), by_id("9"))]
#[case::dbエラー(MockMessageRepositoryFactory::new().failing("connection refused"), RouteEvent::new("GET /"))]
#[case::未対応ルート(MockMessageRepositoryFactory::new(), RouteEvent::new("DELETE /"))]
#[case::idなし(MockMessageRepositoryFactory::new(), RouteEvent::new("GET /message/{id}"))]
#[tokio::test]
async fn test_どの経路でもcloseは1回だけ呼ばれる(
    #[case] factory: MockMessageRepositoryFactory,
    #[case] request: RouteEvent,
) {
    sut(&factory).handle(&request).await;

    assert_eq!(factory.opened(), 1);
    assert_eq!(factory.close_count(), 1);
}

// ===== 失敗種別とステータス =====

#[tokio::test]
async fn test_該当行がなければuniformでは500() {
    let factory = MockMessageRepositoryFactory::new();

    let response = sut(&factory).handle(&by_id("9")).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(response.body_json().unwrap(), json!({ "error": GENERIC_ERROR }));
}

#[tokio::test]
async fn test_該当行がなければdifferentiatedでは404() {
    let factory = MockMessageRepositoryFactory::new();

    let response = differentiated(&factory).handle(&RouteEvent::new("GET /")).await;

    assert_eq!(response.status_code, 404);
    assert_eq!(response.body_json().unwrap(), json!({ "error": GENERIC_ERROR }));
}

#[rstest]
#[case::未対応ルート(RouteEvent::new("DELETE /"), 400)]
#[case::idなし(RouteEvent::new("GET /message/{id}"), 400)]
#[case::整数でないid(by_id("abc"), 400)]
#[case::未検出(by_id("9"), 404)]
#[tokio::test]
async fn test_differentiatedでは失敗種別ごとのステータスを返す(
    #[case] request: RouteEvent,
    #[case] expected: u16,
) {
    let factory = MockMessageRepositoryFactory::new();

    let response = differentiated(&factory).handle(&request).await;

    assert_eq!(response.status_code, expected);
    assert_eq!(response.body_json().unwrap(), json!({ "error": GENERIC_ERROR }));
}

#[tokio::test]
async fn test_整数でないidはクエリを発行しない() {
    let factory = MockMessageRepositoryFactory::new();

    let response = sut(&factory).handle(&by_id("1; DROP TABLE messages")).await;

    assert_eq!(response.status_code, 500);
    assert!(factory.queries().is_empty());
    assert_eq!(factory.connect_count(), 0);
}

#[tokio::test]
async fn test_dbエラーはuniformでは500でdifferentiatedでは503() {
    let factory = MockMessageRepositoryFactory::new().failing("connection refused");

    let uniform = sut(&factory).handle(&RouteEvent::new("GET /")).await;
    let split = differentiated(&factory).handle(&RouteEvent::new("GET /")).await;

    assert_eq!(uniform.status_code, 500);
    assert_eq!(split.status_code, 503);
    assert_eq!(uniform.body_json().unwrap(), json!({ "error": GENERIC_ERROR }));
    assert!(!uniform.body.contains("connection refused"));
}
