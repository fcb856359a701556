//! TaskLaunchHandler のテスト
//!
//! ECS の代わりに `MockTaskLauncher` を使い、送信内容とレスポンス形式を検証する。

use edgar_infra::mock::MockTaskLauncher;
use edgar_shared::StatusPolicy;
use edgar_task_launcher::{config::LauncherConfig, handler::TaskLaunchHandler};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn sut(launcher: MockTaskLauncher, policy: StatusPolicy) -> TaskLaunchHandler<MockTaskLauncher> {
    TaskLaunchHandler::new(launcher, LauncherConfig::default().launch_spec(), policy)
}

#[rstest]
#[case::空のオブジェクト(json!({}))]
#[case::null(Value::Null)]
#[case::任意のフィールド(json!({ "cluster": "other", "taskDefinition": "other" }))]
#[case::配列(json!([1, 2, 3]))]
#[tokio::test]
async fn test_イベントに関係なく同じリクエストを1回だけ送信する(#[case] event: Value) {
    let launcher = MockTaskLauncher::acknowledging(json!({ "taskArn": "t1" }));
    let sut = sut(launcher.clone(), StatusPolicy::Uniform);

    sut.handle(&event).await;

    assert_eq!(
        launcher.requests(),
        vec![LauncherConfig::default().launch_spec()]
    );
}

#[tokio::test]
async fn test_成功時は200で受付応答をdataに含める() {
    let launcher = MockTaskLauncher::acknowledging(json!({ "taskArn": "t1" }));
    let sut = sut(launcher, StatusPolicy::Uniform);

    let response = sut.handle(&json!({})).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.body_json().unwrap(),
        json!({
            "message": "Task started successfully",
            "data": { "taskArn": "t1" },
        })
    );
}

#[tokio::test]
async fn test_失敗時は500でエラー詳細を含める() {
    let launcher = MockTaskLauncher::failing("boom");
    let sut = sut(launcher.clone(), StatusPolicy::Uniform);

    let response = sut.handle(&json!({})).await;

    assert_eq!(response.status_code, 500);
    let body = response.body_json().unwrap();
    assert_eq!(body["message"], "Error starting task");
    assert!(body["error"]["message"].as_str().unwrap().contains("boom"));
    assert_eq!(launcher.requests().len(), 1);
}

#[tokio::test]
async fn test_differentiated方針では失敗時に503を返す() {
    let sut = sut(MockTaskLauncher::failing("boom"), StatusPolicy::Differentiated);

    let response = sut.handle(&json!({})).await;

    assert_eq!(response.status_code, 503);
    assert_eq!(response.body_json().unwrap()["message"], "Error starting task");
}
