//! # タスク起動ハンドラ
//!
//! 受け取ったイベントの内容に関係なく、設定済みのタスク実行リクエストを
//! ECS に 1 回だけ送信し、結果を HTTP 形式のレスポンスに変換する。
//!
//! ## レスポンス
//!
//! - 成功: 200 `{ "message": "Task started successfully", "data": <受付応答> }`
//! - 失敗: 500 `{ "message": "Error starting task", "error": <エラー詳細> }`
//!   （`Differentiated` 方針では 503）

use edgar_domain::task::{TaskLaunchSpec, TaskRunAck};
use edgar_infra::{ErrorPayload, ecs::TaskLauncher};
use edgar_shared::{
    FailureKind,
    FunctionResponse,
    StatusPolicy,
    event_log::{error as log_error, event},
    log_business_event,
};
use serde::Serialize;
use serde_json::Value;

/// ログとスパンに出力する関数名
pub const FUNCTION_NAME: &str = "task-launcher";

const SUCCESS_MESSAGE: &str = "Task started successfully";
const FAILURE_MESSAGE: &str = "Error starting task";

#[derive(Debug, Serialize)]
struct LaunchSucceeded<'a> {
    message: &'static str,
    data:    &'a TaskRunAck,
}

#[derive(Debug, Serialize)]
struct LaunchFailed {
    message: &'static str,
    error:   ErrorPayload,
}

/// タスク起動ハンドラ
pub struct TaskLaunchHandler<L> {
    launcher:      L,
    spec:          TaskLaunchSpec,
    status_policy: StatusPolicy,
}

impl<L: TaskLauncher> TaskLaunchHandler<L> {
    pub fn new(launcher: L, spec: TaskLaunchSpec, status_policy: StatusPolicy) -> Self {
        Self {
            launcher,
            spec,
            status_policy,
        }
    }

    /// イベントを処理する
    ///
    /// イベントはログに記録するだけで、リクエストの内容には影響しない。
    pub async fn handle(&self, payload: &Value) -> FunctionResponse {
        tracing::info!(payload = %payload, "イベントを受信");

        match self.launcher.run_task(&self.spec).await {
            Ok(ack) => {
                tracing::info!(data = %ack.payload(), "{SUCCESS_MESSAGE}");
                log_business_event!(
                    event.category = event::category::TASK,
                    event.action = event::action::TASK_LAUNCHED,
                    event.result = event::result::SUCCESS,
                    task.cluster = %self.spec.cluster,
                    task.count = ack.task_arns().len(),
                    task.failure_count = ack.failure_count(),
                    "タスクの起動を受け付けた"
                );
                FunctionResponse::ok(&LaunchSucceeded {
                    message: SUCCESS_MESSAGE,
                    data:    &ack,
                })
            }
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::SERVICE_COMMUNICATION,
                    error.code = e.service_code().unwrap_or("-"),
                    "{FAILURE_MESSAGE}: {e}"
                );
                log_business_event!(
                    event.category = event::category::TASK,
                    event.action = event::action::TASK_LAUNCH_FAILED,
                    event.result = event::result::FAILURE,
                    task.cluster = %self.spec.cluster,
                    "タスクの起動に失敗した"
                );
                FunctionResponse::json(
                    self.status_policy
                        .status_for(FailureKind::UpstreamUnavailable),
                    &LaunchFailed {
                        message: FAILURE_MESSAGE,
                        error:   e.payload(),
                    },
                )
            }
        }
    }
}
