//! # ECS タスク起動
//!
//! Amazon ECS の RunTask API でタスクを 1 つ起動する。
//!
//! ## 設計方針
//!
//! - **1 回だけ送信**: リトライしない。失敗はそのまま呼び出し元に返す
//! - **受付応答の変換**: SDK の出力型を JSON に変換し、ドメインの [`TaskRunAck`] として返す
//! - **テスト時はモック**: [`TaskLauncher`] trait で抽象化する
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use edgar_infra::ecs;
//!
//! async fn setup() {
//!     let client = ecs::create_client("us-east-2").await;
//!     let launcher = ecs::EcsTaskLauncher::new(client);
//! }
//! ```

use async_trait::async_trait;
use aws_sdk_ecs::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata},
    operation::run_task::RunTaskOutput,
    types::{
        AssignPublicIp,
        AwsVpcConfiguration,
        LaunchType as EcsLaunchType,
        NetworkConfiguration,
    },
};
use edgar_domain::task::{LaunchType, PublicIpPolicy, TaskLaunchSpec, TaskRunAck};
use serde_json::{Value, json};

use crate::InfraError;

/// タスク起動のインターフェース
#[async_trait]
pub trait TaskLauncher: Send + Sync {
    /// タスク実行リクエストを 1 回送信する
    async fn run_task(&self, spec: &TaskLaunchSpec) -> Result<TaskRunAck, InfraError>;
}

/// AWS ECS によるタスク起動
pub struct EcsTaskLauncher {
    client: Client,
}

impl EcsTaskLauncher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskLauncher for EcsTaskLauncher {
    async fn run_task(&self, spec: &TaskLaunchSpec) -> Result<TaskRunAck, InfraError> {
        let vpc = AwsVpcConfiguration::builder()
            .set_subnets(Some(spec.network.subnets.clone()))
            .set_security_groups(Some(spec.network.security_groups.clone()))
            .assign_public_ip(to_ecs_public_ip(spec.network.assign_public_ip))
            .build()
            .map_err(|e| InfraError::ecs(None, format!("awsvpc 設定の構築に失敗: {e}")))?;

        let output = self
            .client
            .run_task()
            .cluster(&spec.cluster)
            .task_definition(&spec.task_definition)
            .launch_type(to_ecs_launch_type(spec.launch_type))
            .enable_execute_command(spec.enable_execute_command)
            .network_configuration(NetworkConfiguration::builder().awsvpc_configuration(vpc).build())
            .send()
            .await
            .map_err(|err| {
                InfraError::ecs(
                    err.code().map(str::to_string),
                    DisplayErrorContext(&err).to_string(),
                )
            })?;

        Ok(TaskRunAck::new(ack_payload(&output)))
    }
}

fn to_ecs_launch_type(launch_type: LaunchType) -> EcsLaunchType {
    match launch_type {
        LaunchType::Fargate => EcsLaunchType::Fargate,
        LaunchType::Ec2 => EcsLaunchType::Ec2,
    }
}

fn to_ecs_public_ip(policy: PublicIpPolicy) -> AssignPublicIp {
    match policy {
        PublicIpPolicy::Enabled => AssignPublicIp::Enabled,
        PublicIpPolicy::Disabled => AssignPublicIp::Disabled,
    }
}

/// RunTask の出力を JSON に変換する
///
/// API の応答と同じキー名（`tasks[].taskArn`, `failures[].reason` など）を使う。
fn ack_payload(output: &RunTaskOutput) -> Value {
    let tasks: Vec<Value> = output
        .tasks()
        .iter()
        .map(|task| {
            json!({
                "taskArn": task.task_arn(),
                "clusterArn": task.cluster_arn(),
                "taskDefinitionArn": task.task_definition_arn(),
                "lastStatus": task.last_status(),
                "desiredStatus": task.desired_status(),
                "enableExecuteCommand": task.enable_execute_command(),
            })
        })
        .collect();

    let failures: Vec<Value> = output
        .failures()
        .iter()
        .map(|failure| {
            json!({
                "arn": failure.arn(),
                "reason": failure.reason(),
                "detail": failure.detail(),
            })
        })
        .collect();

    json!({ "tasks": tasks, "failures": failures })
}

/// ECS クライアントを作成する
///
/// 認証情報は SDK のデフォルト認証チェーン（Lambda では実行ロール）で解決する。
pub async fn create_client(region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;

    Client::new(&config)
}
