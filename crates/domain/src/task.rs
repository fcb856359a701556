//! # ECS タスク起動
//!
//! コンテナオーケストレーションサービスへの「タスク実行」リクエストと、
//! その受付応答を表現する。
//!
//! ## 設計方針
//!
//! - **固定リクエスト**: 起動内容はデプロイ設定から組み立て、イベントの内容には依存しない
//! - **受付応答は不透明**: サービスが返した内容をそのまま呼び出し元へ返すため、
//!   JSON 値として保持する

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoStaticStr;

/// タスクの起動タイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchType {
    /// サーバーレス（Fargate）
    Fargate,
    /// EC2 インスタンス上
    Ec2,
}

/// パブリック IP の割り当て方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicIpPolicy {
    Enabled,
    Disabled,
}

/// awsvpc ネットワーク配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPlacement {
    pub subnets:          Vec<String>,
    pub security_groups:  Vec<String>,
    pub assign_public_ip: PublicIpPolicy,
}

/// タスク実行リクエスト
///
/// 1 回の呼び出しで 1 タスクを起動する。すべてのフィールドは
/// デプロイ単位で固定され、呼び出しごとに変わることはない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLaunchSpec {
    /// クラスタ名または ARN
    pub cluster:                String,
    /// タスク定義（`family:revision` または ARN）
    pub task_definition:        String,
    pub launch_type:            LaunchType,
    pub network:                NetworkPlacement,
    /// ECS Exec を有効にするか
    pub enable_execute_command: bool,
}

/// タスク実行の受付応答
///
/// オーケストレーションサービスの応答をそのまま保持する。
/// ECS の場合は `{ "tasks": [...], "failures": [...] }` の形になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRunAck(Value);

impl TaskRunAck {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }

    /// 起動されたタスクの ARN 一覧（ログ出力用）
    ///
    /// `tasks[].taskArn` を拾う。形が異なる応答では空になる。
    pub fn task_arns(&self) -> Vec<&str> {
        self.0
            .get("tasks")
            .and_then(Value::as_array)
            .map(|tasks| {
                tasks
                    .iter()
                    .filter_map(|task| task.get("taskArn").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// サービスが起動を拒否した件数
    ///
    /// RunTask は API 呼び出し自体が成功しても `failures` に拒否理由を返すことがある。
    pub fn failure_count(&self) -> usize {
        self.0
            .get("failures")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_spec() -> TaskLaunchSpec {
        TaskLaunchSpec {
            cluster:                "edgar-ecs-cluster".to_string(),
            task_definition:        "sample-task:1".to_string(),
            launch_type:            LaunchType::Fargate,
            network:                NetworkPlacement {
                subnets:          vec!["subnet-1".to_string()],
                security_groups:  vec!["sg-1".to_string()],
                assign_public_ip: PublicIpPolicy::Disabled,
            },
            enable_execute_command: true,
        }
    }

    #[test]
    fn test_specはapiと同じキー名でシリアライズされる() {
        let json = serde_json::to_value(sample_spec()).unwrap();

        assert_eq!(
            json,
            json!({
                "cluster": "edgar-ecs-cluster",
                "taskDefinition": "sample-task:1",
                "launchType": "FARGATE",
                "network": {
                    "subnets": ["subnet-1"],
                    "securityGroups": ["sg-1"],
                    "assignPublicIp": "DISABLED"
                },
                "enableExecuteCommand": true
            })
        );
    }

    #[test]
    fn test_列挙値の文字列表現() {
        let launch: &'static str = LaunchType::Fargate.into();
        let ip: &'static str = PublicIpPolicy::Disabled.into();

        assert_eq!(launch, "FARGATE");
        assert_eq!(ip, "DISABLED");
    }

    #[test]
    fn test_ackは受け取った値をそのままシリアライズする() {
        let ack = TaskRunAck::new(json!({ "taskArn": "t1" }));

        assert_eq!(serde_json::to_value(&ack).unwrap(), json!({ "taskArn": "t1" }));
    }

    #[test]
    fn test_task_arnsでtasksのarnを取り出す() {
        let ack = TaskRunAck::new(json!({
            "tasks": [{ "taskArn": "arn:1" }, { "lastStatus": "PROVISIONING" }, { "taskArn": "arn:2" }],
            "failures": [{ "reason": "RESOURCE:MEMORY" }]
        }));

        assert_eq!(ack.task_arns(), vec!["arn:1", "arn:2"]);
        assert_eq!(ack.failure_count(), 1);
    }

    #[test]
    fn test_形の異なる応答では空を返す() {
        let ack = TaskRunAck::new(json!({ "taskArn": "t1" }));

        assert!(ack.task_arns().is_empty());
        assert_eq!(ack.failure_count(), 0);
    }
}
