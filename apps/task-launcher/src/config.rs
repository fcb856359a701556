//! # Task Launcher 設定
//!
//! 起動するタスクのデプロイ設定。既定値はこの関数を配置した環境の値で、
//! 環境変数で上書きできる。

use edgar_domain::task::{LaunchType, NetworkPlacement, PublicIpPolicy, TaskLaunchSpec};

const DEFAULT_REGION: &str = "us-east-2";
const DEFAULT_CLUSTER: &str = "edgar-ecs-cluster";
const DEFAULT_TASK_DEFINITION: &str =
    "arn:aws:ecs:us-east-2:609543642808:task-definition/sample-task:1";
const DEFAULT_SUBNET: &str = "subnet-0b71bfebd05e0ff53";
const DEFAULT_SECURITY_GROUP: &str = "sg-01f36755038d80d48";

/// Task Launcher の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// ECS のリージョン
    pub region:          String,
    /// クラスタ名
    pub cluster:         String,
    /// タスク定義 ARN
    pub task_definition: String,
    pub subnets:         Vec<String>,
    pub security_groups: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            region:          DEFAULT_REGION.to_string(),
            cluster:         DEFAULT_CLUSTER.to_string(),
            task_definition: DEFAULT_TASK_DEFINITION.to_string(),
            subnets:         vec![DEFAULT_SUBNET.to_string()],
            security_groups: vec![DEFAULT_SECURITY_GROUP.to_string()],
        }
    }
}

impl LauncherConfig {
    /// 任意のキー検索関数から設定を読み込む
    ///
    /// 未設定のキーは既定値を使う。`ECS_SUBNETS` と `ECS_SECURITY_GROUPS` はカンマ区切りで、
    /// 要素が 1 つもない場合も既定値を使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            region:          lookup("ECS_REGION").unwrap_or(defaults.region),
            cluster:         lookup("ECS_CLUSTER").unwrap_or(defaults.cluster),
            task_definition: lookup("ECS_TASK_DEFINITION").unwrap_or(defaults.task_definition),
            subnets:         lookup("ECS_SUBNETS")
                .map(|value| split_list(&value))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.subnets),
            security_groups: lookup("ECS_SECURITY_GROUPS")
                .map(|value| split_list(&value))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.security_groups),
        }
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// タスク実行リクエストを組み立てる
    ///
    /// 起動タイプは Fargate、パブリック IP は無効、ECS Exec は有効で固定。
    pub fn launch_spec(&self) -> TaskLaunchSpec {
        TaskLaunchSpec {
            cluster:                self.cluster.clone(),
            task_definition:        self.task_definition.clone(),
            launch_type:            LaunchType::Fargate,
            network:                NetworkPlacement {
                subnets:          self.subnets.clone(),
                security_groups:  self.security_groups.clone(),
                assign_public_ip: PublicIpPolicy::Disabled,
            },
            enable_execute_command: true,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
