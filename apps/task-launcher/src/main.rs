//! # Task Launcher
//!
//! 呼び出されるたびに ECS タスクを 1 つ起動する Lambda 関数。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ECS_REGION` | No | ECS のリージョン（デフォルト: `us-east-2`） |
//! | `ECS_CLUSTER` | No | クラスタ名（デフォルト: `edgar-ecs-cluster`） |
//! | `ECS_TASK_DEFINITION` | No | タスク定義 ARN |
//! | `ECS_SUBNETS` | No | サブネット ID（カンマ区切り） |
//! | `ECS_SECURITY_GROUPS` | No | セキュリティグループ ID（カンマ区切り） |
//! | `ERROR_STATUS_POLICY` | No | `uniform`（デフォルト）または `differentiated` |
//! | `LOG_FORMAT` | No | `json`（デフォルト）または `pretty` |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,edgar=debug`） |

use std::sync::Arc;

use edgar_infra::ecs::{self, EcsTaskLauncher};
use edgar_shared::{
    StatusPolicy,
    canonical_log::CanonicalLogLineLayer,
    observability::{TracingConfig, init_tracing},
};
use edgar_task_launcher::{
    config::LauncherConfig,
    handler::{FUNCTION_NAME, TaskLaunchHandler},
};
use lambda_runtime::{LambdaEvent, service_fn, tower::Layer as _};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env(FUNCTION_NAME));

    let config = LauncherConfig::from_env();
    tracing::info!(
        region = %config.region,
        cluster = %config.cluster,
        task_definition = %config.task_definition,
        "Task Launcher を起動します"
    );

    // 依存コンポーネントはコールドスタート時に 1 回だけ初期化する
    let client = ecs::create_client(&config.region).await;
    let handler = Arc::new(TaskLaunchHandler::new(
        EcsTaskLauncher::new(client),
        config.launch_spec(),
        StatusPolicy::from_env(),
    ));

    let service = CanonicalLogLineLayer::new(FUNCTION_NAME).layer(service_fn(
        move |event: LambdaEvent<Value>| {
            let handler = Arc::clone(&handler);
            async move { Ok::<_, lambda_runtime::Error>(handler.handle(&event.payload).await) }
        },
    ));

    lambda_runtime::run(service)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
