//! # メッセージルーティングハンドラ
//!
//! ルートキーを完全一致で判定し、対応するクエリを 1 回発行する。
//!
//! ## 設計方針
//!
//! - **呼び出しスコープのセッション**: リポジトリは呼び出しごとに開き、
//!   ディスパッチの結果に関係なく `close()` を 1 回だけ呼ぶ
//! - **固定のエラー本文**: 失敗の内容はログにだけ出力し、本文は
//!   `{ "error": "Failed to retrieve message from database." }` に統一する
//! - **ステータスは方針で決める**: [`StatusPolicy`] に失敗種別を渡して決定する
//!
//! ## ルート
//!
//! | routeKey | クエリ |
//! |----------|--------|
//! | `GET /` | 全件から先頭行 |
//! | `GET /message/{id}` | `id` をバインドして 1 行 |

use edgar_domain::{
    message::{Message, MessageId},
    route::RouteKey,
};
use edgar_infra::repository::{MessageRepository, MessageRepositoryFactory};
use edgar_shared::{
    ErrorBody,
    FunctionResponse,
    StatusPolicy,
    event_log::event,
    log_business_event,
};
use serde::Serialize;

use crate::{error::RouterError, event::RouteEvent};

/// ログとスパンに出力する関数名
pub const FUNCTION_NAME: &str = "message-router";

const FAILURE_MESSAGE: &str = "Failed to retrieve message from database.";

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

/// メッセージルーター
pub struct MessageRouter<F> {
    repositories:  F,
    status_policy: StatusPolicy,
}

impl<F: MessageRepositoryFactory> MessageRouter<F> {
    pub fn new(repositories: F, status_policy: StatusPolicy) -> Self {
        Self {
            repositories,
            status_policy,
        }
    }

    /// イベントを処理する
    pub async fn handle(&self, request: &RouteEvent) -> FunctionResponse {
        tracing::info!(
            route_key = request.route_key(),
            message_id = request.message_id(),
            "イベントを受信"
        );

        let mut repository = self.repositories.open();
        let result = dispatch(&mut repository, request).await;
        repository.close().await;

        match result {
            Ok(message) => {
                log_business_event!(
                    event.category = event::category::MESSAGE,
                    event.action = event::action::MESSAGE_SERVED,
                    event.result = event::result::SUCCESS,
                    route_key = request.route_key(),
                    "メッセージを返した"
                );
                FunctionResponse::ok(&MessageBody {
                    message: message.into_content(),
                })
            }
            Err(e) => {
                let (category, kind) = e.log_context();
                let failure = e.failure_kind();
                match &e {
                    RouterError::Database(infra) => tracing::error!(
                        error.category = category,
                        error.kind = kind,
                        failure.kind = failure.as_str(),
                        span_trace = %infra.span_trace(),
                        "データベースへの接続またはクエリに失敗: {e}"
                    ),
                    _ => tracing::warn!(
                        error.category = category,
                        error.kind = kind,
                        failure.kind = failure.as_str(),
                        "リクエストを処理できません: {e}"
                    ),
                }
                log_business_event!(
                    event.category = event::category::MESSAGE,
                    event.action = event::action::MESSAGE_FAILED,
                    event.result = event::result::FAILURE,
                    route_key = request.route_key(),
                    "メッセージを返せなかった"
                );
                FunctionResponse::json(
                    self.status_policy.status_for(failure),
                    &ErrorBody::new(FAILURE_MESSAGE),
                )
            }
        }
    }
}

/// ルートキーに応じたクエリを発行する
///
/// 接続はリポジトリが最初のクエリ直前に行う。入力不正の場合は接続しない。
async fn dispatch<R: MessageRepository>(
    repository: &mut R,
    request: &RouteEvent,
) -> Result<Message, RouterError> {
    let route = RouteKey::resolve(request.route_key()).map_err(RouterError::UnsupportedRoute)?;

    match route {
        RouteKey::Root => repository
            .find_first()
            .await?
            .ok_or_else(|| RouterError::message_not_found("先頭行")),
        RouteKey::MessageById => {
            let raw = request.message_id().ok_or(RouterError::MissingMessageId)?;
            let id = MessageId::parse(raw).map_err(RouterError::InvalidMessageId)?;
            repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| RouterError::message_not_found(id.to_string()))
        }
    }
}
