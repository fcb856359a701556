//! # Canonical Log Line レイヤー
//!
//! Lambda 呼び出し完了時に、その呼び出しの重要情報を 1 行に集約した
//! サマリログ（Canonical Log Line）を出力する tower Layer。
//!
//! Stripe が提唱した [Canonical Log Lines パターン](https://brandur.org/canonical-log-lines)
//! に基づき、ログの検索性・集計性を向上させる。
//!
//! ## スパン
//!
//! 呼び出し全体を `invocation` スパン（`function`, `request_id`）で包む。
//! ハンドラ内のログにも `request_id` が付与される。
//!
//! ```text
//! lambda_runtime::run → CanonicalLogLineLayer → service_fn(handler)
//! ```

use std::{
    fmt::Display,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use lambda_runtime::{
    LambdaEvent,
    tower::{Layer, Service},
};
use tracing::Instrument as _;

use crate::FunctionResponse;

/// Canonical Log Line を出力する Layer
///
/// 呼び出し完了時に INFO レベルで `log.type = "canonical"` マーカー付きの
/// サマリログを出力する。ハンドラがエラーを返した場合は ERROR レベル。
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer {
    function: &'static str,
}

impl CanonicalLogLineLayer {
    /// 関数名を指定して Layer を作成する
    pub fn new(function: &'static str) -> Self {
        Self { function }
    }
}

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService {
            inner,
            function: self.function,
        }
    }
}

/// Canonical Log Line を出力する Service
///
/// [`CanonicalLogLineLayer`] が生成する Service 実装。
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner:    S,
    function: &'static str,
}

impl<S, E> Service<LambdaEvent<E>> for CanonicalLogLineService<S>
where
    S: Service<LambdaEvent<E>, Response = FunctionResponse> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Display + 'static,
    E: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = FunctionResponse;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, event: LambdaEvent<E>) -> Self::Future {
        // clone-swap パターン: poll_ready で得た readiness を保持する inner を使う
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let span = tracing::info_span!(
            "invocation",
            function = self.function,
            request_id = %event.context.request_id,
        );
        let start = Instant::now();

        Box::pin(
            async move {
                let result = inner.call(event).await;
                let latency_ms = start.elapsed().as_millis() as u64;

                match &result {
                    Ok(response) => {
                        tracing::info!(
                            log.r#type = "canonical",
                            http.status_code = response.status_code,
                            invocation.latency_ms = latency_ms,
                            "呼び出し完了"
                        );
                    }
                    Err(err) => {
                        tracing::error!(
                            log.r#type = "canonical",
                            invocation.latency_ms = latency_ms,
                            error.message = %err,
                            "呼び出し処理エラー"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
