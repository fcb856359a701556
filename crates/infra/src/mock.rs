//! # テスト用モック
//!
//! ハンドラテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! edgar-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 各モックは `Clone` で状態を共有する。ハンドラに渡した後も、
//! 手元のクローンから呼び出し履歴を検査できる。

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use edgar_domain::{
    message::{Message, MessageId},
    task::{TaskLaunchSpec, TaskRunAck},
};
use serde_json::Value;

use crate::{
    bedrock::ModelInvoker,
    ecs::TaskLauncher,
    error::InfraError,
    repository::{
        MessageRepository,
        MessageRepositoryFactory,
        message_repository::{SELECT_ALL_CONTENT, SELECT_CONTENT_BY_ID},
    },
};

// ===== MockMessageRepository =====

/// 発行されたクエリの記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub sql:    &'static str,
    pub params: Vec<String>,
}

#[derive(Debug, Default)]
struct MessageState {
    rows:          BTreeMap<i64, String>,
    failure:       Option<String>,
    queries:       Vec<RecordedQuery>,
    opened:        usize,
    connect_count: usize,
    close_count:   usize,
}

/// インメモリのメッセージテーブル
///
/// `open()` ごとに未接続のリポジトリを返し、最初のクエリで接続を数える。
#[derive(Clone, Default)]
pub struct MockMessageRepositoryFactory {
    state: Arc<Mutex<MessageState>>,
}

impl MockMessageRepositoryFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を追加する
    pub fn with_row(self, id: i64, content: impl Into<String>) -> Self {
        self.state.lock().unwrap().rows.insert(id, content.into());
        self
    }

    /// 以降のクエリをすべて失敗させる
    pub fn failing(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().failure = Some(message.into());
        self
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.state.lock().unwrap().queries.clone()
    }

    pub fn opened(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn connect_count(&self) -> usize {
        self.state.lock().unwrap().connect_count
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().unwrap().close_count
    }
}

impl MessageRepositoryFactory for MockMessageRepositoryFactory {
    type Repository = MockMessageRepository;

    fn open(&self) -> Self::Repository {
        self.state.lock().unwrap().opened += 1;
        MockMessageRepository {
            state:     self.state.clone(),
            connected: false,
        }
    }
}

pub struct MockMessageRepository {
    state:     Arc<Mutex<MessageState>>,
    connected: bool,
}

impl MockMessageRepository {
    fn run(
        &mut self,
        sql: &'static str,
        params: Vec<String>,
        pick: impl FnOnce(&BTreeMap<i64, String>) -> Option<String>,
    ) -> Result<Option<Message>, InfraError> {
        let mut state = self.state.lock().unwrap();
        if !self.connected {
            self.connected = true;
            state.connect_count += 1;
        }
        state.queries.push(RecordedQuery { sql, params });
        if let Some(message) = &state.failure {
            return Err(InfraError::unexpected(message.clone()));
        }
        Ok(pick(&state.rows).map(Message::new))
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn find_first(&mut self) -> Result<Option<Message>, InfraError> {
        self.run(SELECT_ALL_CONTENT, Vec::new(), |rows| {
            rows.values().next().cloned()
        })
    }

    async fn find_by_id(&mut self, id: MessageId) -> Result<Option<Message>, InfraError> {
        // 実装は i64 をバインドする。記録はその値の文字列表現
        self.run(SELECT_CONTENT_BY_ID, vec![id.to_string()], |rows| {
            rows.get(&id.as_i64()).cloned()
        })
    }

    async fn close(&mut self) {
        self.state.lock().unwrap().close_count += 1;
        self.connected = false;
    }
}

// ===== MockTaskLauncher =====

/// 固定の応答を返すタスク起動モック
#[derive(Clone)]
pub struct MockTaskLauncher {
    outcome:  Arc<Result<Value, String>>,
    requests: Arc<Mutex<Vec<TaskLaunchSpec>>>,
}

impl MockTaskLauncher {
    /// 受付応答を返すモック
    pub fn acknowledging(payload: Value) -> Self {
        Self {
            outcome:  Arc::new(Ok(payload)),
            requests: Arc::default(),
        }
    }

    /// 失敗を返すモック
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome:  Arc::new(Err(message.into())),
            requests: Arc::default(),
        }
    }

    /// 送信されたリクエスト
    pub fn requests(&self) -> Vec<TaskLaunchSpec> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskLauncher for MockTaskLauncher {
    async fn run_task(&self, spec: &TaskLaunchSpec) -> Result<TaskRunAck, InfraError> {
        self.requests.lock().unwrap().push(spec.clone());
        match self.outcome.as_ref() {
            Ok(payload) => Ok(TaskRunAck::new(payload.clone())),
            Err(message) => Err(InfraError::ecs(None, message.clone())),
        }
    }
}

// ===== MockModelInvoker =====

/// 固定の応答本文を返すモデル呼び出しモック
#[derive(Clone)]
pub struct MockModelInvoker {
    outcome: Arc<Result<Vec<u8>, String>>,
    calls:   Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MockModelInvoker {
    pub fn replying(body: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Arc::new(Ok(body.into())),
            calls:   Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Arc::new(Err(message.into())),
            calls:   Arc::default(),
        }
    }

    /// 呼び出し履歴（モデル ID とリクエスト本文）
    pub fn calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for MockModelInvoker {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, InfraError> {
        self.calls.lock().unwrap().push((model_id.to_string(), body));
        match self.outcome.as_ref() {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(InfraError::bedrock(None, message.clone())),
        }
    }
}
