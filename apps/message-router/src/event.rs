//! # ルーティングイベント
//!
//! HTTP API（ペイロード形式 2.0）のイベントのうち、ルーティングに使う
//! `routeKey` と `pathParameters` だけを取り出す。

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Message Router が読み取るイベントのフィールド
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEvent {
    #[serde(default)]
    pub route_key:       Option<String>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
}

impl RouteEvent {
    pub fn new(route_key: impl Into<String>) -> Self {
        Self {
            route_key:       Some(route_key.into()),
            path_parameters: None,
        }
    }

    /// パスパラメータを追加する
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// 任意の JSON 値から読み取る
    ///
    /// 形が合わないイベントはルートキーなしとして扱い、未対応ルートになる。
    pub fn from_value(value: &Value) -> Self {
        match Self::deserialize(value) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "イベントの形式が不正です");
                Self::default()
            }
        }
    }

    /// ルートキー（未設定なら空文字列）
    pub fn route_key(&self) -> &str {
        self.route_key.as_deref().unwrap_or_default()
    }

    /// パスパラメータ `id`
    pub fn message_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_http_apiのイベントからルートキーとidを取り出す() {
        let value = json!({
            "version": "2.0",
            "routeKey": "GET /message/{id}",
            "rawPath": "/message/42",
            "pathParameters": { "id": "42" },
            "requestContext": { "http": { "method": "GET" } },
        });

        let event = RouteEvent::from_value(&value);

        assert_eq!(event.route_key(), "GET /message/{id}");
        assert_eq!(event.message_id(), Some("42"));
    }

    #[test]
    fn test_path_parametersがnullでも読み取れる() {
        let event = RouteEvent::from_value(&json!({ "routeKey": "GET /", "pathParameters": null }));

        assert_eq!(event, RouteEvent::new("GET /"));
        assert_eq!(event.message_id(), None);
    }

    #[test]
    fn test_形が合わないイベントはルートキーなしになる() {
        let event = RouteEvent::from_value(&json!(["GET /"]));

        assert_eq!(event, RouteEvent::default());
        assert_eq!(event.route_key(), "");
    }

    #[test]
    fn test_with_path_parameter() {
        let event = RouteEvent::new("GET /message/{id}").with_path_parameter("id", "7");

        assert_eq!(event.message_id(), Some("7"));
    }
}
