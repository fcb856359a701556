//! # 関数レスポンス
//!
//! Lambda 関数が返す HTTP 形式のレスポンス `{ statusCode, headers, body }` を提供する。
//!
//! `body` は常に JSON 文字列。API Gateway（HTTP API）はこの形をそのまま
//! HTTP レスポンスに変換する。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// シリアライズに失敗した場合に返す本文
const SERIALIZATION_FAILURE_BODY: &str = r#"{"error":"Failed to serialize response."}"#;

/// Lambda 関数の戻り値
///
/// ## 使用例
///
/// ```
/// use edgar_shared::FunctionResponse;
/// use serde_json::json;
///
/// let response = FunctionResponse::json(200, &json!({ "message": "hello" }));
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.body, r#"{"message":"hello"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers:     BTreeMap<String, String>,
    pub body:        String,
}

impl FunctionResponse {
    /// ペイロードを JSON 本文にしたレスポンスを作成する
    ///
    /// シリアライズできないペイロード（文字列以外のキーを持つマップなど）の場合は
    /// 500 と固定のエラー本文を返す。本文が JSON でなくなることはない。
    pub fn json<T: Serialize + ?Sized>(status_code: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self {
                status_code,
                headers: BTreeMap::new(),
                body,
            },
            Err(_) => Self {
                status_code: 500,
                headers:     BTreeMap::new(),
                body:        SERIALIZATION_FAILURE_BODY.to_string(),
            },
        }
    }

    /// 200 OK のレスポンスを作成する
    pub fn ok<T: Serialize + ?Sized>(payload: &T) -> Self {
        Self::json(200, payload)
    }

    /// ヘッダを追加する
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// 本文を JSON として解釈する
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
