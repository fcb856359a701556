//! # メッセージ
//!
//! `messages` テーブルの行を表現する。このシステムからは読み取り専用。
//!
//! ## 設計判断
//!
//! `MessageId` はパスパラメータ（文字列）を整数に検証した Newtype。
//! 検証済みの値だけがクエリのバインドパラメータに渡るため、
//! SQL 文字列への埋め込みは型の上で起こり得ない。

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// メッセージの一意識別子
///
/// `messages.id` カラム（整数）に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct MessageId(i64);

impl MessageId {
    /// 整数値から ID を作成する
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// パスパラメータの文字列から ID を作成する
    ///
    /// 前後の空白は許容しない。整数として解釈できない場合は
    /// [`DomainError::Validation`] を返す。
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.parse::<i64>().map(Self).map_err(|_| {
            DomainError::Validation(format!("メッセージ ID は整数である必要があります: {raw:?}"))
        })
    }

    /// 内部の整数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// メッセージ本文
///
/// クエリは `content` カラムのみを取得するため、本文だけを保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    content: String,
}

impl Message {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_parseで整数のidを受け付ける() {
        let id = MessageId::parse("42").unwrap();

        assert_eq!(id.as_i64(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1; DROP TABLE messages")]
    #[case(" 42")]
    #[case("4.2")]
    fn test_parseで整数以外はバリデーションエラー(#[case] raw: &str) {
        let result = MessageId::parse(raw);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_messageの本文を取り出せる() {
        let message = Message::new("hello");

        assert_eq!(message.content(), "hello");
        assert_eq!(message.into_content(), "hello");
    }
}
