//! # ルートキー
//!
//! HTTP API（API Gateway v2）が付与する `routeKey` を列挙型で表現する。
//! メソッドとパスパターンの組み合わせを完全一致で判定する。

use std::{fmt, str::FromStr};

use strum::{EnumString, IntoStaticStr};

use crate::DomainError;

/// Message Router が受け付けるルート
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum RouteKey {
    /// 先頭のメッセージを返す
    #[strum(serialize = "GET /")]
    Root,
    /// ID を指定してメッセージを返す
    #[strum(serialize = "GET /message/{id}")]
    MessageById,
}

impl RouteKey {
    /// ルートキー文字列を解釈する
    ///
    /// 未知のルートは [`DomainError::Validation`] として返す。
    pub fn resolve(raw: &str) -> Result<Self, DomainError> {
        Self::from_str(raw)
            .map_err(|_| DomainError::Validation(format!("Unsupported route: \"{raw}\"")))
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
