//! # Model Prompt ライブラリ
//!
//! 設定済みの質問を Bedrock 上のモデルに送り、最初のテキスト応答を返す
//! Lambda 関数の設定、エラー、ハンドラを公開する。

pub mod config;
pub mod error;
pub mod handler;
