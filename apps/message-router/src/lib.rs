//! # Message Router ライブラリ
//!
//! HTTP API のルートキーに応じて `messages` テーブルを読み取る Lambda 関数の
//! イベント型、エラー、ハンドラを公開する。

pub mod error;
pub mod event;
pub mod handler;
