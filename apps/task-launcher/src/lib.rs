//! # Task Launcher ライブラリ
//!
//! ECS タスクを起動する Lambda 関数の設定とハンドラを公開する。
//! バイナリ（`main.rs`）とテストの両方から利用する。

pub mod config;
pub mod handler;
