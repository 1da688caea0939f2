//! メニュー用のプロセスアイコンを取得・生成するツールのライブラリ部分。
//!
//! UI層 (`main.rs` / `cli.rs`) からは `workflow::Pipeline` だけを呼び出す。

pub mod capability;
pub mod domain;
pub mod error;
pub mod workflow;
