//! projboard-core
//!
//! Core building blocks for the project board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, project, events, snapshot, validation, form, errors）
//! - **ports**: 抽象化レイヤー（ProjectStore, Subscriber, IdGenerator, Clock）
//! - **impls**: 実装（InMemoryProjectStore）
//! - **app**: view の合成と AppBuilder
//! - **settings**: 実行時設定
//! - **observability**: 列ごとの件数と tracing の初期化

pub mod domain;
pub mod ports;
pub mod impls;
pub mod app;
pub mod settings;
pub mod observability;

pub use observability::trace_init;
