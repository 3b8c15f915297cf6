//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryProjectStore**: プロセス内のボード（唯一の ProjectStore 実装）
//!
//! ID 生成器・時計の実装は trait と同じ `ports` モジュールにあります。

pub mod inmem_store;

// 主要な型を再エクスポート
pub use self::inmem_store::InMemoryProjectStore;
