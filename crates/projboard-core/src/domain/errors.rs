//! Errors - ボード操作のエラー型
//!
//! 入力エラー（FormError）以外で起きうるのは「見つからない」「再入」「ID 枯渇」だけです。
//! I/O がないのでリトライ対象のエラーはありません。

use thiserror::Error;

use super::ProjectId;
use super::form::FormError;

/// IdError は ID 生成の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// 同一ミリ秒内で単調増加 ULID を使い切った
    #[error("id space exhausted for the current millisecond")]
    Exhausted,
}

/// BoardError はストア操作のエラー
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// subscriber の中から同じスレッドで変更操作を呼んだ
    #[error("store mutation attempted from inside a subscriber notification")]
    ReentrantMutation,

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    InvalidInput(#[from] FormError),
}
