//! IdGenerator port - ID 生成の抽象化
//!
//! ストアは生成された ID をそのまま信用するので、一意性はここで保証します。
//!
//! # 実装
//! - **UlidGenerator**: 単調増加 ULID（デフォルト）
//! - **SequentialIdGenerator**: 1, 2, 3, ... のカウンタ（決定的なテスト・デモ用）

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use ulid::Ulid;

use crate::domain::{IdError, ProjectId};
use crate::ports::Clock;

/// IdGenerator は衝突しない ProjectId を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（ストアを Arc で共有するため）
pub trait IdGenerator: Send + Sync {
    fn generate_project_id(&self) -> Result<ProjectId, IdError>;
}

/// UlidGenerator は単調増加する ULID を生成
///
/// 同じミリ秒内（または時計が巻き戻った場合）は直前の ULID を +1 するので、
/// 生成順序 = ソート順が常に成り立ち、重複もしません。
pub struct UlidGenerator<C> {
    clock: C,
    last: Mutex<Option<Ulid>>,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: Mutex::new(None),
        }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_project_id(&self) -> Result<ProjectId, IdError> {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        let candidate = Ulid::from_parts(timestamp_ms, rand::random());

        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let next = match *last {
            Some(prev) if candidate <= prev => prev.increment().ok_or(IdError::Exhausted)?,
            _ => candidate,
        };
        *last = Some(next);

        Ok(ProjectId::from(next))
    }
}

/// SequentialIdGenerator は 1 から順に番号を振る
///
/// ULID の timestamp 部分は 0 になるので、表示は `project-00000000000000000000000001` の形。
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_project_id(&self) -> Result<ProjectId, IdError> {
        // 上限に達したら巻き戻さずに止める
        let prev = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|_| IdError::Exhausted)?;
        Ok(ProjectId::from(Ulid::from(u128::from(prev) + 1)))
    }
}
