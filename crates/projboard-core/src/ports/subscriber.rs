//! Subscriber port - スナップショットの受け取り手

use crate::domain::Snapshot;

/// Subscriber はストアの変更ごとに呼ばれる
///
/// - 呼び出しは変更が完了した後（部分的な状態は見えない）
/// - 呼び出し順は登録順
/// - `Snapshot` は subscriber ごとに独立したコピー
///
/// クロージャ `FnMut(Snapshot) + Send` はそのまま Subscriber として使えます。
pub trait Subscriber: Send {
    fn notify(&mut self, snapshot: Snapshot);
}

impl<F> Subscriber for F
where
    F: FnMut(Snapshot) + Send,
{
    fn notify(&mut self, snapshot: Snapshot) {
        self(snapshot)
    }
}
