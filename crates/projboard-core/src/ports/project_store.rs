//! ProjectStore port - ボードの正本（source of truth）
//!
//! アプリケーションで 1 つだけ作り、`Arc<dyn ProjectStore>` として各 view に渡します。
//! グローバルな singleton は持ちません。

use crate::domain::{BoardError, NewProject, Project, ProjectId, ProjectStatus, Snapshot};
use crate::ports::Subscriber;

/// ProjectStore はプロジェクト一覧と subscriber を管理
///
/// # 設計原則
/// - 変更（create / move）と通知は 1 つのクリティカルセクション
/// - 通知は同期的、登録順
/// - 通知中に登録された subscriber は次の変更から呼ばれる
/// - 通知中の同一スレッドからの変更は `BoardError::ReentrantMutation`
pub trait ProjectStore: Send + Sync {
    /// 以後のすべての変更で呼ばれる subscriber を登録する。
    /// 登録時に現在の状態は送らない。解除はできない。
    fn subscribe(&self, subscriber: Box<dyn Subscriber>);

    /// 新しいプロジェクトを Active で末尾に追加し、通知してから返す。
    fn create_project(&self, input: NewProject) -> Result<Project, BoardError>;

    /// プロジェクトの status を変更し、通知してから更新後の値を返す。
    /// 見つからなければ `ProjectNotFound` で、通知はしない。
    fn move_project(&self, id: ProjectId, status: ProjectStatus) -> Result<Project, BoardError>;

    /// 現在の状態のコピー（通知は伴わない）
    fn snapshot(&self) -> Snapshot;

    fn get(&self, id: ProjectId) -> Option<Project>;
}
