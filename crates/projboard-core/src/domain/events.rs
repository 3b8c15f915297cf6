//! Events - ボード上で起きた変更
//!
//! Snapshot は必ずどの変更で生まれたかを `cause` として持ちます。

use serde::{Deserialize, Serialize};

use super::{ProjectId, ProjectStatus};

/// BoardEvent はストアが適用した 1 回分の変更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardEvent {
    ProjectCreated {
        id: ProjectId,
    },
    /// `from == to` の場合もある（同じ列へのドロップ）
    ProjectMoved {
        id: ProjectId,
        from: ProjectStatus,
        to: ProjectStatus,
    },
}

impl BoardEvent {
    pub fn project_id(&self) -> ProjectId {
        match self {
            BoardEvent::ProjectCreated { id } => *id,
            BoardEvent::ProjectMoved { id, .. } => *id,
        }
    }
}
