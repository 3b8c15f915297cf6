//! Snapshot handed to subscribers after each mutation.

use serde::{Deserialize, Serialize};

use super::{BoardEvent, Project, ProjectId, ProjectStatus};
use crate::observability::BoardCounts;

/// An owned copy of the project sequence at one point in time.
///
/// Every subscriber gets its own `Snapshot`. Nothing in here aliases the
/// store's state, so holding or mutating a snapshot never affects the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of mutations the store had applied when this was taken.
    pub revision: u64,

    /// The mutation that produced this snapshot (`None` for on-demand reads).
    pub cause: Option<BoardEvent>,

    /// Projects in creation order.
    pub projects: Vec<Project>,
}

impl Snapshot {
    pub fn new(revision: u64, cause: Option<BoardEvent>, projects: Vec<Project>) -> Self {
        Self {
            revision,
            cause,
            projects,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn last(&self) -> Option<&Project> {
        self.projects.last()
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects in one column, creation order preserved.
    pub fn with_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| p.is_in(status))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> BoardCounts {
        BoardCounts::from_projects(&self.projects)
    }

    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }
}
