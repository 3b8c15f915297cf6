use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ProjectId;

/// Which column a project sits in.
///
/// State transitions:
/// - Active -> Finished
/// - Finished -> Active
///
/// Both directions are allowed; the board has no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Finished,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status '{0}' (expected 'active' or 'finished')")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ProjectStatus::Active),
            "finished" => Ok(ProjectStatus::Finished),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Validated input for a new project.
///
/// The store trusts these values as-is; range checks on `people` happen
/// in [`crate::domain::form::ProjectForm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub people: u32,
}

impl NewProject {
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people,
        }
    }
}

/// One card on the board.
///
/// `status` is the only field that changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// A freshly created project always starts in the active column.
    pub fn new(id: ProjectId, input: NewProject) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            people: input.people,
            status: ProjectStatus::Active,
        }
    }

    pub fn is_in(&self, status: ProjectStatus) -> bool {
        self.status == status
    }

    /// "1 person assigned" / "3 persons assigned"
    pub fn people_label(&self) -> String {
        if self.people == 1 {
            "1 person assigned".to_string()
        } else {
            format!("{} persons assigned", self.people)
        }
    }
}
