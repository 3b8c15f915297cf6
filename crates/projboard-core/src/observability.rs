//! Observability: column counts and tracing setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::domain::{Project, ProjectStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCounts {
    pub active: usize,
    pub finished: usize,
}

impl BoardCounts {
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut counts = Self::default();
        for project in projects {
            match project.status {
                ProjectStatus::Active => counts.active += 1,
                ProjectStatus::Finished => counts.finished += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.active + self.finished
    }
}

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_level`. Calling this twice is harmless;
/// the second call keeps the first subscriber.
pub fn trace_init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // ignore error: a global subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
