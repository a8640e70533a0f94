//! Collaborator interfaces for project linkage and build history.

use crate::BuildResult;
use chrono::{DateTime, Local};
use thiserror::Error;

/// Errors raised by a [`ProjectGraph`] implementation.
///
/// A build that simply has not run yet is not an error; lookups return
/// `Ok(None)` for that case.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Lookup failed for project '{project}': {message}")]
    Lookup { project: String, message: String },
}

/// A concrete executed run of a project.
pub trait Execution {
    /// The run's result, or `None` while it is still in progress.
    fn result(&self) -> Option<BuildResult>;

    /// Status icon token, e.g. `blue.png`.
    fn icon(&self) -> String;

    /// Human readable duration, e.g. `1 min 5 sec`.
    fn duration_string(&self) -> String;

    /// Relative URL of the run.
    fn url(&self) -> String;

    /// Local start time of the run.
    fn timestamp(&self) -> DateTime<Local>;
}

/// Read-only view of the project graph and its build history.
///
/// Projects are identified by their unique full name. Ordering of the
/// returned lists is the declaration order of the underlying model.
pub trait ProjectGraph {
    type Run: Execution;

    /// Projects declared downstream of `project`.
    fn downstream_projects(&self, project: &str) -> Result<Vec<String>, GraphError>;

    /// Projects declared upstream of `project`.
    fn upstream_projects(&self, project: &str) -> Result<Vec<String>, GraphError>;

    /// Build `number` of `project`, if it exists.
    fn build_by_number(&self, project: &str, number: u32)
    -> Result<Option<Self::Run>, GraphError>;
}
