//! In-memory project graph and build history.
//!
//! [`InMemoryGraph`] implements [`ProjectGraph`] over a list of declared
//! projects and their recorded runs. It backs the CLI (loaded from a TOML
//! file) and the tests.
//!
//! # File Format
//!
//! ```toml
//! [[projects]]
//! name = "pipeline"
//! downstream = ["build-x", "lint"]
//!
//! [[projects]]
//! name = "build-x"
//!
//! [[projects.runs]]
//! number = 7
//! result = "FAILURE"
//! duration_secs = 65
//! started_at = "2024-03-01T12:30:05+00:00"
//! ```
//!
//! Upstream projects are derived from the downstream declarations unless a
//! project lists `upstream` explicitly.

use crate::util::format_duration;
use anyhow::{Context, Result};
use chainbuild_common::{BuildResult, Execution, GraphError, ProjectGraph, StatusIcon};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// A recorded run of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedRun {
    /// Owning project, filled in when the run is attached to a project
    #[serde(default, skip_serializing)]
    project: String,
    pub number: u32,
    /// `None` while the run is in progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<BuildResult>,
    #[serde(default)]
    pub building: bool,
    #[serde(default)]
    pub duration_secs: u64,
    pub started_at: DateTime<Local>,
}

impl RecordedRun {
    /// A finished run.
    pub fn finished(
        number: u32,
        result: BuildResult,
        duration: Duration,
        started_at: DateTime<Local>,
    ) -> Self {
        Self {
            project: String::new(),
            number,
            result: Some(result),
            building: false,
            duration_secs: duration.as_secs(),
            started_at,
        }
    }

    /// A run that has started but not produced a result yet.
    pub fn in_progress(number: u32, started_at: DateTime<Local>) -> Self {
        Self {
            project: String::new(),
            number,
            result: None,
            building: true,
            duration_secs: 0,
            started_at,
        }
    }
}

impl Execution for RecordedRun {
    fn result(&self) -> Option<BuildResult> {
        self.result
    }

    fn icon(&self) -> String {
        StatusIcon::for_result(self.result).image(self.building)
    }

    fn duration_string(&self) -> String {
        format_duration(Duration::from_secs(self.duration_secs))
    }

    fn url(&self) -> String {
        format!("job/{}/{}/", self.project, self.number)
    }

    fn timestamp(&self) -> DateTime<Local> {
        self.started_at
    }
}

/// A declared project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDef {
    pub name: String,
    #[serde(default)]
    pub downstream: Vec<String>,
    /// Explicit upstream declaration; derived from downstream edges when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<Vec<String>>,
    #[serde(default)]
    pub runs: Vec<RecordedRun>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryGraph {
    #[serde(default)]
    projects: Vec<ProjectDef>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a graph from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read graph file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse a graph from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let mut graph: Self = toml::from_str(content).context("Failed to parse graph file")?;
        for project in &mut graph.projects {
            for run in &mut project.runs {
                run.project = project.name.clone();
            }
        }
        Ok(graph)
    }

    /// Declare a project with its downstream projects, replacing any
    /// previous declaration of the same name but keeping its runs.
    pub fn add_project(&mut self, name: &str, downstream: &[&str]) -> &mut Self {
        let downstream = downstream.iter().map(|d| d.to_string()).collect();
        match self.project_mut(name) {
            Some(project) => project.downstream = downstream,
            None => self.projects.push(ProjectDef {
                name: name.to_string(),
                downstream,
                ..Default::default()
            }),
        }
        self
    }

    /// Override the derived upstream list of a project.
    pub fn declare_upstream(&mut self, name: &str, upstream: &[&str]) -> &mut Self {
        if self.project_mut(name).is_none() {
            self.add_project(name, &[]);
        }
        if let Some(project) = self.project_mut(name) {
            project.upstream = Some(upstream.iter().map(|u| u.to_string()).collect());
        }
        self
    }

    /// Record a run for a project, replacing an existing run with the same number.
    pub fn add_run(&mut self, project: &str, mut run: RecordedRun) -> &mut Self {
        if self.project_mut(project).is_none() {
            self.add_project(project, &[]);
        }
        if let Some(def) = self.project_mut(project) {
            run.project = def.name.clone();
            def.runs.retain(|r| r.number != run.number);
            def.runs.push(run);
        }
        self
    }

    /// Rename a project and every edge that refers to it.
    pub fn rename_project(&mut self, from: &str, to: &str) -> &mut Self {
        for project in &mut self.projects {
            if project.name == from {
                project.name = to.to_string();
                for run in &mut project.runs {
                    run.project = to.to_string();
                }
            }
            for edge in project.downstream.iter_mut() {
                if edge == from {
                    *edge = to.to_string();
                }
            }
            if let Some(upstream) = project.upstream.as_mut() {
                for edge in upstream.iter_mut() {
                    if edge == from {
                        *edge = to.to_string();
                    }
                }
            }
        }
        self
    }

    pub fn projects(&self) -> &[ProjectDef] {
        &self.projects
    }

    fn project(&self, name: &str) -> Option<&ProjectDef> {
        self.projects.iter().find(|p| p.name == name)
    }

    fn project_mut(&mut self, name: &str) -> Option<&mut ProjectDef> {
        self.projects.iter_mut().find(|p| p.name == name)
    }
}

impl ProjectGraph for InMemoryGraph {
    type Run = RecordedRun;

    fn downstream_projects(&self, project: &str) -> Result<Vec<String>, GraphError> {
        let def = self
            .project(project)
            .ok_or_else(|| GraphError::ProjectNotFound(project.to_string()))?;
        // Edges to projects that no longer exist are dropped.
        Ok(def
            .downstream
            .iter()
            .filter(|d| self.project(d).is_some())
            .cloned()
            .collect())
    }

    fn upstream_projects(&self, project: &str) -> Result<Vec<String>, GraphError> {
        let def = self
            .project(project)
            .ok_or_else(|| GraphError::ProjectNotFound(project.to_string()))?;
        if let Some(upstream) = &def.upstream {
            return Ok(upstream.clone());
        }
        Ok(self
            .projects
            .iter()
            .filter(|p| p.downstream.iter().any(|d| d == project))
            .map(|p| p.name.clone())
            .collect())
    }

    fn build_by_number(
        &self,
        project: &str,
        number: u32,
    ) -> Result<Option<RecordedRun>, GraphError> {
        let def = self
            .project(project)
            .ok_or_else(|| GraphError::ProjectNotFound(project.to_string()))?;
        Ok(def.runs.iter().find(|r| r.number == number).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn started() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()
    }

    fn sample_graph() -> InMemoryGraph {
        let mut graph = InMemoryGraph::new();
        graph
            .add_project("pipeline", &["build-x", "lint"])
            .add_project("build-x", &[])
            .add_project("lint", &[])
            .add_run(
                "build-x",
                RecordedRun::finished(7, BuildResult::Failure, Duration::from_secs(65), started()),
            );
        graph
    }

    #[test]
    fn test_upstream_is_derived_from_downstream_edges() {
        let graph = sample_graph();
        assert_eq!(
            graph.downstream_projects("pipeline").unwrap(),
            vec!["build-x", "lint"]
        );
        assert_eq!(graph.upstream_projects("lint").unwrap(), vec!["pipeline"]);
        assert!(graph.upstream_projects("pipeline").unwrap().is_empty());
    }

    #[test]
    fn test_explicit_upstream_overrides_derived() {
        let mut graph = sample_graph();
        graph.declare_upstream("lint", &["other"]);
        assert_eq!(graph.upstream_projects("lint").unwrap(), vec!["other"]);
    }

    #[test]
    fn test_unknown_project_is_an_error() {
        let graph = sample_graph();
        let err = graph.downstream_projects("missing").unwrap_err();
        assert!(matches!(err, GraphError::ProjectNotFound(name) if name == "missing"));
    }

    #[test]
    fn test_build_by_number() {
        let graph = sample_graph();
        let run = graph.build_by_number("build-x", 7).unwrap().unwrap();
        assert_eq!(run.result(), Some(BuildResult::Failure));
        assert_eq!(run.icon(), "red.png");
        assert_eq!(run.duration_string(), "1 min 5 sec");
        assert_eq!(run.url(), "job/build-x/7/");
        assert!(graph.build_by_number("build-x", 8).unwrap().is_none());
    }

    #[test]
    fn test_in_progress_run_uses_animated_icon() {
        let mut graph = sample_graph();
        graph.add_run("lint", RecordedRun::in_progress(2, started()));
        let run = graph.build_by_number("lint", 2).unwrap().unwrap();
        assert!(run.result().is_none());
        assert_eq!(run.icon(), "grey_anime.gif");
    }

    #[test]
    fn test_rename_updates_edges_and_urls() {
        let mut graph = sample_graph();
        graph.rename_project("build-x", "build-y");
        assert_eq!(
            graph.downstream_projects("pipeline").unwrap(),
            vec!["build-y", "lint"]
        );
        let run = graph.build_by_number("build-y", 7).unwrap().unwrap();
        assert_eq!(run.url(), "job/build-y/7/");
    }

    #[test]
    fn test_edges_to_removed_projects_are_dropped() {
        let mut graph = InMemoryGraph::new();
        graph.add_project("pipeline", &["gone", "lint"]).add_project("lint", &[]);
        assert_eq!(graph.downstream_projects("pipeline").unwrap(), vec!["lint"]);
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[[projects]]
name = "pipeline"
downstream = ["build-x"]

[[projects]]
name = "build-x"

[[projects.runs]]
number = 7
result = "UNSTABLE"
duration_secs = 12
started_at = "2024-03-01T12:30:05+00:00"
"#;
        let graph = InMemoryGraph::parse(content).unwrap();
        assert_eq!(graph.projects().len(), 2);
        let run = graph.build_by_number("build-x", 7).unwrap().unwrap();
        assert_eq!(run.result(), Some(BuildResult::Unstable));
        assert_eq!(run.url(), "job/build-x/7/");
        assert_eq!(run.duration_string(), "12 sec");
    }
}
