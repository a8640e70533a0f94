//! Resolution of sub-build records to executed runs.
//!
//! A record is matched through the parent's declared downstream projects.
//! A downstream project only counts when it also lists the parent among
//! its upstream projects, so a namesake job outside this orchestration
//! never matches.

use crate::subbuild::record::SubBuild;
use crate::util::job_names_match;
use chainbuild_common::{GraphError, ProjectGraph};
use tracing::debug;

pub struct ResultMatcher<'a, G: ProjectGraph> {
    graph: &'a G,
    parent_project: &'a str,
}

impl<'a, G: ProjectGraph> ResultMatcher<'a, G> {
    pub fn new(graph: &'a G, parent_project: &'a str) -> Self {
        Self {
            graph,
            parent_project,
        }
    }

    pub fn parent_project(&self) -> &str {
        self.parent_project
    }

    /// Find the run a sub-build refers to.
    ///
    /// Returns `Ok(None)` when no linked downstream project carries the
    /// record's job name, or when that project has no such build yet. The
    /// first qualifying downstream project in declaration order decides.
    pub fn resolve(&self, sub_build: &SubBuild) -> Result<Option<G::Run>, GraphError> {
        for downstream in self.graph.downstream_projects(self.parent_project)? {
            if !job_names_match(&downstream, sub_build.job_name()) {
                continue;
            }

            let upstream = self.graph.upstream_projects(&downstream)?;
            if !upstream.iter().any(|p| p == self.parent_project) {
                debug!(
                    parent = self.parent_project,
                    downstream = %downstream,
                    "Skipping downstream project without reverse upstream link"
                );
                continue;
            }

            let run = self
                .graph
                .build_by_number(&downstream, sub_build.build_number())?;
            debug!(
                job = %downstream,
                number = sub_build.build_number(),
                found = run.is_some(),
                "Resolved sub-build"
            );
            return Ok(run);
        }

        debug!(%sub_build, "No linked downstream project for sub-build");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{InMemoryGraph, RecordedRun};
    use chainbuild_common::{BuildResult, Execution};
    use chrono::{Local, TimeZone};
    use std::time::Duration;

    fn run(number: u32, result: BuildResult) -> RecordedRun {
        let started = Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        RecordedRun::finished(number, result, Duration::from_secs(30), started)
    }

    fn linked_graph() -> InMemoryGraph {
        let mut graph = InMemoryGraph::new();
        graph
            .add_project("pipeline", &["build-x", "lint"])
            .add_run("build-x", run(5, BuildResult::Success))
            .add_run("build-x", run(7, BuildResult::Failure))
            .add_run("lint", run(1, BuildResult::Unstable));
        graph
    }

    #[test]
    fn test_resolves_linked_downstream_by_number() {
        let graph = linked_graph();
        let matcher = ResultMatcher::new(&graph, "pipeline");
        let sub = SubBuild::new("pipeline", 1, "build-x", 7, "compile");

        let resolved = matcher.resolve(&sub).unwrap().unwrap();
        assert_eq!(resolved.result(), Some(BuildResult::Failure));
        assert_eq!(resolved.url(), "job/build-x/7/");
    }

    #[test]
    fn test_job_name_match_is_case_insensitive() {
        let graph = linked_graph();
        let matcher = ResultMatcher::new(&graph, "pipeline");
        let sub = SubBuild::new("pipeline", 1, "BUILD-X", 5, "compile");

        let resolved = matcher.resolve(&sub).unwrap().unwrap();
        assert_eq!(resolved.result(), Some(BuildResult::Success));
    }

    #[test]
    fn test_first_linked_namesake_in_declaration_order_wins() {
        let mut graph = InMemoryGraph::new();
        graph
            .add_project("pipeline", &["Build-X", "build-x"])
            .add_run("Build-X", run(7, BuildResult::Success))
            .add_run("build-x", run(7, BuildResult::Failure));
        let matcher = ResultMatcher::new(&graph, "pipeline");
        let sub = SubBuild::new("pipeline", 1, "build-x", 7, "compile");

        let resolved = matcher.resolve(&sub).unwrap().unwrap();
        assert_eq!(resolved.result(), Some(BuildResult::Success));
        assert_eq!(resolved.url(), "job/Build-X/7/");
    }

    #[test]
    fn test_missing_build_number_is_unresolved() {
        let graph = linked_graph();
        let matcher = ResultMatcher::new(&graph, "pipeline");
        let sub = SubBuild::new("pipeline", 1, "build-x", 99, "compile");

        assert!(matcher.resolve(&sub).unwrap().is_none());
    }

    #[test]
    fn test_unknown_job_is_unresolved() {
        let graph = linked_graph();
        let matcher = ResultMatcher::new(&graph, "pipeline");
        let sub = SubBuild::new("pipeline", 1, "deploy", 1, "ship");

        assert!(matcher.resolve(&sub).unwrap().is_none());
    }

    #[test]
    fn test_requires_reverse_upstream_link() {
        let mut graph = linked_graph();
        graph.declare_upstream("build-x", &["someone-else"]);
        let matcher = ResultMatcher::new(&graph, "pipeline");
        let sub = SubBuild::new("pipeline", 1, "build-x", 7, "compile");

        assert!(matcher.resolve(&sub).unwrap().is_none());
    }

    #[test]
    fn test_namesake_outside_the_graph_does_not_match() {
        // "lint" exists and has runs, but is not downstream of "nightly".
        let mut graph = linked_graph();
        graph.add_project("nightly", &["build-x"]);
        let matcher = ResultMatcher::new(&graph, "nightly");
        let sub = SubBuild::new("nightly", 3, "lint", 1, "check");

        assert!(matcher.resolve(&sub).unwrap().is_none());
    }

    #[test]
    fn test_renamed_child_is_unresolved() {
        let mut graph = linked_graph();
        graph.rename_project("build-x", "build-x-renamed");
        let matcher = ResultMatcher::new(&graph, "pipeline");
        let sub = SubBuild::new("pipeline", 1, "build-x", 7, "compile");

        assert!(matcher.resolve(&sub).unwrap().is_none());
    }

    #[test]
    fn test_unknown_parent_propagates_graph_error() {
        let graph = linked_graph();
        let matcher = ResultMatcher::new(&graph, "ghost");
        let sub = SubBuild::new("ghost", 1, "build-x", 7, "compile");

        let err = matcher.resolve(&sub).unwrap_err();
        assert!(matches!(err, GraphError::ProjectNotFound(_)));
    }
}
