//! Parent run controller.
//!
//! Drives the parent build's own work, then rolls the sub-build results up
//! into the terminal result reported for the parent.

use crate::build::ParentBuild;
use crate::config::DisplaySettings;
use crate::errors::RegistryError;
use crate::rollup::{self, RollupSummary};
use chainbuild_common::{BuildResult, ProjectGraph};
use tracing::{error, info};

/// The parent build's own work.
///
/// Implementations trigger child jobs (registering them on the build) and
/// return once the children have finished. The returned result is the
/// base that the rollup may only worsen.
pub trait OwnRun {
    fn run(&mut self, build: &ParentBuild) -> anyhow::Result<BuildResult>;
}

impl<F> OwnRun for F
where
    F: FnMut(&ParentBuild) -> anyhow::Result<BuildResult>,
{
    fn run(&mut self, build: &ParentBuild) -> anyhow::Result<BuildResult> {
        self(build)
    }
}

/// Outcome of a controlled parent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Result produced by the parent's own work
    pub base: BuildResult,
    /// Terminal result after rollup
    pub result: BuildResult,
    pub summary: RollupSummary,
    /// Set when the own run failed with an error; the base is then FAILURE
    pub own_run_error: Option<String>,
}

pub struct ParentRunController<'a, G: ProjectGraph> {
    graph: &'a G,
    display: DisplaySettings,
}

impl<'a, G: ProjectGraph> ParentRunController<'a, G> {
    pub fn new(graph: &'a G, display: DisplaySettings) -> Self {
        Self { graph, display }
    }

    /// Run the parent's own work, then compute the terminal result.
    ///
    /// An error from the own run counts as a FAILURE base. The rollup pass
    /// always happens, including for an aborted parent.
    pub fn run(
        &self,
        build: &ParentBuild,
        own_run: &mut impl OwnRun,
    ) -> Result<RunOutcome, RegistryError> {
        info!(job = build.job_name(), number = build.number(), "Starting parent build");

        let (base, own_run_error) = match own_run.run(build) {
            Ok(result) => (result, None),
            Err(e) => {
                error!(job = build.job_name(), error = %e, "Parent build's own run failed");
                (BuildResult::Failure, Some(format!("{:#}", e)))
            }
        };

        let mut outcome = self.finish(build, base)?;
        outcome.own_run_error = own_run_error;
        Ok(outcome)
    }

    /// Roll the current sub-builds up against `base`.
    pub fn finish(&self, build: &ParentBuild, base: BuildResult) -> Result<RunOutcome, RegistryError> {
        let sub_builds = build.refresh_sub_builds(self.graph, &self.display)?;
        let result = rollup::aggregate(base, &sub_builds);
        let summary = RollupSummary::from_sub_builds(&sub_builds);

        info!(
            job = build.job_name(),
            number = build.number(),
            base = %base,
            result = %result,
            sub_builds = summary.total,
            unresolved = summary.unresolved,
            "Parent build finished"
        );

        Ok(RunOutcome {
            base,
            result,
            summary,
            own_run_error: None,
        })
    }
}
