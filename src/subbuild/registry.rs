//! The per-build collection of sub-build records.

use crate::config::{DEFAULT_START_TIME_FORMAT, DisplaySettings};
use crate::errors::RegistryError;
use crate::subbuild::matcher::ResultMatcher;
use crate::subbuild::record::{LiveStatus, SubBuild, phase_names};
use chainbuild_common::{Execution, ProjectGraph};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::{info, warn};

/// Ordered sub-build records of one parent build.
///
/// Holds at most one record per `(job name, phase name)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubBuildRegistry {
    sub_builds: Vec<SubBuild>,
}

impl SubBuildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dispatched child run.
    ///
    /// An existing record for the same job in the same phase is dropped
    /// and the new record is appended.
    pub fn register(
        &mut self,
        parent_job_name: &str,
        parent_build_number: u32,
        job_name: &str,
        build_number: u32,
        phase_name: &str,
    ) -> &SubBuild {
        if let Some(pos) = self
            .sub_builds
            .iter()
            .position(|s| s.occupies(job_name, phase_name))
        {
            let replaced = self.sub_builds.remove(pos);
            info!(
                job = job_name,
                phase = phase_name,
                old = replaced.build_number(),
                new = build_number,
                "Replacing sub-build in phase"
            );
        } else {
            info!(
                job = job_name,
                phase = phase_name,
                number = build_number,
                "Registered sub-build"
            );
        }

        self.sub_builds.push(SubBuild::new(
            parent_job_name,
            parent_build_number,
            job_name,
            build_number,
            phase_name,
        ));
        &self.sub_builds[self.sub_builds.len() - 1]
    }

    /// Re-resolve every record and return the refreshed sequence.
    ///
    /// Live status is recomputed for all records before any is written, so
    /// a graph error leaves every record as it was before the call.
    pub fn refresh<G: ProjectGraph>(
        &mut self,
        matcher: &ResultMatcher<'_, G>,
        display: &DisplaySettings,
    ) -> Result<&[SubBuild], RegistryError> {
        let mut refreshed = Vec::with_capacity(self.sub_builds.len());
        for sub_build in &self.sub_builds {
            let run = matcher.resolve(sub_build).inspect_err(|e| {
                warn!(%sub_build, error = %e, "Sub-build refresh aborted");
            })?;
            let status = match run {
                Some(run) => live_status(&run, display),
                None => LiveStatus::not_built(&display.not_built_label),
            };
            refreshed.push(status);
        }

        for (sub_build, status) in self.sub_builds.iter_mut().zip(refreshed) {
            sub_build.set_status(status);
        }
        Ok(&self.sub_builds)
    }

    /// Records as last refreshed, without touching the graph.
    pub fn sub_builds(&self) -> &[SubBuild] {
        &self.sub_builds
    }

    /// Records registered in `phase_name`.
    pub fn in_phase<'a>(&'a self, phase_name: &'a str) -> impl Iterator<Item = &'a SubBuild> {
        self.sub_builds
            .iter()
            .filter(move |s| s.phase_name() == phase_name)
    }

    /// Distinct phase names in first-seen order.
    pub fn phases(&self) -> Vec<&str> {
        phase_names(&self.sub_builds)
    }

    pub fn len(&self) -> usize {
        self.sub_builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_builds.is_empty()
    }
}

fn live_status<E: Execution>(run: &E, display: &DisplaySettings) -> LiveStatus {
    LiveStatus {
        result: run.result(),
        icon: Some(run.icon()),
        duration: Some(run.duration_string()),
        start_time: Some(format_start_time(run, &display.start_time_format)),
        url: Some(run.url()),
    }
}

/// Format a run's start time, falling back to the default pattern when
/// `format` cannot be rendered.
fn format_start_time<E: Execution>(run: &E, format: &str) -> String {
    let timestamp = run.timestamp();
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(format)).is_ok() {
        return out;
    }
    warn!(format, "Invalid start time format, using default");
    timestamp.format(DEFAULT_START_TIME_FORMAT).to_string()
}
