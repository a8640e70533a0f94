//! The parent build instance.
//!
//! A [`ParentBuild`] owns the sub-build registry for one execution of the
//! orchestrating job. The registry sits behind a mutex so status polling
//! and registration can come from different threads during the run.

use crate::config::DisplaySettings;
use crate::errors::RegistryError;
use crate::subbuild::{ResultMatcher, SubBuild, SubBuildRegistry};
use chainbuild_common::ProjectGraph;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// One change recorded by a child build's source control checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub revision: String,
    pub author: String,
    pub message: String,
}

/// Changes contributed by one child build. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogSet {
    pub job_name: String,
    pub build_number: u32,
    #[serde(default)]
    pub entries: Vec<ChangeEntry>,
}

/// Persisted form of a [`ParentBuild`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub job_name: String,
    pub number: u32,
    #[serde(default)]
    pub sub_builds: SubBuildRegistry,
    #[serde(default)]
    pub change_log_sets: Vec<ChangeLogSet>,
}

#[derive(Debug)]
pub struct ParentBuild {
    job_name: String,
    number: u32,
    sub_builds: Mutex<SubBuildRegistry>,
    change_log_sets: Mutex<Vec<ChangeLogSet>>,
}

impl ParentBuild {
    pub fn new(job_name: &str, number: u32) -> Self {
        Self {
            job_name: job_name.to_string(),
            number,
            sub_builds: Mutex::new(SubBuildRegistry::new()),
            change_log_sets: Mutex::new(Vec::new()),
        }
    }

    pub fn from_record(record: BuildRecord) -> Self {
        Self {
            job_name: record.job_name,
            number: record.number,
            sub_builds: Mutex::new(record.sub_builds),
            change_log_sets: Mutex::new(record.change_log_sets),
        }
    }

    pub fn to_record(&self) -> Result<BuildRecord, RegistryError> {
        Ok(BuildRecord {
            job_name: self.job_name.clone(),
            number: self.number,
            sub_builds: self.registry()?.clone(),
            change_log_sets: self.change_log_sets()?,
        })
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Record a child run dispatched in `phase_name`.
    pub fn register(
        &self,
        parent_job_name: &str,
        parent_build_number: u32,
        job_name: &str,
        build_number: u32,
        phase_name: &str,
    ) -> Result<SubBuild, RegistryError> {
        let mut registry = self.registry()?;
        Ok(registry
            .register(
                parent_job_name,
                parent_build_number,
                job_name,
                build_number,
                phase_name,
            )
            .clone())
    }

    /// Record a child run of this build.
    pub fn register_child(
        &self,
        job_name: &str,
        build_number: u32,
        phase_name: &str,
    ) -> Result<SubBuild, RegistryError> {
        self.register(&self.job_name, self.number, job_name, build_number, phase_name)
    }

    /// Snapshot of the records as last refreshed.
    pub fn sub_builds(&self) -> Result<Vec<SubBuild>, RegistryError> {
        Ok(self.registry()?.sub_builds().to_vec())
    }

    /// Refresh every record against `graph` and return a snapshot.
    pub fn refresh_sub_builds<G: ProjectGraph>(
        &self,
        graph: &G,
        display: &DisplaySettings,
    ) -> Result<Vec<SubBuild>, RegistryError> {
        let matcher = ResultMatcher::new(graph, &self.job_name);
        let mut registry = self.registry()?;
        Ok(registry.refresh(&matcher, display)?.to_vec())
    }

    pub fn add_change_log_set(&self, change_log_set: ChangeLogSet) -> Result<(), RegistryError> {
        self.change_log_sets
            .lock()
            .map_err(|_| RegistryError::LockPoisoned)?
            .push(change_log_set);
        Ok(())
    }

    pub fn change_log_sets(&self) -> Result<Vec<ChangeLogSet>, RegistryError> {
        Ok(self
            .change_log_sets
            .lock()
            .map_err(|_| RegistryError::LockPoisoned)?
            .clone())
    }

    fn registry(&self) -> Result<MutexGuard<'_, SubBuildRegistry>, RegistryError> {
        self.sub_builds.lock().map_err(|_| RegistryError::LockPoisoned)
    }
}
