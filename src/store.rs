//! Build record persistence.
//!
//! The CLI keeps the parent build record in a JSON file so registrations
//! and refreshed status survive between invocations.

use crate::build::{BuildRecord, ParentBuild};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct BuildRecordStore {
    path: PathBuf,
}

impl BuildRecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<ParentBuild> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read build record: {}", self.path.display()))?;
        let record: BuildRecord = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse build record: {}", self.path.display()))?;
        Ok(ParentBuild::from_record(record))
    }

    pub fn save(&self, build: &ParentBuild) -> Result<()> {
        let record = build.to_record()?;
        let content =
            serde_json::to_string_pretty(&record).context("Failed to serialize build record")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write build record: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_record_fails_to_load() {
        let dir = tempdir().unwrap();
        let store = BuildRecordStore::new(dir.path().join("record.json"));
        assert!(!store.exists());
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Failed to read build record"));
    }

    #[test]
    fn test_recovery_after_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("record.json");

        {
            let build = ParentBuild::new("pipeline", 12);
            build.register_child("build-x", 5, "p1").unwrap();
            build.register_child("build-x", 7, "p1").unwrap();
            build.register_child("lint", 1, "p2").unwrap();
            BuildRecordStore::new(path.clone()).save(&build).unwrap();
        }

        {
            let build = BuildRecordStore::new(path.clone()).load().unwrap();
            assert_eq!(build.job_name(), "pipeline");
            assert_eq!(build.number(), 12);
            let subs = build.sub_builds().unwrap();
            assert_eq!(subs.len(), 2);
            // Replacing build-x#5 appends build-x#7 before lint is registered.
            assert_eq!(subs[0].job_name(), "build-x");
            assert_eq!(subs[0].build_number(), 7);
            assert_eq!(subs[1].job_name(), "lint");
        }
    }

    #[test]
    fn test_corrupt_record_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = BuildRecordStore::new(path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse build record"));
    }
}
