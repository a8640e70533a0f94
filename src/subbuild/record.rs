//! Sub-build records.
//!
//! A [`SubBuild`] pairs an immutable identity (which child run of which
//! parent, in which phase) with a [`LiveStatus`] that is recomputed every
//! time the registry is refreshed.

use chainbuild_common::{BuildResult, StatusIcon};
use serde::{Deserialize, Serialize};

/// Display state copied from a resolved run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStatus {
    /// Result of the resolved run; `None` until it finishes or when unresolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<BuildResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Start time formatted for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LiveStatus {
    /// Placeholder state for a sub-build with no matching run.
    pub fn not_built(label: &str) -> Self {
        Self {
            result: None,
            icon: Some(StatusIcon::NotBuilt.image(false)),
            duration: Some(label.to_string()),
            start_time: None,
            url: None,
        }
    }
}

/// One child run triggered by a parent build within a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubBuild {
    parent_job_name: String,
    parent_build_number: u32,
    job_name: String,
    build_number: u32,
    phase_name: String,
    #[serde(default)]
    status: LiveStatus,
}

impl SubBuild {
    pub fn new(
        parent_job_name: &str,
        parent_build_number: u32,
        job_name: &str,
        build_number: u32,
        phase_name: &str,
    ) -> Self {
        Self {
            parent_job_name: parent_job_name.to_string(),
            parent_build_number,
            job_name: job_name.to_string(),
            build_number,
            phase_name: phase_name.to_string(),
            status: LiveStatus::default(),
        }
    }

    pub fn parent_job_name(&self) -> &str {
        &self.parent_job_name
    }

    pub fn parent_build_number(&self) -> u32 {
        self.parent_build_number
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn build_number(&self) -> u32 {
        self.build_number
    }

    pub fn phase_name(&self) -> &str {
        &self.phase_name
    }

    /// Check if this record occupies the `(job_name, phase_name)` slot.
    ///
    /// Build numbers are ignored: a phase holds at most one record per job.
    pub fn occupies(&self, job_name: &str, phase_name: &str) -> bool {
        self.job_name == job_name && self.phase_name == phase_name
    }

    pub fn status(&self) -> &LiveStatus {
        &self.status
    }

    /// Replace the whole live status at once.
    pub fn set_status(&mut self, status: LiveStatus) {
        self.status = status;
    }

    pub fn result(&self) -> Option<BuildResult> {
        self.status.result
    }

    pub fn set_result(&mut self, result: Option<BuildResult>) {
        self.status.result = result;
    }

    pub fn icon(&self) -> Option<&str> {
        self.status.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.status.icon = icon;
    }

    pub fn duration(&self) -> Option<&str> {
        self.status.duration.as_deref()
    }

    pub fn set_duration(&mut self, duration: Option<String>) {
        self.status.duration = duration;
    }

    pub fn start_time(&self) -> Option<&str> {
        self.status.start_time.as_deref()
    }

    pub fn set_start_time(&mut self, start_time: Option<String>) {
        self.status.start_time = start_time;
    }

    pub fn url(&self) -> Option<&str> {
        self.status.url.as_deref()
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.status.url = url;
    }
}

impl std::fmt::Display for SubBuild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SubBuild [parent={}#{}, job={}#{}, phase={}]",
            self.parent_job_name,
            self.parent_build_number,
            self.job_name,
            self.build_number,
            self.phase_name
        )
    }
}

/// Distinct phase names of `sub_builds` in first-seen order.
pub fn phase_names(sub_builds: &[SubBuild]) -> Vec<&str> {
    let mut phases: Vec<&str> = Vec::new();
    for sub_build in sub_builds {
        if !phases.contains(&sub_build.phase_name()) {
            phases.push(sub_build.phase_name());
        }
    }
    phases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_empty_status() {
        let sub = SubBuild::new("pipeline", 12, "build-x", 5, "compile");
        assert_eq!(sub.parent_job_name(), "pipeline");
        assert_eq!(sub.parent_build_number(), 12);
        assert_eq!(sub.job_name(), "build-x");
        assert_eq!(sub.build_number(), 5);
        assert_eq!(sub.phase_name(), "compile");
        assert_eq!(sub.status(), &LiveStatus::default());
    }

    #[test]
    fn test_occupies_ignores_build_number() {
        let sub = SubBuild::new("pipeline", 12, "build-x", 5, "compile");
        assert!(sub.occupies("build-x", "compile"));
        assert!(!sub.occupies("build-x", "test"));
        assert!(!sub.occupies("build-y", "compile"));
        assert!(!sub.occupies("Build-X", "compile"));
    }

    #[test]
    fn test_phase_names_in_first_seen_order() {
        let subs = vec![
            SubBuild::new("pipeline", 1, "lint", 1, "check"),
            SubBuild::new("pipeline", 1, "build-x", 5, "compile"),
            SubBuild::new("pipeline", 1, "docs", 2, "check"),
        ];
        assert_eq!(phase_names(&subs), vec!["check", "compile"]);
        assert!(phase_names(&[]).is_empty());
    }

    #[test]
    fn test_setters_update_live_fields() {
        let mut sub = SubBuild::new("pipeline", 1, "lint", 3, "check");
        sub.set_result(Some(BuildResult::Unstable));
        sub.set_icon(Some("yellow.png".to_string()));
        sub.set_duration(Some("12 sec".to_string()));
        sub.set_start_time(Some("2024-03-01 12:30:05".to_string()));
        sub.set_url(Some("job/lint/3/".to_string()));

        assert_eq!(sub.result(), Some(BuildResult::Unstable));
        assert_eq!(sub.icon(), Some("yellow.png"));
        assert_eq!(sub.duration(), Some("12 sec"));
        assert_eq!(sub.start_time(), Some("2024-03-01 12:30:05"));
        assert_eq!(sub.url(), Some("job/lint/3/"));
    }

    #[test]
    fn test_not_built_placeholder() {
        let status = LiveStatus::not_built("not built yet");
        assert_eq!(status.icon.as_deref(), Some("nobuilt.png"));
        assert_eq!(status.duration.as_deref(), Some("not built yet"));
        assert!(status.result.is_none());
        assert!(status.url.is_none());
    }

    #[test]
    fn test_display_summarises_identity() {
        let sub = SubBuild::new("pipeline", 12, "build-x", 5, "compile");
        let text = sub.to_string();
        assert!(text.contains("pipeline#12"));
        assert!(text.contains("build-x#5"));
        assert!(text.contains("phase=compile"));
    }

    #[test]
    fn test_serde_preserves_record() {
        let mut sub = SubBuild::new("pipeline", 12, "build-x", 5, "compile");
        sub.set_result(Some(BuildResult::Failure));
        let json = serde_json::to_string(&sub).unwrap();
        let back: SubBuild = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sub);
    }
}
