//! Result rollup from sub-builds to the parent build.
//!
//! The parent's terminal result is the most severe of its own result and
//! every resolved child result. Unresolved children contribute nothing.

use crate::subbuild::SubBuild;
use chainbuild_common::BuildResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The most severe resolved child result, if any child has one.
pub fn worst_child(sub_builds: &[SubBuild]) -> Option<BuildResult> {
    sub_builds.iter().filter_map(SubBuild::result).max()
}

/// Check if any resolved child result is strictly worse than `threshold`.
pub fn any_worse_than(sub_builds: &[SubBuild], threshold: BuildResult) -> bool {
    sub_builds
        .iter()
        .filter_map(SubBuild::result)
        .any(|r| r.is_worse_than(threshold))
}

/// Combine the parent's own result with its children's.
///
/// Never better than `base`, never better than the worst resolved child.
pub fn aggregate(base: BuildResult, sub_builds: &[SubBuild]) -> BuildResult {
    match worst_child(sub_builds) {
        Some(worst) => base.worst(worst),
        None => base,
    }
}

/// Per-result counts over a set of sub-builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupSummary {
    pub total: usize,
    /// Records with no resolved result (not built yet or still running)
    pub unresolved: usize,
    pub counts: BTreeMap<BuildResult, usize>,
}

impl RollupSummary {
    pub fn from_sub_builds(sub_builds: &[SubBuild]) -> Self {
        let mut summary = Self {
            total: sub_builds.len(),
            ..Default::default()
        };
        for sub_build in sub_builds {
            match sub_build.result() {
                Some(result) => *summary.counts.entry(result).or_insert(0) += 1,
                None => summary.unresolved += 1,
            }
        }
        summary
    }

    pub fn count(&self, result: BuildResult) -> usize {
        self.counts.get(&result).copied().unwrap_or(0)
    }

    /// The most severe counted result.
    pub fn worst(&self) -> Option<BuildResult> {
        self.counts.keys().next_back().copied()
    }
}
