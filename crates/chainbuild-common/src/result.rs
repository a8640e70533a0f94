use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal outcome of a build, declared in ascending severity.
///
/// The derived ordering is the severity ordering:
/// `Success < Unstable < Failure < Aborted`. An aborted run is treated as
/// worse than a failed one when results propagate to a parent build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    Aborted,
}

impl BuildResult {
    /// All results, least severe first.
    pub const ALL: [BuildResult; 4] = [
        BuildResult::Success,
        BuildResult::Unstable,
        BuildResult::Failure,
        BuildResult::Aborted,
    ];

    /// Check if this result is strictly more severe than `other`.
    pub fn is_worse_than(self, other: BuildResult) -> bool {
        self > other
    }

    /// Check if this result is as good as or better than `other`.
    pub fn is_better_or_equal(self, other: BuildResult) -> bool {
        self <= other
    }

    /// Return the more severe of the two results.
    pub fn worst(self, other: BuildResult) -> BuildResult {
        self.max(other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Failure => "FAILURE",
            BuildResult::Aborted => "ABORTED",
        }
    }
}

impl std::fmt::Display for BuildResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`BuildResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid build result '{0}'. Valid values: success, unstable, failure, aborted")]
pub struct ParseResultError(pub String);

impl std::str::FromStr for BuildResult {
    type Err = ParseResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(BuildResult::Success),
            "unstable" => Ok(BuildResult::Unstable),
            "failure" => Ok(BuildResult::Failure),
            "aborted" => Ok(BuildResult::Aborted),
            _ => Err(ParseResultError(s.to_string())),
        }
    }
}
