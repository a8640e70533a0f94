//! Status icon tokens.
//!
//! A run is shown with a coloured ball whose image name doubles as a
//! stable token for UI layers. Running builds use the animated variant.

use crate::BuildResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    Blue,
    Yellow,
    Red,
    Aborted,
    NotBuilt,
    Grey,
}

impl StatusIcon {
    /// Icon for a finished (or not yet finished) run.
    pub fn for_result(result: Option<BuildResult>) -> Self {
        match result {
            Some(BuildResult::Success) => StatusIcon::Blue,
            Some(BuildResult::Unstable) => StatusIcon::Yellow,
            Some(BuildResult::Failure) => StatusIcon::Red,
            Some(BuildResult::Aborted) => StatusIcon::Aborted,
            None => StatusIcon::Grey,
        }
    }

    fn base_name(self) -> &'static str {
        match self {
            StatusIcon::Blue => "blue",
            StatusIcon::Yellow => "yellow",
            StatusIcon::Red => "red",
            StatusIcon::Aborted => "aborted",
            StatusIcon::NotBuilt => "nobuilt",
            StatusIcon::Grey => "grey",
        }
    }

    /// Image token, e.g. `red.png` or `blue_anime.gif` while building.
    pub fn image(self, building: bool) -> String {
        if building {
            format!("{}_anime.gif", self.base_name())
        } else {
            format!("{}.png", self.base_name())
        }
    }
}
