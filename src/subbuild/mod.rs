//! Sub-build bookkeeping.
//!
//! - [`SubBuild`]: identity and live status of one child run
//! - [`ResultMatcher`]: resolves a record to its executed run
//! - [`SubBuildRegistry`]: the per-build record collection

mod matcher;
mod record;
mod registry;

pub use matcher::ResultMatcher;
pub use record::{LiveStatus, SubBuild, phase_names};
pub use registry::SubBuildRegistry;
