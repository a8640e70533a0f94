//! Shared domain types for chainbuild.
//!
//! These types sit at the seam between the coordinator core and the
//! collaborators it consumes: the severity-ordered [`BuildResult`], the
//! [`StatusIcon`] token shown next to every run, and the [`ProjectGraph`]
//! query surface used to resolve a recorded sub-build to a concrete
//! [`Execution`].

mod execution;
mod icon;
mod result;

pub use execution::{Execution, GraphError, ProjectGraph};
pub use icon::StatusIcon;
pub use result::{BuildResult, ParseResultError};
