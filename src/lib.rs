//! Chainbuild - job-chaining build coordinator core.
//!
//! A parent build fans out to child builds grouped into phases. This crate
//! keeps the per-build record of those sub-builds, resolves each record to
//! the run it refers to, and rolls the children's results up into the
//! parent's terminal result.
//!
//! - [`subbuild`] - sub-build records, matcher and registry
//! - [`rollup`] - worst-of result aggregation
//! - [`build`] - the parent build instance
//! - [`controller`] - parent run controller
//! - [`graph`] - in-memory project graph and build history
//! - [`store`] - build record persistence
//! - [`config`] - `chainbuild.toml` configuration

pub mod build;
pub mod config;
pub mod controller;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod rollup;
pub mod store;
pub mod subbuild;
pub mod ui;
pub mod util;

pub use chainbuild_common::{BuildResult, Execution, GraphError, ProjectGraph, StatusIcon};
