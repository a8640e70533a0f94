//! Status and rollup commands.

use anyhow::{Context, Result};
use chainbuild::BuildResult;
use chainbuild::config::ChainbuildToml;
use chainbuild::controller::ParentRunController;
use chainbuild::graph::InMemoryGraph;
use chainbuild::store::BuildRecordStore;
use chainbuild::ui::{icons, render_sub_builds};

use super::super::Cli;

pub fn cmd_status(cli: &Cli, config: &ChainbuildToml) -> Result<()> {
    let store = BuildRecordStore::new(cli.record.clone());
    let build = store.load()?;
    let graph = InMemoryGraph::load(&cli.graph)?;

    let sub_builds = build
        .refresh_sub_builds(&graph, &config.effective_display())
        .context("Failed to refresh sub-builds")?;
    store.save(&build)?;

    println!();
    println!("{}#{}", build.job_name(), build.number());
    println!();
    print!("{}", render_sub_builds(&sub_builds));
    Ok(())
}

pub fn cmd_rollup(cli: &Cli, config: &ChainbuildToml, base: BuildResult) -> Result<BuildResult> {
    let store = BuildRecordStore::new(cli.record.clone());
    let build = store.load()?;
    let graph = InMemoryGraph::load(&cli.graph)?;

    let controller = ParentRunController::new(&graph, config.effective_display());
    let outcome = controller
        .finish(&build, base)
        .context("Failed to roll up sub-build results")?;
    store.save(&build)?;

    let summary = &outcome.summary;
    println!();
    println!(
        "{} sub-builds: {} success, {} unstable, {} failure, {} aborted, {} not built",
        summary.total,
        summary.count(BuildResult::Success),
        summary.count(BuildResult::Unstable),
        summary.count(BuildResult::Failure),
        summary.count(BuildResult::Aborted),
        summary.unresolved
    );
    println!(
        "{}Result: {} (base {})",
        icons::for_result(Some(outcome.result)),
        outcome.result,
        outcome.base
    );
    println!();
    Ok(outcome.result)
}
