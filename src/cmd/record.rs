//! Build record commands (`chainbuild init` and `chainbuild register`).

use anyhow::{Result, bail};
use chainbuild::build::ParentBuild;
use chainbuild::store::BuildRecordStore;

use super::super::Cli;

pub fn cmd_init(cli: &Cli, job: &str, number: u32, force: bool) -> Result<()> {
    let store = BuildRecordStore::new(cli.record.clone());
    if store.exists() && !force {
        bail!(
            "Build record already exists at {}. Use --force to overwrite it.",
            store.path().display()
        );
    }

    let build = ParentBuild::new(job, number);
    store.save(&build)?;

    println!("Started build record {}#{} at {}", job, number, store.path().display());
    Ok(())
}

pub fn cmd_register(cli: &Cli, job: &str, number: u32, phase: &str) -> Result<()> {
    let store = BuildRecordStore::new(cli.record.clone());
    if !store.exists() {
        bail!(
            "No build record at {}. Run 'chainbuild init' first.",
            store.path().display()
        );
    }

    let build = store.load()?;
    let sub_build = build.register_child(job, number, phase)?;
    store.save(&build)?;

    println!(
        "Registered {}#{} in phase '{}' of {}#{}",
        sub_build.job_name(),
        sub_build.build_number(),
        sub_build.phase_name(),
        build.job_name(),
        build.number()
    );
    Ok(())
}
