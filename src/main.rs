use anyhow::Result;
use chainbuild::BuildResult;
use chainbuild::config::ChainbuildToml;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "chainbuild")]
#[command(version, about = "Job-chaining build coordinator")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Parent build record file
    #[arg(long, global = true, default_value = "chainbuild-record.json")]
    pub record: PathBuf,

    /// Project graph and build history file
    #[arg(long, global = true, default_value = "graph.toml")]
    pub graph: PathBuf,

    /// Configuration file
    #[arg(long, global = true, default_value = "chainbuild.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new parent build record
    Init {
        /// Parent job name
        #[arg(long)]
        job: String,
        /// Parent build number
        #[arg(long)]
        number: u32,
        /// Overwrite an existing record
        #[arg(long)]
        force: bool,
    },
    /// Register a dispatched child build in a phase
    Register {
        /// Child job name
        #[arg(long)]
        job: String,
        /// Child build number
        #[arg(long)]
        number: u32,
        /// Phase the child belongs to
        #[arg(long)]
        phase: String,
    },
    /// Refresh and show sub-build status
    Status,
    /// Compute the parent's terminal result
    Rollup {
        /// Result of the parent's own work
        #[arg(long, default_value = "success")]
        base: BuildResult,
        /// Exit with status 1 unless the result is SUCCESS
        #[arg(long)]
        exit_code: bool,
    },
    /// View, validate or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default chainbuild.toml file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ChainbuildToml::load_or_default(&cli.config)?;
    let mut logging = config.logging.clone();
    logging.json |= cli.log_json;
    chainbuild::logging::init(&logging, cli.verbose);

    match &cli.command {
        Commands::Init { job, number, force } => cmd::cmd_init(&cli, job, *number, *force)?,
        Commands::Register { job, number, phase } => cmd::cmd_register(&cli, job, *number, phase)?,
        Commands::Status => cmd::cmd_status(&cli, &config)?,
        Commands::Rollup { base, exit_code } => {
            let result = cmd::cmd_rollup(&cli, &config, *base)?;
            if *exit_code && result != BuildResult::Success {
                std::process::exit(1);
            }
        }
        Commands::Config { command } => cmd::cmd_config(&cli.config, command.clone())?,
    }

    Ok(())
}
