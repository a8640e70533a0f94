//! Configuration view and validation commands (`chainbuild config`).

use anyhow::Result;
use chainbuild::config::{ChainbuildToml, TIME_FORMAT_ENV};
use std::path::Path;

use super::super::ConfigCommands;

pub fn cmd_config(config_path: &Path, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Chainbuild Configuration");
            println!("========================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                ChainbuildToml::load(config_path)?
            } else {
                println!("No chainbuild.toml found at {}", config_path.display());
                println!("Using default configuration.");
                ChainbuildToml::default()
            };
            println!();

            println!("[display]");
            println!("  start_time_format = \"{}\"", toml.display.start_time_format);
            println!("  not_built_label = \"{}\"", toml.display.not_built_label);
            println!();
            println!("[logging]");
            println!("  level = \"{}\"", toml.logging.level);
            println!("  json = {}", toml.logging.json);
            println!();

            let effective = toml.effective_display();
            if effective != toml.display {
                println!("Effective values (with {} override):", TIME_FORMAT_ENV);
                println!("  start_time_format = \"{}\"", effective.start_time_format);
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            if !config_path.exists() {
                println!("No chainbuild.toml found. Using defaults (valid).");
                return Ok(());
            }

            let warnings = ChainbuildToml::load(config_path)?.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("chainbuild.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            ChainbuildToml::default().save(config_path)?;
            println!("Created chainbuild.toml at {}", config_path.display());
        }
    }

    Ok(())
}
