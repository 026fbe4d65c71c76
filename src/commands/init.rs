//! @acp:module "Init Command"
//! @acp:summary "Write a default advisor configuration"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;

use crate::config::Config;
use crate::scoring::ScoringMethod;

use super::method::update_scoring;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Config file to create
    pub config_path: PathBuf,
    /// Force overwrite existing config
    pub force: bool,
    /// Default catalog file
    pub catalog: Option<PathBuf>,
    pub method: Option<ScoringMethod>,
    pub margin: Option<i64>,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.config_path.exists() && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            options.config_path.display()
        );
    }

    let mut config = Config {
        catalog: options.catalog.clone(),
        ..Config::default()
    };
    update_scoring(&mut config, options.method, options.margin)?;

    config.save(&options.config_path)?;
    println!(
        "{} Created {}",
        style("✓").green(),
        options.config_path.display()
    );
    Ok(())
}
