//! @acp:module "Method Command"
//! @acp:summary "Show or change the process-wide scoring method and margin"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Changing the method only affects later computations; nothing scored is
//! ever stored, so there is nothing to recompute.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::scoring::{ScoringConfig, ScoringMethod};

/// Options for the method command
#[derive(Debug, Clone)]
pub struct MethodOptions {
    /// Config file to update
    pub config_path: PathBuf,
    /// New scoring method
    pub set: Option<ScoringMethod>,
    /// New margin
    pub margin: Option<i64>,
    /// List the available methods
    pub list: bool,
}

/// Execute the method command
pub fn execute_method(options: MethodOptions, mut config: Config) -> Result<()> {
    if options.list {
        println!("Available scoring methods:\n");
        for method in ScoringMethod::ALL {
            let marker = if method == config.scoring.method { "*" } else { " " };
            println!(
                "  {} {} ({}) - {}",
                marker,
                style(method.as_str()).bold(),
                method.code(),
                method.description()
            );
        }
        return Ok(());
    }

    if options.set.is_none() && options.margin.is_none() {
        let scoring = config.scoring()?;
        println!("Current scoring method: {} (margin {})", scoring.method, scoring.margin);
        return Ok(());
    }

    let updated = update_scoring(&mut config, options.set, options.margin)?;
    config.save(&options.config_path)?;
    println!(
        "{} Scoring method set to {} (margin {}) in {}",
        style("✓").green(),
        updated.method,
        updated.margin,
        options.config_path.display()
    );
    Ok(())
}

/// Validate and apply a new method/margin to the config
pub fn update_scoring(
    config: &mut Config,
    method: Option<ScoringMethod>,
    margin: Option<i64>,
) -> Result<ScoringConfig> {
    let validated = config.scoring_with(method, margin)?;
    config.scoring.method = validated.method;
    config.scoring.margin = i64::from(validated.margin);
    tracing::info!("Scoring changed to {} (margin {})", validated.method, validated.margin);
    Ok(validated)
}
