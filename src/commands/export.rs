//! @acp:module "Export Command"
//! @acp:summary "Write the session report or the instrument catalog as markdown"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use console::style;

use super::{open_catalog, open_session};
use crate::catalog::InstrumentId;
use crate::config::Config;
use crate::report::{render_catalog_export, render_session_report};
use crate::scoring::{rank_session, ScoringMethod};

/// What to export
#[derive(Debug, Clone)]
pub enum ExportTarget {
    /// Report of one work session
    Session(PathBuf),
    /// Every instrument in the catalog
    Catalog,
    /// A single instrument
    Instrument(InstrumentId),
}

/// Options for the export command
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub catalog: Option<PathBuf>,
    pub target: ExportTarget,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    pub method: Option<ScoringMethod>,
    pub margin: Option<i64>,
}

/// Execute the export command
pub fn execute_export(options: ExportOptions, config: &Config) -> Result<()> {
    let content = generate_export(&options, config)?;

    match &options.output {
        Some(path) => {
            std::fs::write(path, &content)?;
            println!("{} Wrote {}", style("✓").green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Render the requested export
pub fn generate_export(options: &ExportOptions, config: &Config) -> Result<String> {
    let catalog = open_catalog(options.catalog.as_deref(), config)?;
    let today = Local::now().date_naive();
    let instruments = catalog.instruments_by_name();

    let content = match &options.target {
        ExportTarget::Session(path) => {
            let scoring = config.scoring_with(options.method, options.margin)?;
            let session = open_session(path)?;
            let scored = rank_session(&instruments, &catalog, &session, &scoring);
            render_session_report(&session, &catalog, &scored, today)?
        }
        ExportTarget::Catalog => render_catalog_export(&instruments, &catalog, today)?,
        ExportTarget::Instrument(id) => {
            let instrument = catalog
                .instrument(*id)
                .ok_or_else(|| anyhow!("Unknown instrument: {}", id))?;
            render_catalog_export(std::slice::from_ref(instrument), &catalog, today)?
        }
    };
    Ok(content)
}
