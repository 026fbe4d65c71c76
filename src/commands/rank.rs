//! @acp:module "Rank Command"
//! @acp:summary "Prioritize the catalog for a work session"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;

use super::{open_catalog, open_session};
use crate::config::Config;
use crate::report::{render_ranking, OutputFormat, RankingView};
use crate::scoring::{rank_session, ScoringMethod, Tier};

/// Options for the rank command
#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    /// Catalog file (falls back to the config)
    pub catalog: Option<PathBuf>,
    /// Session file
    pub session: PathBuf,
    /// Override the configured scoring method for this run
    pub method: Option<ScoringMethod>,
    /// Override the configured margin for this run
    pub margin: Option<i64>,
    /// Output format (falls back to the config)
    pub format: Option<OutputFormat>,
    /// Only show one tier
    pub tier: Option<Tier>,
}

/// Execute the rank command
pub fn execute_rank(options: RankOptions, config: &Config) -> Result<()> {
    let output = generate_ranking(&options, config)?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Load everything, prioritize and render
pub fn generate_ranking(options: &RankOptions, config: &Config) -> Result<String> {
    let scoring = config.scoring_with(options.method, options.margin)?;
    let catalog = open_catalog(options.catalog.as_deref(), config)?;
    let session = open_session(&options.session)?;

    let instruments = catalog.instruments_by_name();
    let scored = rank_session(&instruments, &catalog, &session, &scoring);

    let mut view = RankingView::new(session.name.clone(), scoring, scored);
    view.show_instruments = session.show_instruments;
    if let Some(tier) = options.tier {
        view = view.only_tier(tier);
    }

    let format = options.format.unwrap_or(config.output.format);
    Ok(render_ranking(&view, &catalog, format)?)
}
