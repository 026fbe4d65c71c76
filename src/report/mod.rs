//! @acp:module "Report"
//! @acp:summary "Presentation of prioritized instruments: ranking views and exported reports"
//! @acp:domain report
//! @acp:layer output

pub mod export;
pub mod renderer;
mod templates;

pub use export::{
    advice_entries, detail_entries, render_catalog_export, render_session_report,
};
pub use renderer::{render_ranking, RankingView};

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Output format for rendered rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(AdvisorError::Config(format!("Unknown output format: {}", s))),
        }
    }
}
