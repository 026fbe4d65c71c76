//! @acp:module "Ranking Renderer"
//! @acp:summary "Render a prioritized instrument list as text, markdown or JSON"
//! @acp:domain report
//! @acp:layer output

use console::{style, StyledObject};
use serde::Serialize;

use super::OutputFormat;
use crate::catalog::{Catalog, TagId};
use crate::error::Result;
use crate::scoring::{PrioritySummary, ScoredInstrument, ScoringConfig, Tier};

/// Everything a ranking view shows
#[derive(Debug, Clone, Serialize)]
pub struct RankingView<'a> {
    pub session: String,
    pub scoring: ScoringConfig,
    pub summary: PrioritySummary,
    pub instruments: Vec<ScoredInstrument<'a>>,
    /// Mirrors the session flag; the text view hides the list when false
    #[serde(skip)]
    pub show_instruments: bool,
}

impl<'a> RankingView<'a> {
    pub fn new(
        session: impl Into<String>,
        scoring: ScoringConfig,
        instruments: Vec<ScoredInstrument<'a>>,
    ) -> Self {
        let summary = PrioritySummary::from_scored(&instruments);
        Self {
            session: session.into(),
            scoring,
            summary,
            instruments,
            show_instruments: true,
        }
    }

    /// Keep only one tier; the summary still describes the full list
    pub fn only_tier(mut self, tier: Tier) -> Self {
        self.instruments.retain(|s| s.tier == tier);
        self
    }
}

/// Render a ranking view
pub fn render_ranking(view: &RankingView<'_>, catalog: &Catalog, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Markdown => Ok(render_markdown(view, catalog)),
        OutputFormat::Text => Ok(render_text(view, catalog)),
    }
}

fn render_text(view: &RankingView<'_>, catalog: &Catalog) -> String {
    let mut output = format!(
        "Ranking for '{}' ({}, margin {})\n",
        view.session, view.scoring.method, view.scoring.margin
    );

    if !view.show_instruments {
        output.push_str("  Instruments are hidden for this session.\n");
        return output;
    }

    if view.instruments.is_empty() {
        output.push_str("  No instruments.\n");
        return output;
    }

    let width = view
        .instruments
        .iter()
        .map(|s| s.instrument.name.chars().count())
        .max()
        .unwrap_or(0);

    for entry in &view.instruments {
        let tags = tag_line(catalog, &entry.matching_inclusion_tags, &entry.matching_exclusion_tags);
        output.push_str(&format!(
            "  {} {:>4}  {:width$}  {}\n",
            tier_label(entry.tier),
            entry.score,
            entry.instrument.name,
            tags,
            width = width
        ));
    }

    output.push_str(&format!(
        "\n{} high, {} mid, {} low (max score {})\n",
        view.summary.high, view.summary.mid, view.summary.low, view.summary.max_score
    ));
    output
}

fn render_markdown(view: &RankingView<'_>, catalog: &Catalog) -> String {
    let mut output = format!("# Ranking: {}\n\n", view.session.trim());
    output.push_str(&format!(
        "Method `{}`, margin {}.\n\n",
        view.scoring.method, view.scoring.margin
    ));
    output.push_str("| # | Instrument | Score | Tier | Tags |\n");
    output.push_str("|---|---|---|---|---|\n");
    for (rank, entry) in view.instruments.iter().enumerate() {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            rank + 1,
            table_cell(&entry.instrument.name),
            entry.score,
            entry.tier,
            table_cell(&tag_line(
                catalog,
                &entry.matching_inclusion_tags,
                &entry.matching_exclusion_tags
            ))
        ));
    }
    output
}

fn tier_label(tier: Tier) -> StyledObject<&'static str> {
    match tier {
        Tier::High => style("HIGH").green().bold(),
        Tier::Mid => style("MID ").yellow(),
        Tier::Low => style("LOW ").dim(),
    }
}

/// Make text safe for one markdown table cell: pipes escaped, line breaks folded
pub(crate) fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

/// `+name` for matching inclusion tags, `-name` for matching exclusion tags
pub(crate) fn tag_line(catalog: &Catalog, plus: &[TagId], minus: &[TagId]) -> String {
    plus.iter()
        .map(|id| format!("+{}", catalog.tag_name(*id)))
        .chain(minus.iter().map(|id| format!("-{}", catalog.tag_name(*id))))
        .collect::<Vec<_>>()
        .join(" ")
}
