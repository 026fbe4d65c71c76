//! @acp:module "Prioritizer"
//! @acp:summary "Score, tier and rank instruments against an in-scope tag set"
//! @acp:domain scoring
//! @acp:layer logic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::method::ScoringMethod;
use crate::catalog::{Instrument, TagId, TagSet};
use crate::error::{AdvisorError, Result};

/// Default distance from the top score still classified as HIGH
pub const DEFAULT_MARGIN: u32 = 1;

/// Validated scoring configuration, fixed for one computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringConfig {
    pub method: ScoringMethod,
    pub margin: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            method: ScoringMethod::default(),
            margin: DEFAULT_MARGIN,
        }
    }
}

impl ScoringConfig {
    /// Build from raw configuration values; a negative margin is rejected
    pub fn new(method: ScoringMethod, margin: i64) -> Result<Self> {
        let margin = u32::try_from(margin).map_err(|_| {
            AdvisorError::Config(format!(
                "Margin must be a non-negative integer that fits in 32 bits, got {}",
                margin
            ))
        })?;
        Ok(Self { method, margin })
    }
}

/// Coarse relevance classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    /// Classify one score. Rules are evaluated in order; the first match wins.
    pub fn classify(score: i64, max_score: i64, margin: u32) -> Tier {
        if score == 0 {
            Tier::Low
        } else if score == max_score {
            Tier::High
        } else if score >= max_score - i64::from(margin) {
            Tier::High
        } else if score > 0 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Mid => "mid",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AdvisorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "hi" => Ok(Tier::High),
            "mid" | "medium" => Ok(Tier::Mid),
            "low" | "lo" => Ok(Tier::Low),
            _ => Err(AdvisorError::Config(format!("Unknown tier: {}", s))),
        }
    }
}

/// One instrument's result for a single prioritization call.
///
/// Field order is the contract the report layer reads: instrument, inclusion
/// hits and tags, exclusion hits and tags, score, tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredInstrument<'a> {
    pub instrument: &'a Instrument,
    pub inclusion_hits: usize,
    pub matching_inclusion_tags: Vec<TagId>,
    pub exclusion_hits: usize,
    pub matching_exclusion_tags: Vec<TagId>,
    pub score: i64,
    pub tier: Tier,
}

/// Score every instrument, assign tiers and sort by score descending.
///
/// The sort is stable, so equal scores keep their input order.
pub fn prioritize<'a>(
    instruments: &'a [Instrument],
    in_scope: &TagSet,
    config: &ScoringConfig,
) -> Vec<ScoredInstrument<'a>> {
    let mut scored: Vec<ScoredInstrument<'a>> = instruments
        .iter()
        .map(|instrument| {
            let matching_inclusion_tags: Vec<TagId> =
                instrument.inclusion_tags.intersection(in_scope).copied().collect();
            let matching_exclusion_tags: Vec<TagId> =
                instrument.exclusion_tags.intersection(in_scope).copied().collect();
            let inclusion_hits = matching_inclusion_tags.len();
            let exclusion_hits = matching_exclusion_tags.len();

            ScoredInstrument {
                instrument,
                inclusion_hits,
                matching_inclusion_tags,
                exclusion_hits,
                matching_exclusion_tags,
                score: config.method.score(inclusion_hits, exclusion_hits),
                tier: Tier::Low,
            }
        })
        .collect();

    let max_score = max_score(&scored);
    for entry in &mut scored {
        entry.tier = Tier::classify(entry.score, max_score, config.margin);
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    let summary = PrioritySummary::from_scored(&scored);
    tracing::debug!(
        "Prioritized {} instruments with {} (margin {}): max={} high={} mid={} low={}",
        scored.len(),
        config.method,
        config.margin,
        summary.max_score,
        summary.high,
        summary.mid,
        summary.low
    );

    scored
}

/// Highest score; 0 for an empty list
fn max_score(scored: &[ScoredInstrument<'_>]) -> i64 {
    scored.iter().map(|s| s.score).max().unwrap_or(0)
}

/// Tier counts of a prioritized list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrioritySummary {
    pub max_score: i64,
    pub high: usize,
    pub mid: usize,
    pub low: usize,
}

impl PrioritySummary {
    pub fn from_scored(scored: &[ScoredInstrument<'_>]) -> Self {
        let mut summary = Self {
            max_score: max_score(scored),
            ..Default::default()
        };
        for entry in scored {
            match entry.tier {
                Tier::High => summary.high += 1,
                Tier::Mid => summary.mid += 1,
                Tier::Low => summary.low += 1,
            }
        }
        summary
    }
}
