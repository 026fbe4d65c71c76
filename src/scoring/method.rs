//! @acp:module "Scoring Methods"
//! @acp:summary "Closed set of formulas turning tag hits into a score"
//! @acp:domain scoring
//! @acp:layer logic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdvisorError;

/// How inclusion and exclusion hits combine into a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMethod {
    /// `inclusion - exclusion`
    Difference,
    /// `inclusion`, or 0 as soon as one exclusion tag is in scope
    #[default]
    Excluded,
    /// `inclusion - 2 * exclusion`
    WeighDown,
}

impl ScoringMethod {
    pub const ALL: [ScoringMethod; 3] = [
        ScoringMethod::Difference,
        ScoringMethod::Excluded,
        ScoringMethod::WeighDown,
    ];

    /// Apply the formula
    pub fn score(self, inclusion_hits: usize, exclusion_hits: usize) -> i64 {
        let inclusion = inclusion_hits as i64;
        let exclusion = exclusion_hits as i64;
        match self {
            ScoringMethod::Difference => inclusion - exclusion,
            ScoringMethod::Excluded => {
                if exclusion == 0 {
                    inclusion
                } else {
                    0
                }
            }
            ScoringMethod::WeighDown => inclusion - 2 * exclusion,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoringMethod::Difference => "difference",
            ScoringMethod::Excluded => "excluded",
            ScoringMethod::WeighDown => "weigh-down",
        }
    }

    /// Legacy numeric code (0, 1, 2)
    pub fn code(self) -> u8 {
        match self {
            ScoringMethod::Difference => 0,
            ScoringMethod::Excluded => 1,
            ScoringMethod::WeighDown => 2,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScoringMethod::Difference => "Inclusion hits minus exclusion hits",
            ScoringMethod::Excluded => "Any active exclusion tag vetoes the instrument",
            ScoringMethod::WeighDown => "Exclusion hits count twice against inclusion hits",
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMethod {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "difference" | "0" => Ok(ScoringMethod::Difference),
            "excluded" | "1" => Ok(ScoringMethod::Excluded),
            "weigh-down" | "weigh_down" | "weighdown" | "2" => Ok(ScoringMethod::WeighDown),
            _ => Err(AdvisorError::Config(format!(
                "Unknown scoring method: {} (expected difference, excluded or weigh-down)",
                s
            ))),
        }
    }
}
