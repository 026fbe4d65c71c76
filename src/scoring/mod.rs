//! @acp:module "Scoring"
//! @acp:summary "Tag aggregation and instrument prioritization"
//! @acp:domain scoring
//! @acp:layer feature
//!
//! Data flows one way: selected options → in-scope tags → per-instrument
//! tag intersections → score → tier → ranked list. Every function here is pure
//! and safe to call from several threads at once.

pub mod aggregator;
pub mod method;
pub mod prioritizer;

pub use aggregator::compute_in_scope_tags;
pub use method::ScoringMethod;
pub use prioritizer::{
    prioritize, PrioritySummary, ScoredInstrument, ScoringConfig, Tier, DEFAULT_MARGIN,
};

use crate::catalog::{Catalog, Instrument};
use crate::session::Session;

/// Aggregate a session's in-scope tags and prioritize `instruments` against them.
///
/// Callers pass `Catalog::instruments_by_name()` so ties resolve alphabetically.
pub fn rank_session<'a>(
    instruments: &'a [Instrument],
    catalog: &Catalog,
    session: &Session,
    config: &ScoringConfig,
) -> Vec<ScoredInstrument<'a>> {
    let in_scope = session.in_scope_tags(catalog);
    prioritize(instruments, &in_scope, config)
}
