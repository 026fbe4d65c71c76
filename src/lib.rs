#![forbid(unsafe_code)]

//! @acp:module "Advisor Library"
//! @acp:summary "Tag-based prioritization of an intervention catalog"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # Advisor
//!
//! Users answer a questionnaire whose answer options carry tags. The tags a
//! work session selects are matched against each instrument's inclusion and
//! exclusion tags to rank the catalog.
//!
//! ## Features
//!
//! - **Pure scoring core**: no I/O, no shared state, safe across threads
//! - **Three scoring methods**: difference, excluded (hard veto), weigh-down
//! - **Tiers**: HIGH / MID / LOW relative to the top score and a margin
//! - **Reports**: ranking views and markdown session/catalog exports
//!
//! ## Example
//!
//! ```rust,no_run
//! use advisor::{load_catalog, prioritize, Config, Session};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default(".advisor.config.json")?;
//!     let catalog = load_catalog("catalog.json")?;
//!     let session = Session::load("session.json")?;
//!
//!     let instruments = catalog.instruments_by_name();
//!     let in_scope = session.in_scope_tags(&catalog);
//!     for scored in prioritize(&instruments, &in_scope, &config.scoring()?) {
//!         println!("{:>3} {:4} {}", scored.score, scored.tier, scored.instrument.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod scoring;
pub mod session;

// Re-exports
pub use catalog::{
    load_catalog, AnswerOption, Catalog, Category, Instrument, InstrumentId, OptionId, Question,
    QuestionId, Tag, TagId, TagSet,
};
pub use config::Config;
pub use error::{AdvisorError, Result};
pub use report::OutputFormat;
pub use scoring::{
    compute_in_scope_tags, prioritize, rank_session, PrioritySummary, ScoredInstrument,
    ScoringConfig, ScoringMethod, Tier,
};
pub use session::{CaseUpdate, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
