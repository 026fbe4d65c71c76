//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod answer;
pub mod case;
pub mod export;
pub mod init;
pub mod method;
pub mod rank;
pub mod tags;
pub mod validate;

pub use answer::{execute_answer, AnswerOptions};
pub use case::{execute_case, update_case_file, CaseOptions};
pub use export::{execute_export, generate_export, ExportOptions, ExportTarget};
pub use init::{execute_init, InitOptions};
pub use method::{execute_method, MethodOptions};
pub use rank::{execute_rank, generate_ranking, RankOptions};
pub use tags::{execute_tags, TagsOptions};
pub use validate::{execute_validate, ValidateOptions};

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::catalog::{load_catalog, Catalog};
use crate::config::Config;
use crate::session::Session;

/// Catalog path from the command line, falling back to the config file
pub(crate) fn resolve_catalog_path(explicit: Option<&Path>, config: &Config) -> Result<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.catalog.clone())
        .ok_or_else(|| anyhow!("No catalog given. Pass --catalog or set \"catalog\" in the config file"))
}

pub(crate) fn open_catalog(explicit: Option<&Path>, config: &Config) -> Result<Catalog> {
    let path = resolve_catalog_path(explicit, config)?;
    load_catalog(&path).with_context(|| format!("Failed to load catalog from {:?}", path))
}

pub(crate) fn open_session(path: &Path) -> Result<Session> {
    Session::load(path).with_context(|| format!("Failed to load session from {:?}", path))
}
