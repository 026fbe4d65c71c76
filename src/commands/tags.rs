//! @acp:module "Tags Command"
//! @acp:summary "Show the tags a session brings into scope"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::{open_catalog, open_session};
use crate::catalog::TagId;
use crate::config::Config;

/// Options for the tags command
#[derive(Debug, Clone)]
pub struct TagsOptions {
    pub catalog: Option<PathBuf>,
    pub session: PathBuf,
    /// Output as JSON
    pub json: bool,
}

#[derive(Serialize)]
struct TagEntry {
    id: TagId,
    name: String,
}

/// Execute the tags command
pub fn execute_tags(options: TagsOptions, config: &Config) -> Result<()> {
    let catalog = open_catalog(options.catalog.as_deref(), config)?;
    let session = open_session(&options.session)?;
    let in_scope = session.in_scope_tags(&catalog);

    let entries: Vec<TagEntry> = in_scope
        .iter()
        .map(|id| TagEntry {
            id: *id,
            name: catalog.tag_name(*id),
        })
        .collect();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{} option(s) selected, {} tag(s) in scope",
        session.selected_options.len(),
        entries.len()
    );
    for entry in &entries {
        println!("  {} {}", style(format!("{:>4}", entry.id)).dim(), entry.name);
    }
    Ok(())
}
