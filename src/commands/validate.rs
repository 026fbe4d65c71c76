//! @acp:module "Validate Command"
//! @acp:summary "Check a catalog for integrity problems"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;

use super::resolve_catalog_path;
use crate::catalog::{check_catalog, parse_catalog, CatalogFormat, Severity};
use crate::config::Config;

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Catalog file to validate
    pub catalog: Option<PathBuf>,
    /// Output findings as JSON
    pub json: bool,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions, config: &Config) -> Result<()> {
    let path = resolve_catalog_path(options.catalog.as_deref(), config)?;
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read catalog from {:?}", path))?;
    let catalog = parse_catalog(&content, CatalogFormat::from_path(&path))?;
    let findings = check_catalog(&catalog);
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        for finding in &findings {
            let marker = match finding.severity {
                Severity::Error => style("✗").red(),
                Severity::Warning => style("⚠").yellow(),
                Severity::Info => style("·").dim(),
            };
            println!("{} {}", marker, finding.message);
        }
        if errors == 0 {
            println!(
                "{} Catalog is valid: {} tags, {} instruments, {} questions",
                style("✓").green(),
                catalog.tags.len(),
                catalog.instruments.len(),
                catalog.questions().count()
            );
        }
    }

    if errors > 0 {
        bail!("Catalog has {} error(s)", errors);
    }
    Ok(())
}
