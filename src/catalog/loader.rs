//! @acp:module "Catalog Loader"
//! @acp:summary "Load catalogs from JSON or YAML and enforce reference integrity"
//! @acp:domain catalog
//! @acp:layer io

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;
use std::path::Path;

use serde::Serialize;

use super::types::*;
use super::Catalog;
use crate::error::{AdvisorError, Result};

/// On-disk catalog encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFormat {
    #[default]
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from a file extension; anything unknown is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => CatalogFormat::Yaml,
            _ => CatalogFormat::Json,
        }
    }
}

/// Load a catalog file and normalize its tag references.
///
/// Duplicate ids are rejected. References to tags the catalog does not define
/// are dropped with a warning so they can never match during scoring.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let mut catalog = parse_catalog(&content, CatalogFormat::from_path(path))?;
    normalize(&mut catalog)?;
    tracing::debug!(
        "Loaded catalog {:?}: {} tags, {} instruments, {} questions",
        path,
        catalog.tags.len(),
        catalog.instruments.len(),
        catalog.questions().count()
    );
    Ok(catalog)
}

/// Parse catalog text without any integrity pass
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Catalog> {
    match format {
        CatalogFormat::Json => Ok(serde_json::from_str(content)?),
        CatalogFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

fn normalize(catalog: &mut Catalog) -> Result<()> {
    if let Some(finding) = check_catalog(catalog)
        .into_iter()
        .find(|f| f.severity == Severity::Error)
    {
        return Err(AdvisorError::Catalog(finding.message));
    }

    let known: BTreeSet<TagId> = catalog.tags.iter().map(|t| t.id).collect();

    for instrument in &mut catalog.instruments {
        let name = instrument.name.clone();
        retain_known(&mut instrument.inclusion_tags, &known, || {
            format!("instrument '{}'", name)
        });
        retain_known(&mut instrument.exclusion_tags, &known, || {
            format!("instrument '{}' (exclusion)", name)
        });
    }

    for category in &mut catalog.categories {
        for question in &mut category.questions {
            for option in &mut question.options {
                let name = option.name.clone();
                retain_known(&mut option.tags, &known, || format!("option '{}'", name));
            }
        }
    }

    Ok(())
}

fn retain_known<F: Fn() -> String>(tags: &mut TagSet, known: &BTreeSet<TagId>, owner: F) {
    tags.retain(|id| {
        let keep = known.contains(id);
        if !keep {
            tracing::warn!("Dropping unknown tag {} referenced by {}", id, owner());
        }
        keep
    });
}

/// How serious a catalog finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// One integrity observation about a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(severity: Severity, message: String) -> Self {
        Self { severity, message }
    }
}

/// Inspect a catalog for integrity problems, most severe first
pub fn check_catalog(catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();

    duplicates(catalog.tags.iter().map(|t| t.id), "tag", &mut findings);
    duplicates(
        catalog.instruments.iter().map(|i| i.id),
        "instrument",
        &mut findings,
    );
    duplicates(catalog.categories.iter().map(|c| c.id), "category", &mut findings);
    duplicates(catalog.questions().map(|q| q.id), "question", &mut findings);
    duplicates(catalog.options().map(|o| o.id), "answer option", &mut findings);

    let known: HashSet<TagId> = catalog.tags.iter().map(|t| t.id).collect();

    for instrument in &catalog.instruments {
        for id in instrument
            .inclusion_tags
            .iter()
            .chain(instrument.exclusion_tags.iter())
            .filter(|id| !known.contains(id))
        {
            findings.push(Finding::new(
                Severity::Warning,
                format!("Instrument '{}' references unknown tag {}", instrument.name, id),
            ));
        }
        for id in instrument.inclusion_tags.intersection(&instrument.exclusion_tags) {
            findings.push(Finding::new(
                Severity::Info,
                format!(
                    "Instrument '{}' lists tag '{}' as both inclusion and exclusion",
                    instrument.name,
                    catalog.tag_name(*id)
                ),
            ));
        }
        if instrument.inclusion_tags.is_empty() {
            findings.push(Finding::new(
                Severity::Info,
                format!(
                    "Instrument '{}' has no inclusion tags and can never score above 0",
                    instrument.name
                ),
            ));
        }
    }

    for question in catalog.questions() {
        if question.options.is_empty() {
            findings.push(Finding::new(
                Severity::Warning,
                format!("Question '{}' has no answer options", question.name),
            ));
        }
        for option in &question.options {
            for id in option.tags.iter().filter(|id| !known.contains(id)) {
                findings.push(Finding::new(
                    Severity::Warning,
                    format!("Option '{}' references unknown tag {}", option.name, id),
                ));
            }
        }
    }

    findings.sort_by(|a, b| b.severity.cmp(&a.severity));
    findings
}

fn duplicates<T, I>(ids: I, kind: &str, findings: &mut Vec<Finding>)
where
    T: Copy + Eq + Hash + fmt::Display,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            findings.push(Finding::new(
                Severity::Error,
                format!("Duplicate {} id {}", kind, id),
            ));
        }
    }
}
