//! @acp:module "Report Export"
//! @acp:summary "Session report and catalog export rendered through handlebars"
//! @acp:domain report
//! @acp:layer output
//!
//! The session report reads the prioritized list through its score and tier
//! fields only: instruments with at least one inclusion hit make the advice
//! table, HIGH-tier instruments get a full section.

use chrono::NaiveDate;
use handlebars::Handlebars;
use serde::Serialize;

use super::renderer::{table_cell, tag_line};
use super::templates::{CATALOG_EXPORT, SESSION_REPORT};
use crate::catalog::{Catalog, Instrument};
use crate::error::Result;
use crate::scoring::{ScoredInstrument, Tier};
use crate::session::Session;

const SESSION_TEMPLATE: &str = "session";
const CATALOG_TEMPLATE: &str = "catalog";

/// Instruments for the advice table: at least one matching inclusion tag
pub fn advice_entries<'s, 'a>(scored: &'s [ScoredInstrument<'a>]) -> Vec<&'s ScoredInstrument<'a>> {
    scored.iter().filter(|s| s.inclusion_hits > 0).collect()
}

/// Instruments described in full: HIGH tier only
pub fn detail_entries<'s, 'a>(scored: &'s [ScoredInstrument<'a>]) -> Vec<&'s ScoredInstrument<'a>> {
    scored.iter().filter(|s| s.tier == Tier::High).collect()
}

#[derive(Serialize)]
struct SessionReportData<'a> {
    name: &'a str,
    date: Option<&'a str>,
    authors: Option<&'a str>,
    problem_statement: Option<&'a str>,
    conclusion: Option<&'a str>,
    categories: Vec<CategoryData<'a>>,
    advice: Vec<AdviceRow>,
    details: Vec<DetailData<'a>>,
    generated_on: String,
}

#[derive(Serialize)]
struct CategoryData<'a> {
    name: &'a str,
    questions: Vec<QuestionData<'a>>,
}

#[derive(Serialize)]
struct QuestionData<'a> {
    name: &'a str,
    answers: Vec<&'a str>,
    motivation: Option<&'a str>,
}

/// One advice table row; text is already escaped for a table cell
#[derive(Serialize)]
struct AdviceRow {
    name: String,
    score: i64,
    intro: String,
}

#[derive(Serialize)]
struct DetailData<'a> {
    name: &'a str,
    intro: &'a str,
    description: &'a str,
    considerations: &'a str,
    examples: &'a str,
    owner: &'a str,
    owner_email: &'a str,
    score: i64,
    tags: String,
}

#[derive(Serialize)]
struct CatalogExportData<'a> {
    title: Option<&'a str>,
    instruments: Vec<CatalogEntry<'a>>,
    footer: String,
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    name: &'a str,
    intro: &'a str,
    description: &'a str,
    considerations: &'a str,
    examples: &'a str,
    links: Option<&'a str>,
    owner: &'a str,
    owner_email: &'a str,
    inclusion: String,
    exclusion: String,
}

fn registry() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_template_string(SESSION_TEMPLATE, SESSION_REPORT)?;
    handlebars.register_template_string(CATALOG_TEMPLATE, CATALOG_EXPORT)?;
    Ok(handlebars)
}

/// Render the markdown report of a work session
pub fn render_session_report(
    session: &Session,
    catalog: &Catalog,
    scored: &[ScoredInstrument<'_>],
    generated_on: NaiveDate,
) -> Result<String> {
    let categories = catalog
        .categories
        .iter()
        .map(|category| CategoryData {
            name: &category.name,
            questions: category
                .questions
                .iter()
                .map(|question| QuestionData {
                    name: &question.name,
                    answers: session
                        .answered_options(question)
                        .into_iter()
                        .map(|o| o.name.as_str())
                        .collect(),
                    motivation: session.motivation(question.id),
                })
                .collect(),
        })
        .collect();

    let advice = advice_entries(scored)
        .into_iter()
        .map(|s| AdviceRow {
            name: table_cell(&s.instrument.name),
            score: s.score,
            intro: table_cell(&s.instrument.intro),
        })
        .collect();

    let details = detail_entries(scored)
        .into_iter()
        .map(|s| DetailData {
            name: &s.instrument.name,
            intro: &s.instrument.intro,
            description: &s.instrument.description,
            considerations: &s.instrument.considerations,
            examples: &s.instrument.examples,
            owner: &s.instrument.owner,
            owner_email: &s.instrument.owner_email,
            score: s.score,
            tags: tag_line(catalog, &s.matching_inclusion_tags, &s.matching_exclusion_tags),
        })
        .collect();

    let data = SessionReportData {
        name: &session.name,
        date: session.date.as_deref(),
        authors: session.authors.as_deref(),
        problem_statement: session.problem_statement.as_deref(),
        conclusion: session.conclusion.as_deref(),
        categories,
        advice,
        details,
        generated_on: generated_on.format("%Y-%m-%d").to_string(),
    };

    Ok(registry()?.render(SESSION_TEMPLATE, &data)?)
}

/// Render instruments with their full tag lists.
///
/// A title is added when more than one instrument is exported.
pub fn render_catalog_export(
    instruments: &[Instrument],
    catalog: &Catalog,
    generated_on: NaiveDate,
) -> Result<String> {
    let date = generated_on.format("%Y-%m-%d");
    let footer = match instruments {
        [single] => format!("{} from the instrument catalog. Generated on {}.", single.name, date),
        _ => format!("Instrument catalog. Generated on {}.", date),
    };

    let entries = instruments
        .iter()
        .map(|i| {
            let inclusion: Vec<_> = i.inclusion_tags.iter().copied().collect();
            let exclusion: Vec<_> = i.exclusion_tags.iter().copied().collect();
            CatalogEntry {
                name: &i.name,
                intro: &i.intro,
                description: &i.description,
                considerations: &i.considerations,
                examples: &i.examples,
                links: i.links.as_deref(),
                owner: &i.owner,
                owner_email: &i.owner_email,
                inclusion: tag_line(catalog, &inclusion, &[]),
                exclusion: tag_line(catalog, &[], &exclusion),
            }
        })
        .collect();

    let data = CatalogExportData {
        title: (instruments.len() > 1).then_some("Instrument catalog"),
        instruments: entries,
        footer,
    };

    Ok(registry()?.render(CATALOG_TEMPLATE, &data)?)
}
