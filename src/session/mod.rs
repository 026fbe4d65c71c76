//! @acp:module "Session"
//! @acp:summary "Work session: questionnaire answers, motivations and case notes"
//! @acp:domain session
//! @acp:layer feature

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{AnswerOption, Catalog, OptionId, Question, QuestionId, TagSet};
use crate::error::{AdvisorError, Result};
use crate::scoring::compute_in_scope_tags;

fn default_true() -> bool {
    true
}

/// A user's answers for one case.
///
/// The in-scope tag set is never stored; it is recomputed from
/// `selected_options` every time it is asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub id: u32,

    pub name: String,

    /// Participants of the work session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Intended effect of the intervention
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,

    /// Final considerations and chosen approach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    /// Whether the ranked instruments are shown while answering
    #[serde(default = "default_true")]
    pub show_instruments: bool,

    #[serde(default)]
    pub selected_options: BTreeSet<OptionId>,

    /// Free-text motivation per answered question
    #[serde(default)]
    pub motivations: BTreeMap<QuestionId, String>,
}

/// Edits to a session's case information.
///
/// `None` leaves a field as it is. For the optional text fields an empty
/// string clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseUpdate {
    pub name: Option<String>,
    pub authors: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub problem_statement: Option<String>,
    pub conclusion: Option<String>,
    pub show_instruments: Option<bool>,
}

impl CaseUpdate {
    pub fn is_empty(&self) -> bool {
        *self == CaseUpdate::default()
    }
}

fn set_text(field: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = value {
        let value = value.trim();
        *field = (!value.is_empty()).then(|| value.to_string());
    }
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            authors: None,
            date: None,
            problem_statement: None,
            conclusion: None,
            show_instruments: true,
            selected_options: BTreeSet::new(),
            motivations: BTreeMap::new(),
        }
    }

    /// Load a session from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the session as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Union of the tags carried by every selected option
    pub fn in_scope_tags(&self, catalog: &Catalog) -> TagSet {
        compute_in_scope_tags(&self.selected_options, catalog.options())
    }

    /// Replace the answer to one question.
    ///
    /// Every option of the question is deselected before the new ones are
    /// selected, so answering twice with the same input is a no-op. The
    /// motivation is replaced too; an empty one removes it.
    pub fn answer(
        &mut self,
        catalog: &Catalog,
        question_id: QuestionId,
        options: &[OptionId],
        motivation: Option<&str>,
    ) -> Result<()> {
        let question = catalog
            .question(question_id)
            .ok_or(AdvisorError::UnknownQuestion(question_id))?;

        for id in options {
            if !question.options.iter().any(|o| o.id == *id) {
                if catalog.option(*id).is_none() {
                    return Err(AdvisorError::UnknownOption(*id));
                }
                return Err(AdvisorError::InvalidAnswer(format!(
                    "option {} does not belong to question '{}'",
                    id, question.name
                )));
            }
        }

        let distinct: BTreeSet<OptionId> = options.iter().copied().collect();
        if !question.multiselect && distinct.len() > 1 {
            return Err(AdvisorError::InvalidAnswer(format!(
                "question '{}' accepts a single option, got {}",
                question.name,
                distinct.len()
            )));
        }

        for option in &question.options {
            self.selected_options.remove(&option.id);
        }
        self.selected_options.extend(distinct);

        match motivation.map(str::trim).filter(|m| !m.is_empty()) {
            Some(text) => {
                self.motivations.insert(question_id, text.to_string());
            }
            None => {
                self.motivations.remove(&question_id);
            }
        }

        tracing::debug!(
            "Session '{}' answered question {} with {:?}",
            self.name,
            question_id,
            options
        );
        Ok(())
    }

    /// Deselect one option; returns whether it was selected
    pub fn deselect(&mut self, option: OptionId) -> bool {
        let removed = self.selected_options.remove(&option);
        if removed {
            tracing::debug!("Session '{}' deselected option {}", self.name, option);
        }
        removed
    }

    /// Selected options of one question, in the question's order
    pub fn answered_options<'c>(&self, question: &'c Question) -> Vec<&'c AnswerOption> {
        question
            .options
            .iter()
            .filter(|o| self.selected_options.contains(&o.id))
            .collect()
    }

    pub fn motivation(&self, question: QuestionId) -> Option<&str> {
        self.motivations.get(&question).map(String::as_str)
    }

    /// Apply case edits. Nothing changes when any field is rejected.
    pub fn update_case(&mut self, update: &CaseUpdate) -> Result<()> {
        let name = match update.name.as_deref().map(str::trim) {
            Some("") => {
                return Err(AdvisorError::InvalidCase("name cannot be empty".to_string()));
            }
            other => other,
        };
        if let Some(date) = update.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                AdvisorError::InvalidCase(format!("date '{}' is not YYYY-MM-DD", date))
            })?;
        }

        if let Some(name) = name {
            self.name = name.to_string();
        }
        set_text(&mut self.authors, update.authors.as_deref());
        set_text(&mut self.date, update.date.as_deref());
        set_text(&mut self.problem_statement, update.problem_statement.as_deref());
        set_text(&mut self.conclusion, update.conclusion.as_deref());
        if let Some(show) = update.show_instruments {
            self.show_instruments = show;
        }

        tracing::debug!("Session '{}' case information updated", self.name);
        Ok(())
    }
}
