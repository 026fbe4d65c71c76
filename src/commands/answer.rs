//! @acp:module "Answer Command"
//! @acp:summary "Record questionnaire answers in a session file"
//! @acp:domain cli
//! @acp:layer handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};

use super::{open_catalog, open_session};
use crate::catalog::{Catalog, Category, OptionId, Question, QuestionId};
use crate::config::Config;
use crate::session::Session;

/// Options for the answer command
#[derive(Debug, Clone, Default)]
pub struct AnswerOptions {
    pub catalog: Option<PathBuf>,
    /// Session file; created when missing
    pub session: PathBuf,
    /// Name for a newly created session
    pub name: Option<String>,
    /// Question to answer
    pub question: Option<QuestionId>,
    /// Options to select for the question (empty clears the answer)
    pub options: Vec<OptionId>,
    /// Motivation for the answer
    pub motivation: Option<String>,
    /// Options to deselect
    pub remove: Vec<OptionId>,
    /// Walk every question interactively
    pub interactive: bool,
}

/// Execute the answer command
pub fn execute_answer(options: AnswerOptions, config: &Config) -> Result<()> {
    let catalog = open_catalog(options.catalog.as_deref(), config)?;

    let mut session = if options.session.exists() {
        open_session(&options.session)?
    } else {
        let name = options.name.clone().unwrap_or_else(|| {
            options
                .session
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "session".to_string())
        });
        println!("{} Starting new session '{}'", style("✓").green(), name);
        Session::new(name)
    };

    if options.interactive {
        session.save(&options.session)?;
        run_questionnaire(&catalog, &mut session, &options.session)?;
    } else {
        apply_answers(&catalog, &mut session, &options)?;
        session.save(&options.session)?;
    }

    println!(
        "{} Saved {} ({} option(s) selected)",
        style("✓").green(),
        options.session.display(),
        session.selected_options.len()
    );
    Ok(())
}

/// Apply the non-interactive edits in the order: deselect, then answer
pub fn apply_answers(catalog: &Catalog, session: &mut Session, options: &AnswerOptions) -> Result<()> {
    for id in &options.remove {
        if !session.deselect(*id) {
            eprintln!("{} Option {} was not selected", style("!").yellow(), id);
        }
    }

    match options.question {
        Some(question) => {
            session.answer(catalog, question, &options.options, options.motivation.as_deref())?;
        }
        None if !options.options.is_empty() || options.motivation.is_some() => {
            bail!("--option and --motivation need --question");
        }
        None => {}
    }
    Ok(())
}

/// Categories and the questions in them that can be answered.
///
/// Questions without options are skipped; categories left empty are dropped.
pub fn questionnaire(catalog: &Catalog) -> Vec<(&Category, Vec<&Question>)> {
    catalog
        .categories
        .iter()
        .filter_map(|category| {
            let questions: Vec<&Question> = category
                .questions
                .iter()
                .filter(|question| {
                    let answerable = !question.options.is_empty();
                    if !answerable {
                        tracing::warn!("Skipping question '{}': it has no options", question.name);
                    }
                    answerable
                })
                .collect();
            (!questions.is_empty()).then_some((category, questions))
        })
        .collect()
}

/// Ask every question, saving the session after each answer
fn run_questionnaire(catalog: &Catalog, session: &mut Session, path: &Path) -> Result<()> {
    let theme = ColorfulTheme::default();

    for (category, questions) in questionnaire(catalog) {
        println!("\n{}", style(&category.name).bold().underlined());
        for question in questions {
            let selected = ask_question(&theme, question, session)?;
            let motivation: String = Input::with_theme(&theme)
                .with_prompt("Motivation")
                .with_initial_text(session.motivation(question.id).unwrap_or_default())
                .allow_empty(true)
                .interact_text()?;
            session.answer(catalog, question.id, &selected, Some(&motivation))?;
            session.save(path)?;
        }
    }
    Ok(())
}

fn ask_question(theme: &ColorfulTheme, question: &Question, session: &Session) -> Result<Vec<OptionId>> {
    let labels: Vec<&str> = question.options.iter().map(|o| o.name.as_str()).collect();

    if question.multiselect {
        let defaults: Vec<bool> = question
            .options
            .iter()
            .map(|o| session.selected_options.contains(&o.id))
            .collect();
        let picked = MultiSelect::with_theme(theme)
            .with_prompt(&question.name)
            .items(&labels)
            .defaults(&defaults)
            .interact()?;
        return Ok(picked.into_iter().map(|i| question.options[i].id).collect());
    }

    // Last entry leaves the question unanswered
    let mut items = labels;
    items.push("(no answer)");
    let current = question
        .options
        .iter()
        .position(|o| session.selected_options.contains(&o.id))
        .unwrap_or(question.options.len());
    let picked = Select::with_theme(theme)
        .with_prompt(&question.name)
        .items(&items)
        .default(current)
        .interact()?;

    Ok(question.options.get(picked).map(|o| vec![o.id]).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AnswerOption, CategoryId, TagId};

    fn catalog() -> Catalog {
        Catalog {
            categories: vec![Category {
                id: CategoryId(1),
                name: "Context".to_string(),
                questions: vec![Question {
                    id: QuestionId(1),
                    name: "Who is affected?".to_string(),
                    multiselect: true,
                    options: vec![
                        AnswerOption::new(1, "Consumers", [TagId(1)]),
                        AnswerOption::new(2, "Firms", [TagId(2)]),
                    ],
                }],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_remove_then_answer() {
        let catalog = catalog();
        let mut session = Session::new("case");
        session.selected_options.insert(OptionId(1));

        let options = AnswerOptions {
            question: Some(QuestionId(1)),
            options: vec![OptionId(2)],
            remove: vec![OptionId(1)],
            ..Default::default()
        };
        apply_answers(&catalog, &mut session, &options).unwrap();
        assert_eq!(session.selected_options.iter().copied().collect::<Vec<_>>(), vec![OptionId(2)]);
    }

    #[test]
    fn test_questionnaire_skips_questions_without_options() {
        let mut catalog = catalog();
        catalog.categories[0].questions.push(Question {
            id: QuestionId(2),
            name: "Empty".to_string(),
            multiselect: true,
            options: vec![],
        });
        catalog.categories.push(Category {
            id: CategoryId(2),
            name: "Nothing to ask".to_string(),
            questions: vec![Question {
                id: QuestionId(3),
                name: "Also empty".to_string(),
                multiselect: false,
                options: vec![],
            }],
        });

        let asked = questionnaire(&catalog);
        assert_eq!(asked.len(), 1);
        assert_eq!(asked[0].0.name, "Context");
        let ids: Vec<_> = asked[0].1.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![QuestionId(1)]);
    }

    #[test]
    fn test_options_without_question_rejected() {
        let catalog = catalog();
        let mut session = Session::new("case");
        let options = AnswerOptions {
            options: vec![OptionId(2)],
            ..Default::default()
        };
        assert!(apply_answers(&catalog, &mut session, &options).is_err());
    }
}
