//! Command tests
//!
//! Catalog loading, session editing, ranking and export against files on disk.

use std::path::{Path, PathBuf};

use advisor::commands::{
    execute_answer, execute_case, execute_init, execute_method, execute_tags, execute_validate,
    generate_export, generate_ranking, update_case_file, AnswerOptions, CaseOptions,
    ExportOptions, ExportTarget, InitOptions, MethodOptions, RankOptions, TagsOptions,
    ValidateOptions,
};
use advisor::{
    load_catalog, CaseUpdate, Config, InstrumentId, OptionId, OutputFormat, QuestionId,
    ScoringMethod, Session, TagId, TagSet, Tier,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.yaml");

fn fixture() -> PathBuf {
    PathBuf::from(FIXTURE)
}

fn config_with_catalog() -> Config {
    Config {
        catalog: Some(fixture()),
        ..Config::default()
    }
}

/// Consumers + businesses, addressed before, urgent harm
fn write_session(dir: &Path) -> PathBuf {
    let catalog = load_catalog(fixture()).unwrap();
    let mut session = Session::new("Price display");
    session
        .answer(&catalog, QuestionId(1), &[OptionId(1), OptionId(2)], Some("Both are misled"))
        .unwrap();
    session.answer(&catalog, QuestionId(2), &[OptionId(3)], None).unwrap();
    session.answer(&catalog, QuestionId(3), &[OptionId(6)], None).unwrap();

    let path = dir.join("session.json");
    session.save(&path).unwrap();
    path
}

fn rank_json(options: RankOptions, config: &Config) -> Vec<(String, i64, String)> {
    let options = RankOptions {
        format: Some(OutputFormat::Json),
        ..options
    };
    let output = generate_ranking(&options, config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    json["instruments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["instrument"]["name"].as_str().unwrap().to_string(),
                s["score"].as_i64().unwrap(),
                s["tier"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn ranked(entries: &[(&str, i64, &str)]) -> Vec<(String, i64, String)> {
    entries
        .iter()
        .map(|(n, s, t)| (n.to_string(), *s, t.to_string()))
        .collect()
}

// =============================================================================
// Catalog loading
// =============================================================================

mod catalog_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_yaml_fixture() {
        let catalog = load_catalog(fixture()).unwrap();
        assert_eq!(catalog.tags.len(), 5);
        assert_eq!(catalog.instruments.len(), 4);
        assert_eq!(catalog.questions().count(), 3);

        // Tag 99 is not defined and is dropped on load
        let campaign = catalog.instrument(InstrumentId(4)).unwrap();
        assert_eq!(campaign.exclusion_tags, TagSet::from([TagId(5)]));
        assert_eq!(campaign.links.as_deref(), Some("https://example.org/campaigns"));
    }

    #[test]
    fn test_json_and_yaml_agree() {
        let dir = TempDir::new().unwrap();
        let yaml = load_catalog(fixture()).unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string_pretty(&yaml).unwrap()).unwrap();

        assert_eq!(load_catalog(&path).unwrap(), yaml);
    }

    #[test]
    fn test_duplicate_instrument_ids_fail_to_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(
            &path,
            "instruments:\n  - { id: 1, name: A }\n  - { id: 1, name: B }\n",
        )
        .unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("Duplicate instrument id 1"), "{}", err);
    }

    #[test]
    fn test_validate_passes_with_warnings() {
        let options = ValidateOptions {
            catalog: Some(fixture()),
            json: true,
        };
        assert!(execute_validate(options, &Config::default()).is_ok());
    }

    #[test]
    fn test_validate_without_catalog_fails() {
        let options = ValidateOptions {
            catalog: None,
            json: false,
        };
        let err = execute_validate(options, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("No catalog given"));
    }
}

// =============================================================================
// Ranking
// =============================================================================

mod rank_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rank_with_default_method() {
        let dir = TempDir::new().unwrap();
        let options = RankOptions {
            session: write_session(dir.path()),
            ..Default::default()
        };

        assert_eq!(
            rank_json(options, &config_with_catalog()),
            ranked(&[
                ("Administrative fine", 3, "high"),
                ("Criminal referral", 1, "mid"),
                ("Consumer campaign", 0, "low"),
                ("Warning letter", 0, "low"),
            ])
        );
    }

    #[test]
    fn test_rank_method_override() {
        let dir = TempDir::new().unwrap();
        let session = write_session(dir.path());

        let difference = RankOptions {
            session: session.clone(),
            method: Some(ScoringMethod::Difference),
            ..Default::default()
        };
        assert_eq!(
            rank_json(difference, &config_with_catalog()),
            ranked(&[
                ("Administrative fine", 3, "high"),
                ("Criminal referral", 1, "mid"),
                ("Warning letter", 1, "mid"),
                ("Consumer campaign", 0, "low"),
            ])
        );

        let weigh_down = RankOptions {
            session,
            method: Some(ScoringMethod::WeighDown),
            margin: Some(2),
            ..Default::default()
        };
        assert_eq!(
            rank_json(weigh_down, &config_with_catalog()),
            ranked(&[
                ("Administrative fine", 3, "high"),
                ("Criminal referral", 1, "high"),
                ("Warning letter", 0, "low"),
                ("Consumer campaign", -1, "low"),
            ])
        );
    }

    #[test]
    fn test_rank_tier_filter() {
        let dir = TempDir::new().unwrap();
        let options = RankOptions {
            session: write_session(dir.path()),
            tier: Some(Tier::Low),
            ..Default::default()
        };
        let names: Vec<_> = rank_json(options, &config_with_catalog())
            .into_iter()
            .map(|(name, _, _)| name)
            .collect();
        assert_eq!(names, vec!["Consumer campaign", "Warning letter"]);
    }

    #[test]
    fn test_rank_markdown() {
        let dir = TempDir::new().unwrap();
        let options = RankOptions {
            session: write_session(dir.path()),
            format: Some(OutputFormat::Markdown),
            ..Default::default()
        };
        let output = generate_ranking(&options, &config_with_catalog()).unwrap();
        assert!(output.starts_with("# Ranking: Price display"));
        assert!(output.contains("| 1 | Administrative fine | 3 | high | +businesses +repeat-offence +urgent |"));
        assert!(output.contains("| 4 | Warning letter | 0 | low | +consumers +businesses -repeat-offence |"));
    }

    #[test]
    fn test_negative_margin_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let options = RankOptions {
            session: write_session(dir.path()),
            margin: Some(-1),
            ..Default::default()
        };
        let err = generate_ranking(&options, &config_with_catalog()).unwrap_err();
        assert!(err.to_string().contains("Margin must be a non-negative integer"));
    }

    #[test]
    fn test_in_scope_tags() {
        let dir = TempDir::new().unwrap();
        let session = write_session(dir.path());
        let catalog = load_catalog(fixture()).unwrap();

        let tags = Session::load(&session).unwrap().in_scope_tags(&catalog);
        assert_eq!(tags, TagSet::from([TagId(1), TagId(2), TagId(3), TagId(5)]));

        let options = TagsOptions {
            catalog: None,
            session,
            json: true,
        };
        execute_tags(options, &config_with_catalog()).unwrap();
    }

    #[test]
    fn test_empty_session_scores_all_low() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        Session::new("Empty").save(&path).unwrap();

        let options = RankOptions {
            session: path,
            ..Default::default()
        };
        let rows = rank_json(options, &config_with_catalog());
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|(_, score, tier)| *score == 0 && tier == "low"));
        // Ties fall back to catalog name order
        assert_eq!(rows[0].0, "Administrative fine");
        assert_eq!(rows[3].0, "Warning letter");
    }
}

// =============================================================================
// Answering
// =============================================================================

mod answer_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_answer_creates_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("case.json");

        let options = AnswerOptions {
            session: path.clone(),
            question: Some(QuestionId(1)),
            options: vec![OptionId(2)],
            motivation: Some("Only shops".to_string()),
            ..Default::default()
        };
        execute_answer(options, &config_with_catalog()).unwrap();

        let session = Session::load(&path).unwrap();
        assert_eq!(session.name, "case");
        assert!(session.selected_options.contains(&OptionId(2)));
        assert_eq!(session.motivation(QuestionId(1)), Some("Only shops"));
    }

    #[test]
    fn test_answer_replaces_and_removes() {
        let dir = TempDir::new().unwrap();
        let path = write_session(dir.path());

        let replace = AnswerOptions {
            session: path.clone(),
            question: Some(QuestionId(3)),
            options: vec![OptionId(5)],
            ..Default::default()
        };
        execute_answer(replace, &config_with_catalog()).unwrap();

        let remove = AnswerOptions {
            session: path.clone(),
            remove: vec![OptionId(1)],
            ..Default::default()
        };
        execute_answer(remove, &config_with_catalog()).unwrap();

        let session = Session::load(&path).unwrap();
        let selected: Vec<u32> = session.selected_options.iter().map(|o| o.0).collect();
        assert_eq!(selected, vec![2, 3, 5]);
        assert_eq!(session.motivation(QuestionId(1)), Some("Both are misled"));
    }

    #[test]
    fn test_single_select_rejects_two_options() {
        let dir = TempDir::new().unwrap();
        let path = write_session(dir.path());

        let options = AnswerOptions {
            session: path.clone(),
            question: Some(QuestionId(2)),
            options: vec![OptionId(3), OptionId(4)],
            ..Default::default()
        };
        let err = execute_answer(options, &config_with_catalog()).unwrap_err();
        assert!(err.to_string().contains("accepts a single option"));

        // The file is untouched
        let session = Session::load(&path).unwrap();
        assert!(session.selected_options.contains(&OptionId(3)));
        assert!(!session.selected_options.contains(&OptionId(4)));
    }

    #[test]
    fn test_option_from_other_question_rejected() {
        let dir = TempDir::new().unwrap();
        let options = AnswerOptions {
            session: write_session(dir.path()),
            question: Some(QuestionId(1)),
            options: vec![OptionId(6)],
            ..Default::default()
        };
        let err = execute_answer(options, &config_with_catalog()).unwrap_err();
        assert!(err.to_string().contains("does not belong to question"));
    }
}

// =============================================================================
// Case information
// =============================================================================

mod case_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn case(session: PathBuf, update: CaseUpdate) -> CaseOptions {
        CaseOptions { session, update }
    }

    #[test]
    fn test_case_fields_reach_the_report() {
        let dir = TempDir::new().unwrap();
        let path = write_session(dir.path());

        let update = CaseUpdate {
            authors: Some("Inspectors A and B".to_string()),
            date: Some("2026-02-27".to_string()),
            problem_statement: Some("Shops show prices without fees".to_string()),
            conclusion: Some("Start with a fine".to_string()),
            ..Default::default()
        };
        execute_case(case(path.clone(), update)).unwrap();

        let options = ExportOptions {
            catalog: Some(fixture()),
            target: ExportTarget::Session(path),
            output: None,
            method: None,
            margin: None,
        };
        let report = generate_export(&options, &Config::default()).unwrap();
        assert!(report.contains("Participants: Inspectors A and B"));
        assert!(report.contains("Date of the work session: 2026-02-27"));
        assert!(report.contains("Shops show prices without fees"));
        assert!(report.contains("Start with a fine"));
        assert!(!report.contains("_Not recorded._"));
    }

    #[test]
    fn test_case_keeps_answers_and_clears_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_session(dir.path());
        let before = Session::load(&path).unwrap();

        let set = CaseUpdate {
            name: Some("Renamed".to_string()),
            authors: Some("Team".to_string()),
            ..Default::default()
        };
        update_case_file(&case(path.clone(), set)).unwrap();
        let clear = CaseUpdate {
            authors: Some(String::new()),
            ..Default::default()
        };
        update_case_file(&case(path.clone(), clear)).unwrap();

        let after = Session::load(&path).unwrap();
        assert_eq!(after.name, "Renamed");
        assert_eq!(after.authors, None);
        assert_eq!(after.selected_options, before.selected_options);
        assert_eq!(after.motivations, before.motivations);
    }

    #[test]
    fn test_hide_and_show_instruments() {
        let dir = TempDir::new().unwrap();
        let path = write_session(dir.path());
        let rank = RankOptions {
            session: path.clone(),
            format: Some(OutputFormat::Text),
            ..Default::default()
        };

        let hide = CaseUpdate {
            show_instruments: Some(false),
            ..Default::default()
        };
        update_case_file(&case(path.clone(), hide)).unwrap();
        let hidden = generate_ranking(&rank, &config_with_catalog()).unwrap();
        assert!(hidden.contains("Instruments are hidden for this session."));
        assert!(!hidden.contains("Administrative fine"));

        let show = CaseUpdate {
            show_instruments: Some(true),
            ..Default::default()
        };
        update_case_file(&case(path, show)).unwrap();
        let shown = generate_ranking(&rank, &config_with_catalog()).unwrap();
        assert!(shown.contains("Administrative fine"));
    }

    #[test]
    fn test_case_starts_new_session_and_rejects_bad_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new-case.json");

        let bad = CaseUpdate {
            date: Some("yesterday".to_string()),
            ..Default::default()
        };
        let err = update_case_file(&case(path.clone(), bad)).unwrap_err();
        assert!(err.to_string().contains("not YYYY-MM-DD"));
        assert!(!path.exists());

        let good = CaseUpdate {
            date: Some("2026-03-01".to_string()),
            ..Default::default()
        };
        let session = update_case_file(&case(path.clone(), good)).unwrap();
        assert_eq!(session.name, "new-case");
        assert_eq!(Session::load(&path).unwrap().date.as_deref(), Some("2026-03-01"));
    }
}

// =============================================================================
// Export
// =============================================================================

mod export_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn export(target: ExportTarget) -> String {
        let options = ExportOptions {
            catalog: Some(fixture()),
            target,
            output: None,
            method: None,
            margin: None,
        };
        generate_export(&options, &Config::default()).unwrap()
    }

    #[test]
    fn test_session_report() {
        let dir = TempDir::new().unwrap();
        let report = export(ExportTarget::Session(write_session(dir.path())));

        assert!(report.starts_with("# Work session report\n## Price display"));
        assert!(report.contains("**Who is affected?**"));
        assert!(report.contains("- Consumers"));
        assert!(report.contains("- Businesses"));
        assert!(report.contains("> Both are misled"));

        // Every instrument with an inclusion hit is advised, even at score 0
        assert!(report.contains("| Administrative fine | 3 | Impose a fine for a proven violation. |"));
        assert!(report.contains("| Warning letter | 0 | Send a formal warning to the offender. |"));

        // Only the HIGH tier gets a section
        assert!(report.contains("## Administrative fine"));
        assert!(report.contains("**Impose a fine for a proven violation.**"));
        assert!(!report.contains("## Criminal referral"));
        assert!(!report.contains("## Warning letter"));
    }

    #[test]
    fn test_catalog_export() {
        let all = export(ExportTarget::Catalog);
        assert!(all.starts_with("# Instrument catalog"));
        let fine = all.find("## Administrative fine").unwrap();
        let letter = all.find("## Warning letter").unwrap();
        assert!(fine < letter);
        assert!(all.contains("Excluded by: -urgent"));
    }

    #[test]
    fn test_single_instrument_export() {
        let one = export(ExportTarget::Instrument(InstrumentId(3)));
        assert!(!one.contains("# Instrument catalog"));
        assert!(one.contains("## Criminal referral"));
        assert!(one.contains("Applies when: +repeat-offence +criminal"));
        assert!(one.contains("Criminal referral from the instrument catalog."));
    }

    #[test]
    fn test_unknown_instrument() {
        let options = ExportOptions {
            catalog: Some(fixture()),
            target: ExportTarget::Instrument(InstrumentId(42)),
            output: None,
            method: None,
            margin: None,
        };
        let err = generate_export(&options, &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown instrument: 42");
    }
}

// =============================================================================
// Configuration commands
// =============================================================================

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_init_then_method() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".advisor.config.json");

        let init = InitOptions {
            config_path: path.clone(),
            catalog: Some(fixture()),
            ..Default::default()
        };
        execute_init(init.clone()).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.scoring.method, ScoringMethod::Excluded);
        assert_eq!(config.scoring.margin, 1);
        assert_eq!(config.catalog, Some(fixture()));

        // Refuses to overwrite without force
        assert!(execute_init(init.clone()).is_err());
        execute_init(InitOptions { force: true, ..init }).unwrap();

        let method = MethodOptions {
            config_path: path.clone(),
            set: Some(ScoringMethod::WeighDown),
            margin: Some(0),
            list: false,
        };
        execute_method(method, Config::load(&path).unwrap()).unwrap();

        let scoring = Config::load(&path).unwrap().scoring().unwrap();
        assert_eq!(scoring.method, ScoringMethod::WeighDown);
        assert_eq!(scoring.margin, 0);
    }

    #[test]
    fn test_method_rejects_negative_margin() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".advisor.config.json");
        let method = MethodOptions {
            config_path: path.clone(),
            set: None,
            margin: Some(-3),
            list: false,
        };
        assert!(execute_method(method, Config::default()).is_err());
        assert!(!path.exists());
    }
}
