#![forbid(unsafe_code)]
//! Advisor Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use advisor::commands::{
    execute_answer, execute_case, execute_export, execute_init, execute_method, execute_rank,
    execute_tags, execute_validate, AnswerOptions, CaseOptions, ExportOptions, ExportTarget,
    InitOptions, MethodOptions, RankOptions, TagsOptions, ValidateOptions,
};
use advisor::config::CONFIG_FILE;
use advisor::{
    CaseUpdate, Config, InstrumentId, OptionId, OutputFormat, QuestionId, ScoringMethod, Tier,
};

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Rank an intervention catalog by the answers of a work session")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file with default scoring settings
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Default catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Scoring method (difference, excluded, weigh-down)
        #[arg(long)]
        method: Option<ScoringMethod>,

        /// Tier margin
        #[arg(long, allow_negative_numbers = true)]
        margin: Option<i64>,
    },

    /// Rank the catalog for a session
    Rank {
        /// Session file
        #[arg(short, long)]
        session: PathBuf,

        /// Catalog file (JSON or YAML)
        #[arg(long, env = "ADVISOR_CATALOG")]
        catalog: Option<PathBuf>,

        /// Scoring method for this run
        #[arg(long)]
        method: Option<ScoringMethod>,

        /// Tier margin for this run
        #[arg(long, allow_negative_numbers = true)]
        margin: Option<i64>,

        /// Output format (text, markdown, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Only show one tier (high, mid, low)
        #[arg(long)]
        tier: Option<Tier>,
    },

    /// Show the tags a session brings into scope
    Tags {
        /// Session file
        #[arg(short, long)]
        session: PathBuf,

        /// Catalog file (JSON or YAML)
        #[arg(long, env = "ADVISOR_CATALOG")]
        catalog: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record answers in a session file
    Answer {
        /// Session file (created when missing)
        #[arg(short, long)]
        session: PathBuf,

        /// Catalog file (JSON or YAML)
        #[arg(long, env = "ADVISOR_CATALOG")]
        catalog: Option<PathBuf>,

        /// Name for a new session
        #[arg(long)]
        name: Option<String>,

        /// Question id to answer
        #[arg(short, long)]
        question: Option<u32>,

        /// Option ids to select (repeatable)
        #[arg(short, long = "option")]
        options: Vec<u32>,

        /// Motivation for the answer
        #[arg(short, long)]
        motivation: Option<String>,

        /// Option ids to deselect (repeatable)
        #[arg(long)]
        remove: Vec<u32>,

        /// Walk through the whole questionnaire
        #[arg(short, long)]
        interactive: bool,
    },

    /// Show or edit the case information of a session
    Case {
        /// Session file (created when missing)
        #[arg(short, long)]
        session: PathBuf,

        /// Session name
        #[arg(long)]
        name: Option<String>,

        /// Participants (empty clears)
        #[arg(long)]
        authors: Option<String>,

        /// Date of the work session, YYYY-MM-DD (empty clears)
        #[arg(long)]
        date: Option<String>,

        /// Intended effect of the intervention (empty clears)
        #[arg(long = "problem-statement")]
        problem_statement: Option<String>,

        /// Final considerations and chosen approach (empty clears)
        #[arg(long)]
        conclusion: Option<String>,

        /// Show ranked instruments for this session
        #[arg(long, conflicts_with = "hide_instruments")]
        show_instruments: bool,

        /// Hide ranked instruments for this session
        #[arg(long)]
        hide_instruments: bool,
    },

    /// Show or change the scoring method
    Method {
        /// New method (difference, excluded, weigh-down or 0, 1, 2)
        method: Option<ScoringMethod>,

        /// New tier margin
        #[arg(long, allow_negative_numbers = true)]
        margin: Option<i64>,

        /// List available methods
        #[arg(long)]
        list: bool,
    },

    /// Export a session report or the catalog as markdown
    Export {
        /// Session file to report on
        #[arg(long, conflicts_with_all = ["all", "instrument"])]
        session: Option<PathBuf>,

        /// Export the whole catalog
        #[arg(long, conflicts_with = "instrument")]
        all: bool,

        /// Export one instrument
        #[arg(long)]
        instrument: Option<u32>,

        /// Catalog file (JSON or YAML)
        #[arg(long, env = "ADVISOR_CATALOG")]
        catalog: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scoring method for this run
        #[arg(long)]
        method: Option<ScoringMethod>,

        /// Tier margin for this run
        #[arg(long, allow_negative_numbers = true)]
        margin: Option<i64>,
    },

    /// Check a catalog for integrity problems
    Validate {
        /// Catalog file (JSON or YAML)
        #[arg(long, env = "ADVISOR_CATALOG")]
        catalog: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "advisor=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Init { force, catalog, method, margin } => {
            let options = InitOptions {
                config_path: cli.config,
                force,
                catalog,
                method,
                margin,
            };
            execute_init(options)?;
        }

        Commands::Rank { session, catalog, method, margin, format, tier } => {
            let options = RankOptions {
                catalog,
                session,
                method,
                margin,
                format,
                tier,
            };
            execute_rank(options, &config)?;
        }

        Commands::Tags { session, catalog, json } => {
            let options = TagsOptions { catalog, session, json };
            execute_tags(options, &config)?;
        }

        Commands::Answer {
            session,
            catalog,
            name,
            question,
            options,
            motivation,
            remove,
            interactive,
        } => {
            let options = AnswerOptions {
                catalog,
                session,
                name,
                question: question.map(QuestionId),
                options: options.into_iter().map(OptionId).collect(),
                motivation,
                remove: remove.into_iter().map(OptionId).collect(),
                interactive,
            };
            execute_answer(options, &config)?;
        }

        Commands::Case {
            session,
            name,
            authors,
            date,
            problem_statement,
            conclusion,
            show_instruments,
            hide_instruments,
        } => {
            let show_instruments = match (show_instruments, hide_instruments) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = CaseOptions {
                session,
                update: CaseUpdate {
                    name,
                    authors,
                    date,
                    problem_statement,
                    conclusion,
                    show_instruments,
                },
            };
            execute_case(options)?;
        }

        Commands::Method { method, margin, list } => {
            let options = MethodOptions {
                config_path: cli.config,
                set: method,
                margin,
                list,
            };
            execute_method(options, config)?;
        }

        Commands::Export {
            session,
            all,
            instrument,
            catalog,
            output,
            method,
            margin,
        } => {
            let target = match (session, instrument) {
                (Some(path), _) => ExportTarget::Session(path),
                (None, Some(id)) => ExportTarget::Instrument(InstrumentId(id)),
                (None, None) if all => ExportTarget::Catalog,
                (None, None) => {
                    anyhow::bail!("Nothing to export: pass --session, --all or --instrument")
                }
            };
            let options = ExportOptions {
                catalog,
                target,
                output,
                method,
                margin,
            };
            execute_export(options, &config)?;
        }

        Commands::Validate { catalog, json } => {
            let options = ValidateOptions { catalog, json };
            execute_validate(options, &config)?;
        }
    }

    Ok(())
}
