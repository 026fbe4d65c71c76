//! @acp:module "Case Command"
//! @acp:summary "Edit a session's case information and instrument visibility"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use super::open_session;
use crate::session::{CaseUpdate, Session};

/// Options for the case command
#[derive(Debug, Clone, Default)]
pub struct CaseOptions {
    /// Session file; created when missing
    pub session: PathBuf,
    pub update: CaseUpdate,
}

/// Execute the case command
pub fn execute_case(options: CaseOptions) -> Result<()> {
    if options.update.is_empty() {
        let session = open_session(&options.session)?;
        print_case(&session);
        return Ok(());
    }

    let session = update_case_file(&options)?;
    println!(
        "{} Updated case information of '{}' in {}",
        style("✓").green(),
        session.name,
        options.session.display()
    );
    Ok(())
}

/// Load (or start) the session, apply the edits and save it
pub fn update_case_file(options: &CaseOptions) -> Result<Session> {
    let mut session = if options.session.exists() {
        open_session(&options.session)?
    } else {
        let stem = options
            .session
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "session".to_string());
        Session::new(stem)
    };

    session.update_case(&options.update)?;
    session.save(&options.session)?;
    Ok(session)
}

fn print_case(session: &Session) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("{}", style(&session.name).bold());
    println!("  Participants:      {}", field(&session.authors));
    println!("  Date:              {}", field(&session.date));
    println!("  Intended effect:   {}", field(&session.problem_statement));
    println!("  Conclusion:        {}", field(&session.conclusion));
    println!(
        "  Instruments:       {}",
        if session.show_instruments { "shown" } else { "hidden" }
    );
}
