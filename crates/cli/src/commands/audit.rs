//! Audit the store for referential integrity.

use std::path::Path;

use tracing::{error, info};

use crate::script::Replay;

use super::{build_state, emit, load_script};

/// Optionally replay a script, then audit the store and print the report.
///
/// # Errors
///
/// Returns an error if the script fails, or if the audit finds a broken
/// order aggregate. Dangling references alone do not fail the audit.
pub async fn run(
    path: Option<&Path>,
    empty: bool,
    keep_going: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(empty)?;
    if let Some(path) = path {
        let steps = load_script(path).await?;
        Replay::new(&state).run(&steps, keep_going).await?;
    }

    let report = state.audit().await;
    emit(&report)?;

    if report.is_consistent() {
        info!(findings = report.findings.len(), "Store is consistent");
        Ok(())
    } else {
        let broken = report.corruption().count();
        error!(broken, "Store has broken order aggregates");
        Err(format!("{broken} integrity violations found").into())
    }
}
