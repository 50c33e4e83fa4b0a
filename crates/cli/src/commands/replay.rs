//! Replay a script and print the resulting store.

use std::path::Path;

use tracing::info;

use crate::script::Replay;

use super::{build_state, emit, load_script};

/// Replay the script at `path` and print the final store as JSON.
///
/// # Arguments
///
/// * `path` - YAML script to replay
/// * `empty` - Start from an empty store instead of the demo dataset
/// * `keep_going` - Skip rejected steps instead of stopping
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, or if a step is
/// rejected and `keep_going` is off.
pub async fn run(
    path: &Path,
    empty: bool,
    keep_going: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let steps = load_script(path).await?;
    let state = build_state(empty)?;

    let summary = Replay::new(&state).run(&steps, keep_going).await?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "Script replayed"
    );

    emit(&state.snapshot().await)
}
