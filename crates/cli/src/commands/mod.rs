//! CLI command implementations.

pub mod audit;
pub mod replay;
pub mod seed;

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use hardstop_shop::{AppState, ShopConfig};

use crate::script::{self, Step};

/// Build the application state from the environment.
///
/// `empty` overrides `HARDSTOP_SEED_DEMO_DATA` and starts from an empty store.
pub(crate) fn build_state(empty: bool) -> Result<AppState, Box<dyn std::error::Error>> {
    let mut config = ShopConfig::from_env()?;
    if empty {
        config.seed_demo_data = false;
    }
    Ok(AppState::new(config)?)
}

/// Read and parse a replay script.
pub(crate) async fn load_script(path: &Path) -> Result<Vec<Step>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let steps = script::parse(&content)?;
    info!(path = %path.display(), steps = steps.len(), "Loaded script");
    Ok(steps)
}

/// Write `value` to stdout as pretty JSON.
pub(crate) fn emit<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
