//! Print the demo dataset.

use tracing::info;

use super::{build_state, emit};

/// Build a store holding only the demo dataset and print it as JSON.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or seeding fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(false)?;
    if !state.config().seed_demo_data {
        info!("HARDSTOP_SEED_DEMO_DATA is off; printing an empty store");
    }

    emit(&state.snapshot().await)
}
