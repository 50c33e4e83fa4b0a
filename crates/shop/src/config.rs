//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HARDSTOP_SEED_DEMO_DATA` - Load the demo dataset at startup (default: true)
//! - `HARDSTOP_ORDER_HISTORY` - What deleting an order does to the owning
//!   user's order list: `retain` or `prune` (default: retain)

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// What happens to `User::orders` when one of the user's orders is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderHistoryPolicy {
    /// Leave the deleted order's ID in the user's list.
    #[default]
    Retain,
    /// Remove the deleted order's ID from the user's list.
    Prune,
}

impl std::str::FromStr for OrderHistoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "prune" => Ok(Self::Prune),
            other => Err(format!("expected 'retain' or 'prune', got '{other}'")),
        }
    }
}

impl std::fmt::Display for OrderHistoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::Prune => write!(f, "prune"),
        }
    }
}

/// Shop application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Seed the demo dataset when the application state is built.
    pub seed_demo_data: bool,
    /// Order deletion behaviour for the owning user's order list.
    pub order_history: OrderHistoryPolicy,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            order_history: OrderHistoryPolicy::Retain,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let seed_demo_data = match get_optional_env("HARDSTOP_SEED_DEMO_DATA") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "HARDSTOP_SEED_DEMO_DATA".to_string(),
                    format!("expected a boolean, got '{value}'"),
                )
            })?,
            None => true,
        };

        let order_history = get_env_or_default("HARDSTOP_ORDER_HISTORY", "retain")
            .parse::<OrderHistoryPolicy>()
            .map_err(|e| ConfigError::InvalidEnvVar("HARDSTOP_ORDER_HISTORY".to_string(), e))?;

        Ok(Self {
            seed_demo_data,
            order_history,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the usual spellings of a boolean flag.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
