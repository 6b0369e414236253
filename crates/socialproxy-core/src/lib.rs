//! Shared types and configuration for the socialproxy workspace.

mod app_config;
mod config;
pub mod engagement;
pub mod profiles;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use engagement::{EngagementTally, EngagementTotals};
pub use profiles::{to_epoch_millis, DateRange, Profile, ProfileQuery};

/// Socialinsider project label attached to every RPC request.
pub const PROJECT_NAME: &str = "API_test";

/// Timezone label sent alongside every date window.
pub const TIMEZONE: &str = "Europe/London";

/// Page size requested from the upstream for every profile.
pub const PAGE_SIZE: u32 = 10;

/// Maximum number of posts returned by the posts aggregator, across all profiles.
pub const MAX_COLLECTED_POSTS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
