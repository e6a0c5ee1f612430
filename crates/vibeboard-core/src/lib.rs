pub mod analytics;
pub mod app_config;
pub mod config;
pub mod profile;

use thiserror::Error;

pub use analytics::{
    AudienceInsights, ContentAnalysis, ContentCategories, ContentPreference, DerivedAnalytics,
    GrowthProjection, HourlyEngagement, PostPerformance, ReelAnalysis, ViralPotential,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{
    AnalyticsSummary, Demographics, GenderSplit, InfluencerProfile, PercentageMap, Post, Profile,
    Reel, Vibe,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Reject handles that are empty or whitespace-only. The handle is otherwise
/// used verbatim.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] for a blank handle.
pub fn validate_handle(handle: &str) -> Result<&str, CoreError> {
    if handle.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "handle must not be empty".to_string(),
        ));
    }
    Ok(handle)
}
