//! Sample influencer data generation and derived analytics.
//!
//! [`generate`] builds a fixed-shape [`InfluencerProfile`] aggregate from an
//! injectable [`RandomSource`]; [`compute_analytics`] derives secondary
//! metrics from an aggregate without mutating it.
//!
//! [`InfluencerProfile`]: vibeboard_core::InfluencerProfile

pub mod analytics;
pub mod archetype;
pub mod error;
pub mod generator;
pub mod presentation;
pub mod random;
pub mod scrape;

mod numeric;

pub use analytics::{
    compute_analytics, compute_analytics_with, content_preferences, growth_projection,
    post_engagement_rate, reel_engagement_rate,
};
pub use archetype::{archetype_for, Archetype, POST_ARCHETYPES, REEL_ARCHETYPES};
pub use error::ProfilerError;
pub use generator::{generate, generate_at, sample_demographics, POST_COUNT, REEL_COUNT};
pub use presentation::{
    filter_posts, filter_reels, format_count, initials, reel_totals, unique_tags, unique_vibes,
    ContentFilter, QualityBadge, ReelTotals,
};
pub use random::{RandomSource, RngSource};
pub use scrape::{analyze_content, simulate_scrape, ContentAnalysisReport, ContentInsights};
