//! Simulated collection: a "scrape" that regenerates the aggregate after a
//! delay, and a mock content-analysis pass over a list of media URLs.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vibeboard_core::InfluencerProfile;

use crate::generator::generate;
use crate::random::RandomSource;
use crate::ProfilerError;

pub const DOMINANT_COLORS: [&str; 3] = ["#FF6B6B", "#4ECDC4", "#45B7D1"];
pub const EMOTIONAL_TONES: [&str; 3] = ["positive", "energetic", "aspirational"];
pub const RECOMMENDATIONS: [&str; 4] = [
    "Increase posting consistency for better engagement",
    "Use more lifestyle content to boost audience connection",
    "Optimize posting times based on audience activity",
    "Incorporate trending hashtags for better discoverability",
];

const AVERAGE_QUALITY: (u64, u64) = (70, 100);
const BRAND_CONSISTENCY: (u64, u64) = (60, 100);

/// Regenerate the aggregate for `handle` as if it had been freshly scraped.
///
/// # Errors
///
/// Returns [`ProfilerError::InvalidInput`] if `handle` is empty or blank.
pub async fn simulate_scrape<R>(
    handle: &str,
    delay: Duration,
    rng: &mut R,
) -> Result<InfluencerProfile, ProfilerError>
where
    R: RandomSource + Send + ?Sized,
{
    vibeboard_core::validate_handle(handle)?;
    tracing::info!(handle, ?delay, "simulating profile scrape");
    tokio::time::sleep(delay).await;
    generate(handle, rng)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInsights {
    pub average_quality: u32,
    pub dominant_colors: Vec<String>,
    pub emotional_tone: String,
    pub brand_consistency: u32,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysisReport {
    pub analysis_complete: bool,
    pub processed_items: usize,
    pub insights: ContentInsights,
    pub timestamp: DateTime<Utc>,
}

/// Produce a mock analysis of `content_urls` after `delay`.
pub async fn analyze_content<R>(
    content_urls: &[String],
    delay: Duration,
    rng: &mut R,
) -> ContentAnalysisReport
where
    R: RandomSource + Send + ?Sized,
{
    tracing::info!(items = content_urls.len(), "analyzing content");
    tokio::time::sleep(delay).await;
    build_report(content_urls.len(), Utc::now(), rng)
}

fn build_report<R: RandomSource + ?Sized>(
    processed_items: usize,
    timestamp: DateTime<Utc>,
    rng: &mut R,
) -> ContentAnalysisReport {
    let average_quality = rng.int_in(AVERAGE_QUALITY.0, AVERAGE_QUALITY.1);
    let tone = EMOTIONAL_TONES[rng.pick(EMOTIONAL_TONES.len())];
    let brand_consistency = rng.int_in(BRAND_CONSISTENCY.0, BRAND_CONSISTENCY.1);

    ContentAnalysisReport {
        analysis_complete: true,
        processed_items,
        insights: ContentInsights {
            average_quality: u32::try_from(average_quality).unwrap_or(u32::MAX),
            dominant_colors: DOMINANT_COLORS.iter().map(|c| (*c).to_string()).collect(),
            emotional_tone: tone.to_string(),
            brand_consistency: u32::try_from(brand_consistency).unwrap_or(u32::MAX),
            recommendations: RECOMMENDATIONS.iter().map(|r| (*r).to_string()).collect(),
        },
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::{HighestSource, LowestSource};
    use crate::random::RngSource;

    #[tokio::test]
    async fn simulate_scrape_returns_fresh_aggregate() {
        let mut rng = RngSource::seeded(5);
        let aggregate = simulate_scrape("sofia", Duration::ZERO, &mut rng)
            .await
            .expect("scrape");
        assert_eq!(aggregate.profile.username, "@sofia");
        assert_eq!(aggregate.posts.len(), 15);
    }

    #[tokio::test]
    async fn simulate_scrape_rejects_blank_handle() {
        let mut rng = RngSource::seeded(5);
        let err = simulate_scrape(" ", Duration::ZERO, &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, ProfilerError::InvalidInput(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn simulate_scrape_waits_for_delay() {
        let mut rng = RngSource::seeded(5);
        let started = tokio::time::Instant::now();
        simulate_scrape("sofia", Duration::from_secs(2), &mut rng)
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn analyze_content_counts_items() {
        let urls = vec![
            "https://example.com/1.jpg".to_string(),
            "https://example.com/2.jpg".to_string(),
        ];
        let report = analyze_content(&urls, Duration::ZERO, &mut RngSource::seeded(1)).await;
        assert!(report.analysis_complete);
        assert_eq!(report.processed_items, 2);
        assert_eq!(report.insights.recommendations.len(), 4);
        assert_eq!(report.insights.dominant_colors, DOMINANT_COLORS);
        assert!(EMOTIONAL_TONES.contains(&report.insights.emotional_tone.as_str()));
    }

    #[test]
    fn report_scores_stay_in_range() {
        let low = build_report(0, Utc::now(), &mut LowestSource);
        assert_eq!(low.insights.average_quality, 70);
        assert_eq!(low.insights.brand_consistency, 60);
        assert_eq!(low.insights.emotional_tone, "positive");

        let high = build_report(0, Utc::now(), &mut HighestSource);
        assert_eq!(high.insights.average_quality, 99);
        assert_eq!(high.insights.brand_consistency, 99);
        assert_eq!(high.insights.emotional_tone, "aspirational");
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = build_report(3, Utc::now(), &mut LowestSource);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["analysisComplete"], true);
        assert_eq!(value["processedItems"], 3);
        assert!(value["insights"]["dominantColors"].is_array());
    }
}
