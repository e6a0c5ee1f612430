//! Derived analytics records. Recomputed per request and never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::Vibe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViralPotential {
    High,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPerformance {
    pub id: String,
    /// `(likes + comments) / followers * 100`, two decimals.
    pub engagement_rate: f64,
    pub viral_potential: ViralPotential,
    pub optimal_posting_time: String,
}

/// Post counts per tracked tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCategories {
    pub fashion: usize,
    pub travel: usize,
    pub food: usize,
    pub lifestyle: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub post_performance: Vec<PostPerformance>,
    pub content_categories: ContentCategories,
    pub avg_quality_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelAnalysis {
    pub total_views: u64,
    pub avg_engagement_rate: f64,
    /// Summed views per vibe. Vibes with no reels are absent.
    pub top_performing_vibe: BTreeMap<Vibe, u64>,
}

/// Synthetic activity score for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEngagement {
    pub hour: u8,
    pub engagement: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPreference {
    pub tag: String,
    pub engagement: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub one_month: u64,
    pub three_month: u64,
    pub six_month: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceInsights {
    pub engagement_by_time_of_day: Vec<HourlyEngagement>,
    /// At most five entries, descending by engagement.
    pub content_preferences: Vec<ContentPreference>,
    pub growth_projection: GrowthProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAnalytics {
    pub content_analysis: ContentAnalysis,
    pub reel_analysis: ReelAnalysis,
    pub audience_insights: AudienceInsights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_performing_vibe_serializes_as_object() {
        let mut views = BTreeMap::new();
        views.insert(Vibe::Casual, 1_200);
        views.insert(Vibe::Aesthetic, 300);
        let analysis = ReelAnalysis {
            total_views: 1_500,
            avg_engagement_rate: 4.5,
            top_performing_vibe: views,
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["topPerformingVibe"]["casual"], 1_200);
        assert_eq!(value["topPerformingVibe"]["aesthetic"], 300);
        assert_eq!(value["totalViews"], 1_500);
    }

    #[test]
    fn viral_potential_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ViralPotential::High).unwrap(),
            "\"high\""
        );
    }

    #[test]
    fn growth_projection_field_names() {
        let projection = GrowthProjection {
            one_month: 1,
            three_month: 3,
            six_month: 6,
        };
        let value = serde_json::to_value(projection).unwrap();
        assert_eq!(value["oneMonth"], 1);
        assert_eq!(value["threeMonth"], 3);
        assert_eq!(value["sixMonth"], 6);
    }
}
