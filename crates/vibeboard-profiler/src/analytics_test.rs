use chrono::{TimeZone, Utc};
use vibeboard_core::{
    AnalyticsSummary, Demographics, GenderSplit, InfluencerProfile, PercentageMap, Post, Profile,
    Reel, Vibe,
};

use super::*;
use crate::generator::generate;
use crate::random::testing::LowestSource;
use crate::random::RngSource;

fn post(id: &str, likes: u64, comments: u64, tags: &[&str], quality_score: u8) -> Post {
    Post {
        id: id.to_string(),
        image_url: String::new(),
        caption: String::new(),
        likes,
        comments,
        timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        vibe: Vibe::Casual,
        quality_score,
    }
}

fn reel(id: &str, views: u64, likes: u64, comments: u64, vibe: Vibe) -> Reel {
    Reel {
        id: id.to_string(),
        thumbnail_url: String::new(),
        caption: String::new(),
        views,
        likes,
        comments,
        timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        tags: vec!["dance".to_string()],
        vibe,
    }
}

fn aggregate(posts: Vec<Post>, reels: Vec<Reel>) -> InfluencerProfile {
    InfluencerProfile {
        profile: Profile {
            name: "Test Creator".to_string(),
            username: "@test".to_string(),
            profile_picture: String::new(),
            followers: 100_000,
            following: 500,
            posts_count: 200,
            bio: String::new(),
            verified: false,
        },
        analytics: AnalyticsSummary {
            avg_likes: 10_000,
            avg_comments: 200,
            engagement_rate: 3.5,
            total_reach: 1_000_000,
            growth_rate: 10.0,
        },
        posts,
        reels,
        demographics: Demographics {
            gender_split: GenderSplit {
                male: 50,
                female: 50,
                other: 0,
            },
            age_groups: PercentageMap::new(),
            top_countries: PercentageMap::new(),
        },
        last_updated: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn empty_posts_is_invalid_input() {
    let profile = aggregate(vec![], vec![reel("r1", 1_000, 80, 20, Vibe::Casual)]);
    let err = compute_analytics_with(&profile, &mut LowestSource).unwrap_err();
    assert_eq!(
        err,
        ProfilerError::InvalidInput("profile has no posts".to_string())
    );
}

#[test]
fn empty_reels_is_invalid_input() {
    let profile = aggregate(vec![post("p1", 5_000, 200, &["food"], 80)], vec![]);
    let err = compute_analytics_with(&profile, &mut LowestSource).unwrap_err();
    assert!(matches!(err, ProfilerError::InvalidInput(_)));
}

#[test]
fn post_engagement_rate_matches_example() {
    let p = post("p1", 5_000, 200, &["fashion"], 80);
    assert_eq!(post_engagement_rate(&p, 100_000), 5.2);
}

#[test]
fn post_engagement_rate_with_zero_followers_is_zero() {
    let p = post("p1", 5_000, 200, &["fashion"], 80);
    assert_eq!(post_engagement_rate(&p, 0), 0.0);
}

#[test]
fn reel_engagement_rate_matches_example() {
    let r = reel("r1", 1_000, 80, 20, Vibe::Energetic);
    assert_eq!(reel_engagement_rate(&r), 10.0);
}

#[test]
fn reel_engagement_rate_with_zero_views_is_zero() {
    let r = reel("r1", 0, 80, 20, Vibe::Energetic);
    assert_eq!(reel_engagement_rate(&r), 0.0);
}

#[test]
fn viral_potential_requires_more_than_one_and_a_half_times_avg_likes() {
    // avg_likes = 10_000 → threshold is strictly above 15_000
    let profile = aggregate(
        vec![
            post("at", 15_000, 0, &["food"], 80),
            post("above", 15_001, 0, &["food"], 80),
        ],
        vec![reel("r1", 1_000, 80, 20, Vibe::Casual)],
    );
    let derived = compute_analytics_with(&profile, &mut LowestSource).unwrap();
    let perf = &derived.content_analysis.post_performance;
    assert_eq!(perf[0].viral_potential, ViralPotential::Normal);
    assert_eq!(perf[1].viral_potential, ViralPotential::High);
    assert_eq!(perf[1].optimal_posting_time, "6:00 PM");
    assert_eq!(perf[1].id, "above");
}

#[test]
fn content_categories_count_tracked_tags() {
    let profile = aggregate(
        vec![
            post("p1", 1, 1, &["fashion", "style"], 80),
            post("p2", 1, 1, &["fashion", "travel"], 80),
            post("p3", 1, 1, &["food"], 80),
            post("p4", 1, 1, &["beauty"], 80),
        ],
        vec![reel("r1", 1_000, 80, 20, Vibe::Casual)],
    );
    let derived = compute_analytics_with(&profile, &mut LowestSource).unwrap();
    let categories = derived.content_analysis.content_categories;
    assert_eq!(categories.fashion, 2);
    assert_eq!(categories.travel, 1);
    assert_eq!(categories.food, 1);
    assert_eq!(categories.lifestyle, 0);
}

#[test]
fn content_categories_agree_with_generated_posts() {
    let profile = generate("sofia", &mut RngSource::seeded(11)).unwrap();
    let derived = compute_analytics_with(&profile, &mut RngSource::seeded(12)).unwrap();
    let fashion = profile.posts.iter().filter(|p| p.has_tag("fashion")).count();
    assert_eq!(derived.content_analysis.content_categories.fashion, fashion);
    assert_eq!(fashion, 3);
}

#[test]
fn avg_quality_score_is_mean() {
    let profile = aggregate(
        vec![
            post("p1", 1, 1, &["food"], 70),
            post("p2", 1, 1, &["food"], 80),
            post("p3", 1, 1, &["food"], 96),
        ],
        vec![reel("r1", 1_000, 80, 20, Vibe::Casual)],
    );
    let derived = compute_analytics_with(&profile, &mut LowestSource).unwrap();
    assert!((derived.content_analysis.avg_quality_score - 82.0).abs() < 1e-9);
}

#[test]
fn reel_analysis_sums_views_and_groups_by_vibe() {
    let profile = aggregate(
        vec![post("p1", 1, 1, &["food"], 70)],
        vec![
            reel("r1", 1_000, 80, 20, Vibe::Casual),
            reel("r2", 2_000, 150, 50, Vibe::Casual),
            reel("r3", 500, 0, 0, Vibe::Luxury),
            reel("r4", 0, 10, 10, Vibe::Energetic),
        ],
    );
    let derived = compute_analytics_with(&profile, &mut LowestSource).unwrap();
    let reels = &derived.reel_analysis;
    assert_eq!(reels.total_views, 3_500);
    assert_eq!(reels.top_performing_vibe.get(&Vibe::Casual), Some(&3_000));
    assert_eq!(reels.top_performing_vibe.get(&Vibe::Luxury), Some(&500));
    assert_eq!(reels.top_performing_vibe.get(&Vibe::Energetic), Some(&0));
    assert_eq!(reels.top_performing_vibe.get(&Vibe::Aesthetic), None);
    // (10 + 10 + 0 + 0) / 4, the zero-view reel counts as 0
    assert!((reels.avg_engagement_rate - 5.0).abs() < 1e-9);
}

#[test]
fn engagement_by_hour_covers_the_day() {
    let profile = generate("sofia", &mut RngSource::seeded(2)).unwrap();
    let derived = compute_analytics_with(&profile, &mut RngSource::seeded(3)).unwrap();
    let hours = &derived.audience_insights.engagement_by_time_of_day;
    assert_eq!(hours.len(), 24);
    for (i, bucket) in hours.iter().enumerate() {
        assert_eq!(usize::from(bucket.hour), i);
        assert!((20..120).contains(&bucket.engagement));
    }
}

#[test]
fn content_preferences_rank_by_weighted_engagement() {
    let posts = vec![
        post("p1", 100, 0, &["a", "b"], 80),
        post("p2", 300, 0, &["c"], 80),
        post("p3", 50, 0, &["a", "d"], 80),
        post("p4", 10, 0, &["e", "f"], 80),
    ];
    let prefs = content_preferences(&posts);
    let tags: Vec<(&str, u64)> = prefs.iter().map(|p| (p.tag.as_str(), p.engagement)).collect();
    // a=150, b=100, c=300, d=50, e=10, f=10
    assert_eq!(
        tags,
        vec![("c", 300), ("a", 150), ("b", 100), ("d", 50), ("e", 10)]
    );
}

#[test]
fn content_preferences_ties_keep_first_seen_order() {
    let posts = vec![
        post("p1", 10, 0, &["zeta"], 80),
        post("p2", 10, 0, &["alpha"], 80),
        post("p3", 10, 0, &["mid"], 80),
    ];
    let prefs = content_preferences(&posts);
    let tags: Vec<&str> = prefs.iter().map(|p| p.tag.as_str()).collect();
    assert_eq!(tags, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn content_preferences_are_capped_and_sorted() {
    let profile = generate("sofia", &mut RngSource::seeded(21)).unwrap();
    let prefs = content_preferences(&profile.posts);
    assert!(prefs.len() <= 5);
    assert!(prefs.windows(2).all(|w| w[0].engagement >= w[1].engagement));
}

#[test]
fn growth_projection_compounds_monthly() {
    let summary = AnalyticsSummary {
        avg_likes: 0,
        avg_comments: 0,
        engagement_rate: 0.0,
        total_reach: 1_000_000,
        growth_rate: 10.0,
    };
    let projection = growth_projection(&summary);
    assert_eq!(projection.one_month, 1_100_000);
    // 1.1^n is inexact in binary; allow the floor to land one below
    assert!((1_330_999..=1_331_000).contains(&projection.three_month));
    assert!((1_771_560..=1_771_561).contains(&projection.six_month));
}

#[test]
fn growth_projection_with_zero_growth_is_flat() {
    let summary = AnalyticsSummary {
        avg_likes: 0,
        avg_comments: 0,
        engagement_rate: 0.0,
        total_reach: 42,
        growth_rate: 0.0,
    };
    let projection = growth_projection(&summary);
    assert_eq!(projection.one_month, 42);
    assert_eq!(projection.six_month, 42);
}

#[test]
fn input_is_not_mutated() {
    let profile = generate("sofia", &mut RngSource::seeded(8)).unwrap();
    let before = profile.clone();
    let _ = compute_analytics_with(&profile, &mut RngSource::seeded(9)).unwrap();
    assert_eq!(profile, before);
}

#[test]
fn compute_analytics_uses_entropy_source() {
    let profile = generate("sofia", &mut RngSource::seeded(8)).unwrap();
    let derived = compute_analytics(&profile).unwrap();
    assert_eq!(derived.content_analysis.post_performance.len(), 15);
}

#[test]
fn derived_view_serializes_with_source_keys() {
    let profile = generate("sofia", &mut RngSource::seeded(1)).unwrap();
    let derived = compute_analytics_with(&profile, &mut LowestSource).unwrap();
    let value = serde_json::to_value(&derived).unwrap();
    assert!(value["contentAnalysis"]["postPerformance"].is_array());
    assert!(value["reelAnalysis"]["topPerformingVibe"].is_object());
    assert!(value["audienceInsights"]["growthProjection"]["sixMonth"].is_u64());
    assert_eq!(
        value["audienceInsights"]["engagementByTimeOfDay"][0]["engagement"],
        20
    );
}
