//! Derived analytics over a populated influencer aggregate.
//!
//! The calculator never mutates its input. Averages over empty collections
//! evaluate to `0.0`; the only failure is an aggregate with no posts or reels.

use std::collections::{BTreeMap, HashMap};

use vibeboard_core::{
    AnalyticsSummary, AudienceInsights, ContentAnalysis, ContentCategories, ContentPreference,
    DerivedAnalytics, GrowthProjection, HourlyEngagement, InfluencerProfile, Post,
    PostPerformance, Reel, ReelAnalysis, Vibe, ViralPotential,
};

use crate::numeric::{mean, percentage, round_to};
use crate::random::{RandomSource, RngSource};
use crate::ProfilerError;

pub const OPTIMAL_POSTING_TIME: &str = "6:00 PM";
pub const CONTENT_PREFERENCE_LIMIT: usize = 5;

const VIRAL_LIKES_MULTIPLIER: f64 = 1.5;
const HOURLY_ENGAGEMENT: (u64, u64) = (20, 120);

/// Compute the derived analytics view, drawing the synthetic hourly buckets
/// from an OS-seeded source.
///
/// # Errors
///
/// Returns [`ProfilerError::InvalidInput`] if the aggregate has no posts or no reels.
pub fn compute_analytics(profile: &InfluencerProfile) -> Result<DerivedAnalytics, ProfilerError> {
    compute_analytics_with(profile, &mut RngSource::from_entropy())
}

/// Compute the derived analytics view with an explicit random source.
///
/// # Errors
///
/// Returns [`ProfilerError::InvalidInput`] if the aggregate has no posts or no reels.
pub fn compute_analytics_with<R>(
    profile: &InfluencerProfile,
    rng: &mut R,
) -> Result<DerivedAnalytics, ProfilerError>
where
    R: RandomSource + ?Sized,
{
    if profile.posts.is_empty() {
        return Err(ProfilerError::InvalidInput(
            "profile has no posts".to_string(),
        ));
    }
    if profile.reels.is_empty() {
        return Err(ProfilerError::InvalidInput(
            "profile has no reels".to_string(),
        ));
    }

    let followers = profile.profile.followers;
    let avg_likes = profile.analytics.avg_likes;

    Ok(DerivedAnalytics {
        content_analysis: ContentAnalysis {
            post_performance: profile
                .posts
                .iter()
                .map(|post| post_performance(post, followers, avg_likes))
                .collect(),
            content_categories: content_categories(&profile.posts),
            avg_quality_score: mean(profile.posts.iter().map(|p| f64::from(p.quality_score))),
        },
        reel_analysis: reel_analysis(&profile.reels),
        audience_insights: AudienceInsights {
            engagement_by_time_of_day: engagement_by_hour(rng),
            content_preferences: content_preferences(&profile.posts),
            growth_projection: growth_projection(&profile.analytics),
        },
    })
}

/// `(likes + comments) / followers * 100`, two decimals; `0.0` with no followers.
#[must_use]
pub fn post_engagement_rate(post: &Post, followers: u64) -> f64 {
    round_to(percentage(post.interactions(), followers), 2)
}

/// `(likes + comments) / views * 100`, unrounded; `0.0` with no views.
#[must_use]
pub fn reel_engagement_rate(reel: &Reel) -> f64 {
    percentage(reel.interactions(), reel.views)
}

#[allow(clippy::cast_precision_loss)]
fn post_performance(post: &Post, followers: u64, avg_likes: u64) -> PostPerformance {
    let viral_potential = if post.likes as f64 > avg_likes as f64 * VIRAL_LIKES_MULTIPLIER {
        ViralPotential::High
    } else {
        ViralPotential::Normal
    };

    PostPerformance {
        id: post.id.clone(),
        engagement_rate: post_engagement_rate(post, followers),
        viral_potential,
        optimal_posting_time: OPTIMAL_POSTING_TIME.to_string(),
    }
}

fn content_categories(posts: &[Post]) -> ContentCategories {
    let count = |tag: &str| posts.iter().filter(|p| p.has_tag(tag)).count();
    ContentCategories {
        fashion: count("fashion"),
        travel: count("travel"),
        food: count("food"),
        lifestyle: count("lifestyle"),
    }
}

fn reel_analysis(reels: &[Reel]) -> ReelAnalysis {
    let mut views_by_vibe: BTreeMap<Vibe, u64> = BTreeMap::new();
    for reel in reels {
        *views_by_vibe.entry(reel.vibe).or_insert(0) += reel.views;
    }

    ReelAnalysis {
        total_views: reels.iter().map(|r| r.views).sum(),
        avg_engagement_rate: mean(reels.iter().map(reel_engagement_rate)),
        top_performing_vibe: views_by_vibe,
    }
}

/// 24 synthetic activity scores, one per hour. Not derived from the aggregate.
fn engagement_by_hour<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<HourlyEngagement> {
    (0..24_u8)
        .map(|hour| HourlyEngagement {
            hour,
            engagement: u32::try_from(rng.int_in(HOURLY_ENGAGEMENT.0, HOURLY_ENGAGEMENT.1))
                .unwrap_or(u32::MAX),
        })
        .collect()
}

/// Top tags by summed `likes + comments` of the posts carrying them.
///
/// Sorted descending; ties keep the order in which tags were first seen.
#[must_use]
pub fn content_preferences(posts: &[Post]) -> Vec<ContentPreference> {
    let mut totals: Vec<ContentPreference> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for post in posts {
        for tag in &post.tags {
            let slot = *slots.entry(tag.as_str()).or_insert_with(|| {
                totals.push(ContentPreference {
                    tag: tag.clone(),
                    engagement: 0,
                });
                totals.len() - 1
            });
            totals[slot].engagement += post.interactions();
        }
    }

    // stable sort keeps first-seen order among equal totals
    totals.sort_by(|a, b| b.engagement.cmp(&a.engagement));
    totals.truncate(CONTENT_PREFERENCE_LIMIT);
    totals
}

/// Compound `total_reach` by `growth_rate` percent per month, floored.
#[must_use]
pub fn growth_projection(summary: &AnalyticsSummary) -> GrowthProjection {
    let monthly = 1.0 + summary.growth_rate / 100.0;
    let project = |months: i32| floor_to_u64(reach_as_f64(summary.total_reach) * monthly.powi(months));
    GrowthProjection {
        one_month: project(1),
        three_month: project(3),
        six_month: project(6),
    }
}

#[allow(clippy::cast_precision_loss)]
fn reach_as_f64(reach: u64) -> f64 {
    reach as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.floor() as u64
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
