//! Sample influencer aggregate generation.
//!
//! Shape is fixed (15 posts, 10 reels, archetypes cycled in table order);
//! values come from the supplied [`RandomSource`], so a seeded source yields
//! identical aggregates for the same handle and instant.

use chrono::{DateTime, Duration, Utc};
use vibeboard_core::{
    validate_handle, AnalyticsSummary, Demographics, GenderSplit, InfluencerProfile,
    PercentageMap, Post, Profile, Reel,
};

use crate::archetype::{archetype_for, Archetype, POST_ARCHETYPES, REEL_ARCHETYPES};
use crate::numeric::round_to;
use crate::random::RandomSource;
use crate::ProfilerError;

pub const POST_COUNT: usize = 15;
pub const REEL_COUNT: usize = 10;

const DISPLAY_NAME: &str = "Sofia Martinez";
const PROFILE_PICTURE: &str =
    "https://images.unsplash.com/photo-1634942537034-2531766767d1?w=400";
const BIO: &str =
    "✨ Lifestyle & Fashion Creator ✨\n🌍 Based in Miami, FL\n📩 Collabs: sofia@email.com";

// Half-open `[low, high)` ranges for every random field.
const FOLLOWERS: (u64, u64) = (100_000, 600_000);
const FOLLOWING: (u64, u64) = (500, 2_500);
const POSTS_COUNT: (u64, u64) = (200, 1_200);
const AVG_LIKES: (u64, u64) = (5_000, 25_000);
const AVG_COMMENTS: (u64, u64) = (100, 600);
const ENGAGEMENT_RATE: (f64, f64) = (1.0, 6.0);
const TOTAL_REACH: (u64, u64) = (500_000, 2_500_000);
const GROWTH_RATE: (f64, f64) = (5.0, 25.0);

const POST_LIKES: (u64, u64) = (8_000, 33_000);
const POST_COMMENTS: (u64, u64) = (100, 600);
const QUALITY_SCORE: (u64, u64) = (70, 100);

const REEL_VIEWS: (u64, u64) = (50_000, 550_000);
const REEL_LIKES: (u64, u64) = (3_000, 18_000);
const REEL_COMMENTS: (u64, u64) = (50, 350);

const PHOTO_NUMBER: (u64, u64) = (500_000_000, 1_100_000_000);

/// Generate a sample aggregate for `handle`, timestamped now.
///
/// # Errors
///
/// Returns [`ProfilerError::InvalidInput`] if `handle` is empty or blank.
pub fn generate<R>(handle: &str, rng: &mut R) -> Result<InfluencerProfile, ProfilerError>
where
    R: RandomSource + ?Sized,
{
    generate_at(handle, Utc::now(), rng)
}

/// Generate a sample aggregate for `handle` as of `now`.
///
/// Item `i` of posts and reels is stamped `now - i days`.
///
/// # Errors
///
/// Returns [`ProfilerError::InvalidInput`] if `handle` is empty or blank.
pub fn generate_at<R>(
    handle: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<InfluencerProfile, ProfilerError>
where
    R: RandomSource + ?Sized,
{
    let handle = validate_handle(handle)?;

    let profile = generate_profile(handle, rng);
    let analytics = generate_summary(rng);
    let posts = (0..POST_COUNT)
        .map(|i| generate_post(i, archetype_for(&POST_ARCHETYPES, i), now, rng))
        .collect();
    let reels = (0..REEL_COUNT)
        .map(|i| generate_reel(i, archetype_for(&REEL_ARCHETYPES, i), now, rng))
        .collect();

    tracing::debug!(handle, "generated sample influencer aggregate");

    Ok(InfluencerProfile {
        profile,
        analytics,
        posts,
        reels,
        demographics: sample_demographics(),
        last_updated: now,
    })
}

fn draw<R: RandomSource + ?Sized>(rng: &mut R, (low, high): (u64, u64)) -> u64 {
    rng.int_in(low, high)
}

fn generate_profile<R: RandomSource + ?Sized>(handle: &str, rng: &mut R) -> Profile {
    Profile {
        name: DISPLAY_NAME.to_string(),
        username: format!("@{handle}"),
        profile_picture: PROFILE_PICTURE.to_string(),
        followers: draw(rng, FOLLOWERS),
        following: draw(rng, FOLLOWING),
        posts_count: draw(rng, POSTS_COUNT),
        bio: BIO.to_string(),
        verified: rng.coin_flip(),
    }
}

fn generate_summary<R: RandomSource + ?Sized>(rng: &mut R) -> AnalyticsSummary {
    AnalyticsSummary {
        avg_likes: draw(rng, AVG_LIKES),
        avg_comments: draw(rng, AVG_COMMENTS),
        engagement_rate: round_to(rng.float_in(ENGAGEMENT_RATE.0, ENGAGEMENT_RATE.1), 2),
        total_reach: draw(rng, TOTAL_REACH),
        growth_rate: round_to(rng.float_in(GROWTH_RATE.0, GROWTH_RATE.1), 1),
    }
}

fn days_before(now: DateTime<Utc>, index: usize) -> DateTime<Utc> {
    let days = i64::try_from(index).unwrap_or(i64::MAX / 86_400);
    now - Duration::days(days)
}

fn generate_post<R: RandomSource + ?Sized>(
    index: usize,
    archetype: &Archetype,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Post {
    let photo = draw(rng, PHOTO_NUMBER);
    Post {
        id: format!("post_{}", index + 1),
        image_url: format!(
            "https://images.unsplash.com/photo-1{photo}?w=400&h=400&fit=crop"
        ),
        caption: format!("Amazing {} moment! {} ✨", archetype.kind, archetype.hashtags()),
        likes: draw(rng, POST_LIKES),
        comments: draw(rng, POST_COMMENTS),
        timestamp: days_before(now, index),
        tags: archetype.owned_tags(),
        vibe: archetype.vibe,
        quality_score: u8::try_from(draw(rng, QUALITY_SCORE)).unwrap_or(u8::MAX),
    }
}

fn generate_reel<R: RandomSource + ?Sized>(
    index: usize,
    archetype: &Archetype,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Reel {
    let photo = draw(rng, PHOTO_NUMBER);
    Reel {
        id: format!("reel_{}", index + 1),
        thumbnail_url: format!(
            "https://images.unsplash.com/photo-1{photo}?w=300&h=500&fit=crop"
        ),
        caption: format!("{} vibes! {} 🔥", archetype.kind, archetype.hashtags()),
        views: draw(rng, REEL_VIEWS),
        likes: draw(rng, REEL_LIKES),
        comments: draw(rng, REEL_COMMENTS),
        timestamp: days_before(now, index),
        tags: archetype.owned_tags(),
        vibe: archetype.vibe,
    }
}

/// Fixed audience breakdown. Percentages are reproduced as-is and are not
/// normalized to sum to 100.
#[must_use]
pub fn sample_demographics() -> Demographics {
    Demographics {
        gender_split: GenderSplit {
            male: 25,
            female: 72,
            other: 3,
        },
        age_groups: [
            ("13-17", 8),
            ("18-24", 32),
            ("25-34", 35),
            ("35-44", 18),
            ("45-54", 5),
            ("55+", 2),
        ]
        .into_iter()
        .collect::<PercentageMap>(),
        top_countries: [
            ("United States", 45),
            ("Brazil", 12),
            ("Mexico", 8),
            ("Canada", 7),
            ("United Kingdom", 6),
            ("Australia", 4),
            ("Spain", 3),
            ("Others", 15),
        ]
        .into_iter()
        .collect::<PercentageMap>(),
    }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
