//! Dashboard data shaping: compact counts, quality badges, content filters.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};
use vibeboard_core::{Post, Reel, Vibe};

use crate::analytics::reel_engagement_rate;
use crate::numeric::mean;

/// Render a count the way the dashboard shows it: `1.2M`, `45.3K`, `999`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBadge {
    Excellent,
    Good,
    Average,
    NeedsWork,
}

impl QualityBadge {
    #[must_use]
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            80..=89 => Self::Good,
            70..=79 => Self::Average,
            _ => Self::NeedsWork,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsWork => "Needs Work",
        }
    }
}

/// Serialized as its label, e.g. `"Needs Work"`.
impl Serialize for QualityBadge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for QualityBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grid filter. A term matches an item carrying it as a tag or as its vibe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentFilter {
    #[default]
    All,
    Term(String),
}

impl ContentFilter {
    /// `None`, blank, and `"all"` select everything.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("" | "all") => Self::All,
            Some(term) => Self::Term(term.to_string()),
        }
    }

    fn matches(&self, tags: &[String], vibe: Vibe) -> bool {
        match self {
            Self::All => true,
            Self::Term(term) => tags.iter().any(|t| t == term) || vibe.as_str() == term,
        }
    }

    #[must_use]
    pub fn matches_post(&self, post: &Post) -> bool {
        self.matches(&post.tags, post.vibe)
    }

    #[must_use]
    pub fn matches_reel(&self, reel: &Reel) -> bool {
        self.matches(&reel.tags, reel.vibe)
    }
}

#[must_use]
pub fn filter_posts<'a>(posts: &'a [Post], filter: &ContentFilter) -> Vec<&'a Post> {
    posts.iter().filter(|p| filter.matches_post(p)).collect()
}

#[must_use]
pub fn filter_reels<'a>(reels: &'a [Reel], filter: &ContentFilter) -> Vec<&'a Reel> {
    reels.iter().filter(|r| filter.matches_reel(r)).collect()
}

/// Distinct tags in first-seen order.
pub fn unique_tags<'a, I>(tag_lists: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen = HashSet::new();
    tag_lists
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|tag| seen.insert(*tag))
        .collect()
}

/// Distinct vibes in first-seen order.
pub fn unique_vibes(vibes: impl IntoIterator<Item = Vibe>) -> Vec<Vibe> {
    let mut seen = HashSet::new();
    vibes.into_iter().filter(|v| seen.insert(*v)).collect()
}

/// Summary row shown above the reels grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelTotals {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub avg_engagement_rate: f64,
}

#[must_use]
pub fn reel_totals(reels: &[Reel]) -> ReelTotals {
    ReelTotals {
        total_views: reels.iter().map(|r| r.views).sum(),
        total_likes: reels.iter().map(|r| r.likes).sum(),
        total_comments: reels.iter().map(|r| r.comments).sum(),
        avg_engagement_rate: mean(reels.iter().map(reel_engagement_rate)),
    }
}

/// First character of every whitespace-separated word, e.g. `"SM"`.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn post(tags: &[&str], vibe: Vibe) -> Post {
        Post {
            id: "p".to_string(),
            image_url: String::new(),
            caption: String::new(),
            likes: 0,
            comments: 0,
            timestamp: Utc::now(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            vibe,
            quality_score: 80,
        }
    }

    fn reel(views: u64, likes: u64, comments: u64) -> Reel {
        Reel {
            id: "r".to_string(),
            thumbnail_url: String::new(),
            caption: String::new(),
            views,
            likes,
            comments,
            timestamp: Utc::now(),
            tags: vec!["dance".to_string()],
            vibe: Vibe::Energetic,
        }
    }

    #[test]
    fn format_count_thresholds() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(45_300), "45.3K");
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn quality_badge_tiers() {
        assert_eq!(QualityBadge::for_score(100), QualityBadge::Excellent);
        assert_eq!(QualityBadge::for_score(90), QualityBadge::Excellent);
        assert_eq!(QualityBadge::for_score(89), QualityBadge::Good);
        assert_eq!(QualityBadge::for_score(70), QualityBadge::Average);
        assert_eq!(QualityBadge::for_score(69), QualityBadge::NeedsWork);
        assert_eq!(QualityBadge::NeedsWork.to_string(), "Needs Work");
    }

    #[test]
    fn quality_badge_serializes_as_label() {
        let json = serde_json::to_value(QualityBadge::NeedsWork).unwrap();
        assert_eq!(json, serde_json::json!("Needs Work"));
        let json = serde_json::to_value(QualityBadge::Excellent).unwrap();
        assert_eq!(json, serde_json::json!("Excellent"));
    }

    #[test]
    fn filter_parse_defaults_to_all() {
        assert_eq!(ContentFilter::parse(None), ContentFilter::All);
        assert_eq!(ContentFilter::parse(Some("all")), ContentFilter::All);
        assert_eq!(ContentFilter::parse(Some("  ")), ContentFilter::All);
        assert_eq!(
            ContentFilter::parse(Some("travel")),
            ContentFilter::Term("travel".to_string())
        );
    }

    #[test]
    fn filter_matches_tag_or_vibe() {
        let posts = vec![
            post(&["fashion", "style"], Vibe::Aesthetic),
            post(&["travel"], Vibe::Luxury),
            post(&["food"], Vibe::Casual),
        ];
        let by_tag = filter_posts(&posts, &ContentFilter::parse(Some("travel")));
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].tags, vec!["travel".to_string()]);

        let by_vibe = filter_posts(&posts, &ContentFilter::parse(Some("casual")));
        assert_eq!(by_vibe.len(), 1);

        assert_eq!(filter_posts(&posts, &ContentFilter::All).len(), 3);
        assert!(filter_posts(&posts, &ContentFilter::parse(Some("nope"))).is_empty());
    }

    #[test]
    fn filter_reels_by_vibe() {
        let reels = vec![reel(10, 1, 1), reel(20, 1, 1)];
        let hits = filter_reels(&reels, &ContentFilter::parse(Some("energetic")));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn unique_tags_first_seen_order() {
        let posts = vec![
            post(&["b", "a"], Vibe::Casual),
            post(&["a", "c"], Vibe::Casual),
        ];
        let tags = unique_tags(posts.iter().map(|p| p.tags.as_slice()));
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn unique_vibes_first_seen_order() {
        let vibes = unique_vibes([Vibe::Luxury, Vibe::Casual, Vibe::Luxury]);
        assert_eq!(vibes, vec![Vibe::Luxury, Vibe::Casual]);
    }

    #[test]
    fn reel_totals_sum_and_average() {
        let totals = reel_totals(&[reel(1_000, 80, 20), reel(1_000, 0, 0)]);
        assert_eq!(totals.total_views, 2_000);
        assert_eq!(totals.total_likes, 80);
        assert_eq!(totals.total_comments, 20);
        assert!((totals.avg_engagement_rate - 5.0).abs() < 1e-9);
    }

    #[test]
    fn reel_totals_of_nothing_is_zero() {
        let totals = reel_totals(&[]);
        assert_eq!(totals.total_views, 0);
        assert_eq!(totals.avg_engagement_rate, 0.0);
    }

    #[test]
    fn initials_from_display_name() {
        assert_eq!(initials("Sofia Martinez"), "SM");
        assert_eq!(initials("  cher "), "c");
        assert_eq!(initials(""), "");
    }
}
