use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Categorical content mood assigned to every post and reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Aesthetic,
    Luxury,
    Casual,
    Energetic,
}

impl Vibe {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Vibe::Aesthetic => "aesthetic",
            Vibe::Luxury => "luxury",
            Vibe::Casual => "casual",
            Vibe::Energetic => "energetic",
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Public header of an influencer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Display handle, always `@` followed by the requested handle.
    pub username: String,
    pub profile_picture: String,
    pub followers: u64,
    pub following: u64,
    pub posts_count: u64,
    pub bio: String,
    pub verified: bool,
}

/// Account-level engagement summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// Percentage in `[0, 100]`, two decimals.
    pub engagement_rate: f64,
    pub total_reach: u64,
    /// Percentage, one decimal. May exceed 100.
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique within one profile, e.g. `"post_1"`.
    pub id: String,
    pub image_url: String,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,
    pub timestamp: DateTime<Utc>,
    /// Non-empty, lowercase.
    pub tags: Vec<String>,
    pub vibe: Vibe,
    /// Integer score in `[0, 100]`.
    pub quality_score: u8,
}

impl Post {
    #[must_use]
    pub fn interactions(&self) -> u64 {
        self.likes + self.comments
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A short video. `views >= likes + comments` is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reel {
    pub id: String,
    pub thumbnail_url: String,
    pub caption: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<String>,
    pub vibe: Vibe,
}

impl Reel {
    #[must_use]
    pub fn interactions(&self) -> u64 {
        self.likes + self.comments
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderSplit {
    pub male: u32,
    pub female: u32,
    pub other: u32,
}

/// Label → percentage mapping that keeps insertion order on the wire.
///
/// Percentages are not required to sum to 100.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PercentageMap(Vec<(String, u32)>);

impl PercentageMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the percentage for `label`, keeping its original slot.
    pub fn insert(&mut self, label: impl Into<String>, percentage: u32) {
        let label = label.into();
        if let Some(entry) = self.0.iter_mut().find(|(l, _)| *l == label) {
            entry.1 = percentage;
        } else {
            self.0.push((label, percentage));
        }
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<u32> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(l, p)| (l.as_str(), *p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, p)| p).sum()
    }
}

impl<L: Into<String>> FromIterator<(L, u32)> for PercentageMap {
    fn from_iter<I: IntoIterator<Item = (L, u32)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, percentage) in iter {
            map.insert(label, percentage);
        }
        map
    }
}

impl Serialize for PercentageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, percentage) in &self.0 {
            map.serialize_entry(label, percentage)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PercentageMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PercentageMapVisitor;

        impl<'de> Visitor<'de> for PercentageMapVisitor {
            type Value = PercentageMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of label to integer percentage")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = PercentageMap::new();
                while let Some((label, percentage)) = access.next_entry::<String, u32>()? {
                    map.insert(label, percentage);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(PercentageMapVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub gender_split: GenderSplit,
    pub age_groups: PercentageMap,
    pub top_countries: PercentageMap,
}

/// The full aggregate served for one handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerProfile {
    pub profile: Profile,
    pub analytics: AnalyticsSummary,
    pub posts: Vec<Post>,
    pub reels: Vec<Reel>,
    pub demographics: Demographics,
    pub last_updated: DateTime<Utc>,
}
