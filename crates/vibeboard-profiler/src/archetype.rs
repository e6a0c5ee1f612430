//! Fixed content templates cycled over when generating sample posts and reels.

use vibeboard_core::Vibe;

/// A content type bundling a vibe and the tags every item of that type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Archetype {
    pub kind: &'static str,
    pub vibe: Vibe,
    pub tags: &'static [&'static str],
}

impl Archetype {
    /// Tags rendered as `#tag` words separated by spaces.
    #[must_use]
    pub fn hashtags(&self) -> String {
        self.tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn owned_tags(&self) -> Vec<String> {
        self.tags.iter().map(|tag| (*tag).to_string()).collect()
    }
}

pub const POST_ARCHETYPES: [Archetype; 5] = [
    Archetype {
        kind: "fashion",
        vibe: Vibe::Aesthetic,
        tags: &["fashion", "style", "ootd"],
    },
    Archetype {
        kind: "travel",
        vibe: Vibe::Luxury,
        tags: &["travel", "vacation", "wanderlust"],
    },
    Archetype {
        kind: "food",
        vibe: Vibe::Casual,
        tags: &["food", "foodie", "restaurant"],
    },
    Archetype {
        kind: "lifestyle",
        vibe: Vibe::Energetic,
        tags: &["lifestyle", "motivation", "selfcare"],
    },
    Archetype {
        kind: "beauty",
        vibe: Vibe::Aesthetic,
        tags: &["beauty", "makeup", "skincare"],
    },
];

pub const REEL_ARCHETYPES: [Archetype; 5] = [
    Archetype {
        kind: "dance",
        vibe: Vibe::Energetic,
        tags: &["dance", "trending", "viral"],
    },
    Archetype {
        kind: "tutorial",
        vibe: Vibe::Casual,
        tags: &["tutorial", "howto", "tips"],
    },
    Archetype {
        kind: "travel",
        vibe: Vibe::Luxury,
        tags: &["travel", "vacation", "adventure"],
    },
    Archetype {
        kind: "comedy",
        vibe: Vibe::Casual,
        tags: &["funny", "comedy", "entertainment"],
    },
    Archetype {
        kind: "fashion",
        vibe: Vibe::Aesthetic,
        tags: &["fashion", "style", "outfit"],
    },
];

/// The archetype assigned to the `index`-th generated item: `table[index % len]`.
///
/// # Panics
///
/// Panics if `table` is empty.
#[must_use]
pub fn archetype_for(table: &[Archetype], index: usize) -> &Archetype {
    &table[index % table.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_for_cycles() {
        assert_eq!(archetype_for(&POST_ARCHETYPES, 0).kind, "fashion");
        assert_eq!(archetype_for(&POST_ARCHETYPES, 4).kind, "beauty");
        assert_eq!(archetype_for(&POST_ARCHETYPES, 5).kind, "fashion");
        assert_eq!(archetype_for(&REEL_ARCHETYPES, 13).kind, "comedy");
    }

    #[test]
    fn hashtags_joins_with_spaces() {
        assert_eq!(POST_ARCHETYPES[2].hashtags(), "#food #foodie #restaurant");
    }

    #[test]
    fn every_tag_is_lowercase_and_non_empty() {
        for archetype in POST_ARCHETYPES.iter().chain(REEL_ARCHETYPES.iter()) {
            assert!(!archetype.tags.is_empty(), "{} has no tags", archetype.kind);
            for tag in archetype.tags {
                assert_eq!(*tag, tag.to_lowercase());
            }
        }
    }
}
