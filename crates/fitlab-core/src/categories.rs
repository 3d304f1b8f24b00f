//! Exercise categorisation: canonical muscle groups and chart colours.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback colour for anything without a dedicated palette entry.
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Label used for exercises without a category tag.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Canonical muscle group used for balance charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
    Unknown,
}

type KeywordTier = &'static [(MuscleGroup, &'static [&'static str])];

// Keyword tiers, most specific first. A hit in an earlier tier beats any hit
// in a later one, so "Back Squat" is legs and "Tricep Dips" is arms.
const KEYWORD_TIERS: &[KeywordTier] = &[
    // Named lifts.
    &[
        (MuscleGroup::Legs, &["squat", "lunge", "leg", "legs"]),
        (MuscleGroup::Back, &["deadlift", "row", "pull", "pulldown", "pullup", "chin", "chinup"]),
        (MuscleGroup::Arms, &["curl", "pushdown", "skullcrusher"]),
    ],
    // Body parts.
    &[
        (MuscleGroup::Chest, &["chest", "pec"]),
        (MuscleGroup::Back, &["back", "lat"]),
        (MuscleGroup::Legs, &["quad", "hamstring", "glute", "hip", "calf", "calves"]),
        (MuscleGroup::Shoulders, &["shoulder", "delt"]),
        (MuscleGroup::Arms, &["arm", "bicep", "tricep", "forearm"]),
        (MuscleGroup::Core, &["core", "ab", "abs", "oblique"]),
    ],
    // Generic movements.
    &[
        (MuscleGroup::Chest, &["bench", "incline", "fly", "flye", "push", "pushup", "dip"]),
        (MuscleGroup::Shoulders, &["overhead", "lateral", "military"]),
        (MuscleGroup::Core, &["plank", "crunch"]),
        (MuscleGroup::Cardio, &["cardio", "run", "running", "jog", "sprint", "bike", "cycling", "conditioning"]),
    ],
];

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 8] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
        Self::Cardio,
        Self::Unknown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Legs => "Legs",
            Self::Shoulders => "Shoulders",
            Self::Arms => "Arms",
            Self::Core => "Core",
            Self::Cardio => "Cardio",
            Self::Unknown => "Unknown",
        }
    }

    /// Hex colour used for pie slices.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Chest => "#ef4444",
            Self::Back => "#3b82f6",
            Self::Legs => "#10b981",
            Self::Shoulders => "#f59e0b",
            Self::Arms => "#8b5cf6",
            Self::Core => "#ec4899",
            Self::Cardio => "#06b6d4",
            Self::Unknown => NEUTRAL_COLOR,
        }
    }

    /// Classify an exercise from its category tag, falling back to its name.
    pub fn classify(category: Option<&str>, name: &str) -> Self {
        category
            .and_then(Self::from_tag)
            .or_else(|| Self::from_tag(name))
            .unwrap_or(Self::Unknown)
    }

    /// Match a free-form tag against the keyword table, word by word.
    fn from_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if let Some(group) = Self::ALL.iter().find(|g| g.name().eq_ignore_ascii_case(&lowered)) {
            return Some(*group);
        }
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let hit = |key: &&str| {
            words
                .iter()
                .any(|w| w == key || w.strip_suffix('s') == Some(*key))
        };
        KEYWORD_TIERS.iter().find_map(|tier| {
            tier.iter()
                .find(|(_, keys)| keys.iter().any(hit))
                .map(|(group, _)| *group)
        })
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hex colour for an exercise category bar.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Compound" => "#6750A4",
        "Isolation" => "#3b82f6",
        "Cardio" => "#10b981",
        "Core" => "#f59e0b",
        _ => NEUTRAL_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_from_exact_tag() {
        assert_eq!(MuscleGroup::classify(Some("Chest"), "Anything"), MuscleGroup::Chest);
        assert_eq!(MuscleGroup::classify(Some("legs"), "Anything"), MuscleGroup::Legs);
    }

    #[test]
    fn test_classify_falls_back_to_name() {
        assert_eq!(MuscleGroup::classify(None, "Bench Press"), MuscleGroup::Chest);
        assert_eq!(MuscleGroup::classify(Some("Compound"), "Back Squat"), MuscleGroup::Legs);
        assert_eq!(MuscleGroup::classify(Some(""), "Bicep Curls"), MuscleGroup::Arms);
        assert_eq!(MuscleGroup::classify(None, "Lateral Raises"), MuscleGroup::Shoulders);
    }

    #[test]
    fn test_named_lift_beats_body_part() {
        assert_eq!(MuscleGroup::classify(None, "Tricep Dips"), MuscleGroup::Arms);
        assert_eq!(MuscleGroup::classify(None, "Chest-Supported Row"), MuscleGroup::Back);
        assert_eq!(MuscleGroup::classify(None, "Leg Curl"), MuscleGroup::Legs);
        assert_eq!(MuscleGroup::classify(None, "Lat Pulldown"), MuscleGroup::Back);
        assert_eq!(MuscleGroup::classify(None, "Tricep Pushdown"), MuscleGroup::Arms);
        assert_eq!(MuscleGroup::classify(None, "Overhead Press"), MuscleGroup::Shoulders);
        assert_eq!(MuscleGroup::classify(None, "Push-ups"), MuscleGroup::Chest);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(MuscleGroup::classify(None, "Mystery Move"), MuscleGroup::Unknown);
        assert_eq!(MuscleGroup::classify(Some("Misc"), "Thing"), MuscleGroup::Unknown);
    }

    #[test]
    fn test_plural_keywords() {
        assert_eq!(MuscleGroup::classify(None, "Rows"), MuscleGroup::Back);
        assert_eq!(MuscleGroup::classify(None, "Pull-ups"), MuscleGroup::Back);
        assert_eq!(MuscleGroup::classify(None, "Dips"), MuscleGroup::Chest);
    }

    #[test]
    fn test_colors() {
        assert_eq!(MuscleGroup::Chest.color(), "#ef4444");
        assert_eq!(MuscleGroup::Unknown.color(), NEUTRAL_COLOR);
        assert_eq!(category_color("Compound"), "#6750A4");
        assert_eq!(category_color("Stretching"), NEUTRAL_COLOR);
    }
}
