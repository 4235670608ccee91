//! Fixed keyword vocabularies for deterministic classification.

use super::entities::Theme;

pub const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "great",
    "amazing",
    "wonderful",
    "grateful",
    "thankful",
    "excited",
    "love",
    "proud",
    "accomplished",
    "blessed",
    "joy",
    "fantastic",
    "excellent",
    "perfect",
    "beautiful",
    "good",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "angry",
    "frustrated",
    "upset",
    "difficult",
    "hard",
    "struggle",
    "worry",
    "anxious",
    "stress",
    "bad",
    "terrible",
    "awful",
    "hate",
    "pain",
    "hurt",
    "disappointed",
];

/// Keyword list for a theme. Matching is by substring on lowercased text.
pub fn theme_keywords(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Gratitude => &["grateful", "thankful", "appreciate", "blessed", "fortunate"],
        Theme::PersonalGrowth => &["learn", "grow", "improve", "develop", "progress"],
        Theme::Relationships => &["friend", "family", "love", "relationship", "together"],
        Theme::Work => &["work", "job", "career", "project", "meeting", "colleague"],
        Theme::Health => &["health", "exercise", "fitness", "sleep", "workout"],
        Theme::Creativity => &["create", "art", "music", "write", "design", "idea"],
        Theme::DailyLife => &["day", "morning", "evening", "routine", "daily"],
        Theme::Reflection => &["reflect", "think", "realize", "understand", "discover"],
        Theme::Challenges => &["challenge", "difficult", "struggle", "hard", "problem"],
        Theme::Achievements => &["achieve", "accomplish", "success", "goal", "proud"],
        Theme::Emotions => &["feel", "emotion", "happy", "sad", "angry", "excited"],
        Theme::FuturePlanning => &["plan", "future", "goal", "hope", "dream", "will"],
    }
}

/// Number of distinct keywords from `words` present in already-lowercased `text`.
pub fn count_matches(lower_text: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| lower_text.contains(*w)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_keywords() {
        for theme in Theme::ALL {
            assert!(!theme_keywords(theme).is_empty(), "{theme} has no keywords");
        }
    }

    #[test]
    fn repeated_occurrences_count_once() {
        assert_eq!(count_matches("happy happy happy", POSITIVE_WORDS), 1);
        assert_eq!(count_matches("a good and great day", POSITIVE_WORDS), 2);
    }
}
