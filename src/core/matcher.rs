//! Deterministic text-to-feature matching.
//!
//! This is the cheap first line of the pipeline: if the user's landmark
//! text and a feature name overlap textually, no external disambiguation
//! is needed at all.

use crate::domain::Feature;

/// Minimum token length for the distinctive-token rule. Shorter tokens
/// ("the", "of", numbers) match too promiscuously.
const MIN_TOKEN_CHARS: usize = 4;

/// Check whether a feature's name plausibly matches the user's landmark
/// text.
///
/// Both inputs are lowercased. A match is:
/// - either string containing the other as a substring, or
/// - any whitespace-delimited token of the name longer than 3 characters
///   occurring in the text (catches multi-word names where the user
///   mentions only a distinctive word).
///
/// Empty name or empty text never match.
pub fn matches_landmark(feature: &Feature, user_text: &str) -> bool {
    if feature.name.is_empty() || user_text.is_empty() {
        return false;
    }

    let name = feature.name.to_lowercase();
    let text = user_text.to_lowercase();

    if name.contains(&text) || text.contains(&name) {
        return true;
    }

    name.split_whitespace()
        .any(|token| token.chars().count() >= MIN_TOKEN_CHARS && text.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(name: &str) -> Feature {
        Feature::new(name, 10.0)
    }

    #[test]
    fn test_exact_name_matches() {
        assert!(matches_landmark(
            &feature("Mama Amina Kiosk"),
            "Mama Amina Kiosk"
        ));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(matches_landmark(&feature("Fuel Station"), "FUEL STATION"));
        assert!(matches_landmark(&feature("FUEL STATION"), "fuel station"));
    }

    #[test]
    fn test_substring_matches_both_directions() {
        // Text contains name
        assert!(matches_landmark(
            &feature("Blue Gate"),
            "drop at the blue gate please"
        ));
        // Name contains text
        assert!(matches_landmark(&feature("Mama Amina Kiosk"), "amina kiosk"));
    }

    #[test]
    fn test_distinctive_token_matches() {
        // Only one token of the multi-word name appears in the text
        assert!(matches_landmark(
            &feature("Mama Amina Kiosk"),
            "the shop next to amina"
        ));
    }

    #[test]
    fn test_short_tokens_do_not_match() {
        // "the" (3 chars) must not trigger the token rule
        assert!(!matches_landmark(
            &feature("The Yard"),
            "somewhere near them"
        ));
    }

    #[test]
    fn test_empty_inputs_never_match() {
        assert!(!matches_landmark(&feature("Kiosk"), ""));
        assert!(!matches_landmark(&feature(""), "kiosk"));
        assert!(!matches_landmark(&feature(""), ""));
    }

    #[test]
    fn test_unrelated_text_does_not_match() {
        assert!(!matches_landmark(
            &feature("Fuel Station"),
            "an unknown name that does not resemble anything"
        ));
    }
}
