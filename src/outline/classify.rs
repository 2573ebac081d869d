//! Heading classification.
//!
//! A fragment is a heading when it stands out from body text by size or
//! weight *and* its text looks like a heading: an explicit chapter/section
//! marker, decimal numbering, a short title-cased phrase, or a short all-caps
//! phrase. The checks are evaluated in that order and the first hit wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::OutlineOptions;
use crate::model::TextFragment;

/// "Chapter 1: Overview", "Section 2 Scope"
static SECTION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Chapter|Section)\s+\d+[:.\s].*$").expect("section marker pattern")
});

/// "1. Introduction", "2.1. Methods", "3 Results"
static DECIMAL_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\.?\s+.+$").expect("decimal numbering pattern"));

/// Which signal accepted a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingPattern {
    /// Begins with "Chapter N" or "Section N" and a separator
    SectionMarker,
    /// Begins with a dotted numeral sequence
    DecimalNumbering,
    /// Every word capitalized
    TitleCase,
    /// Every letter upper-case
    AllCaps,
}

/// Decide whether `fragment` is a heading, given the body font size.
pub fn is_heading(fragment: &TextFragment, body_size: f32, options: &OutlineOptions) -> bool {
    match_heading(fragment, body_size, options).is_some()
}

/// Classify `fragment`, returning the pattern that accepted it.
pub fn match_heading(
    fragment: &TextFragment,
    body_size: f32,
    options: &OutlineOptions,
) -> Option<HeadingPattern> {
    let length = fragment.char_count();
    if length < options.min_chars || length > options.max_chars {
        return None;
    }

    // Compared in f64: exactly `ratio` times body size counts as larger.
    let is_larger =
        f64::from(fragment.font_size) > f64::from(body_size) * f64::from(options.size_ratio);
    if !is_larger && !fragment.is_bold {
        return None;
    }

    let text = fragment
        .text
        .strip_suffix(['.', ':'])
        .unwrap_or(&fragment.text);
    match_pattern(text, options)
}

/// Match heading-like text against the pattern table.
pub fn match_pattern(text: &str, options: &OutlineOptions) -> Option<HeadingPattern> {
    if SECTION_MARKER.is_match(text) {
        return Some(HeadingPattern::SectionMarker);
    }
    if DECIMAL_NUMBERING.is_match(text) {
        return Some(HeadingPattern::DecimalNumbering);
    }

    let words = text.split_whitespace().count();
    if words < options.min_words || words > options.max_words {
        return None;
    }
    if is_title_case(text) {
        Some(HeadingPattern::TitleCase)
    } else if is_all_caps(text) {
        Some(HeadingPattern::AllCaps)
    } else {
        None
    }
}

/// Title-case test: upper-case letters only follow uncased characters and
/// lower-case letters only follow cased ones, with at least one cased letter.
///
/// "Results And Discussion" and "O'Neil Report" are title case; "McDonald
/// Farms", "the End" and "2nd Edition" are not.
pub fn is_title_case(text: &str) -> bool {
    let mut previous_cased = false;
    let mut any_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else {
            previous_cased = false;
        }
    }

    any_cased
}

/// All-caps test: at least one cased letter and no lower-case ones.
pub fn is_all_caps(text: &str) -> bool {
    let mut any_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        any_upper |= c.is_uppercase();
    }
    any_upper
}
