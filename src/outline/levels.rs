//! Heading level assignment.

use std::collections::HashMap;

use crate::model::{size_key, HeadingLevel, LeveledHeading, TextFragment};

/// Rank heading font sizes, largest first, and level every heading by its
/// size's rank.
///
/// Levels are document-wide: every heading at the largest size is H1, no
/// matter where it sits. Input order is preserved.
pub fn assign_levels(headings: &[TextFragment], fallback_level: u32) -> Vec<LeveledHeading> {
    if headings.is_empty() {
        return Vec::new();
    }

    let ranks = size_ranks(headings);
    log::debug!("Heading sizes ranked into {} levels", ranks.len());

    headings
        .iter()
        .map(|heading| {
            let rank = ranks
                .get(&size_key(heading.font_size))
                .copied()
                .unwrap_or(fallback_level);
            LeveledHeading {
                text: heading.text.clone(),
                page: heading.page,
                font_size: heading.font_size,
                level: HeadingLevel::new(rank),
            }
        })
        .collect()
}

/// Map each distinct size key to its 1-based rank in descending order.
fn size_ranks(headings: &[TextFragment]) -> HashMap<i64, u32> {
    let mut keys: Vec<i64> = headings.iter().map(|h| size_key(h.font_size)).collect();
    keys.sort_unstable_by(|a, b| b.cmp(a));
    keys.dedup();

    keys.into_iter()
        .enumerate()
        .map(|(index, key)| (key, index as u32 + 1))
        .collect()
}
