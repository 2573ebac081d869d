//! Body-style estimation.

use std::collections::HashMap;

use crate::model::{size_key, BodyStyle, TextFragment};

/// Find the most frequent `(font size, font name)` pair.
///
/// Among equally frequent styles the one seen first in `fragments` wins.
/// An empty slice yields [`BodyStyle::default`].
pub fn body_style(fragments: &[TextFragment]) -> BodyStyle {
    // (size key, font name) -> (count, first index)
    let mut histogram: HashMap<(i64, &str), (usize, usize)> = HashMap::new();
    for (index, fragment) in fragments.iter().enumerate() {
        let entry = histogram
            .entry((size_key(fragment.font_size), fragment.font_name.as_str()))
            .or_insert((0, index));
        entry.0 += 1;
    }

    let winner = histogram
        .values()
        .max_by(|(count_a, first_a), (count_b, first_b)| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|&(_, first)| &fragments[first]);

    match winner {
        Some(fragment) => {
            log::debug!(
                "Body style: {}pt {:?} across {} fragments",
                fragment.font_size,
                fragment.font_name,
                fragments.len()
            );
            BodyStyle {
                font_size: fragment.font_size,
                font_name: fragment.font_name.clone(),
            }
        }
        None => BodyStyle::default(),
    }
}
