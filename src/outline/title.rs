//! Title extraction from the first page.

use std::cmp::Ordering;

use crate::model::{TextFragment, UNTITLED};

/// Join the largest-font text on the first page into a title.
///
/// `first_page` is sorted top-to-bottom, left-to-right before collecting, and
/// every fragment within `tolerance` of the maximum size contributes. Returns
/// [`UNTITLED`] when nothing qualifies.
pub fn extract_title(first_page: &[TextFragment], tolerance: f32) -> String {
    let max_size = first_page
        .iter()
        .map(|f| f.font_size)
        .fold(0.0_f32, f32::max);
    if max_size <= 0.0 {
        return UNTITLED.to_string();
    }

    let mut ordered: Vec<&TextFragment> = first_page.iter().collect();
    ordered.sort_by(|a, b| reading_order(a, b));

    let parts: Vec<&str> = ordered
        .into_iter()
        .filter(|f| (f.font_size - max_size).abs() < tolerance)
        .map(|f| f.text.as_str())
        .filter(|text| !text.is_empty())
        .collect();

    if parts.is_empty() {
        UNTITLED.to_string()
    } else {
        parts.join(" ")
    }
}

fn reading_order(a: &TextFragment, b: &TextFragment) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}
