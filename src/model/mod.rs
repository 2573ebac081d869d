//! Document model for outline extraction.
//!
//! This module contains the value types that flow through the pipeline:
//! styled text fragments in, a nested heading forest out.

mod fragment;
mod outline;

pub use fragment::{is_bold_font, normalize_whitespace, round_size, BodyStyle, TextFragment};
pub(crate) use fragment::size_key;
pub use outline::{
    HeadingLevel, LeveledHeading, OutlineNode, OutlineResult, ERROR_TITLE, UNTITLED,
};
