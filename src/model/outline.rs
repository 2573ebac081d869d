//! Outline types produced by the heading pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Title used when the first page yields no text.
pub const UNTITLED: &str = "Untitled Document";

/// Title used when a document could not be processed at all.
pub const ERROR_TITLE: &str = "Error Processing Document";

/// Heading rank, 1 being the most prominent.
///
/// Serialized as `"H1"`, `"H2"`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u32);

impl HeadingLevel {
    /// The top heading rank.
    pub const H1: HeadingLevel = HeadingLevel(1);

    /// Create a level; ranks below 1 are clamped to 1.
    pub fn new(rank: u32) -> Self {
        Self(rank.max(1))
    }

    /// Numeric rank.
    pub fn rank(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl FromStr for HeadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('H')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n >= 1)
            .map(HeadingLevel)
            .ok_or_else(|| Error::Other(format!("invalid heading level: {}", s)))
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HeadingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A heading with its document-relative level.
#[derive(Debug, Clone, PartialEq)]
pub struct LeveledHeading {
    pub text: String,
    pub page: u32,
    pub font_size: f32,
    pub level: HeadingLevel,
}

/// A node of the outline forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page the heading appears on (1-based)
    pub page: u32,
    /// Nested sub-headings, in document order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::total_nodes).sum::<usize>()
    }
}

impl From<&LeveledHeading> for OutlineNode {
    fn from(heading: &LeveledHeading) -> Self {
        OutlineNode::new(heading.level, heading.text.clone(), heading.page)
    }
}

/// The outline extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title
    pub title: String,
    /// Top-level outline nodes
    pub outline: Vec<OutlineNode>,
}

impl OutlineResult {
    /// Create a result.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineNode>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The fixed result for a document that could not be processed.
    pub fn fallback() -> Self {
        Self::new(ERROR_TITLE, Vec::new())
    }

    /// Whether this is the processing-failure placeholder.
    pub fn is_fallback(&self) -> bool {
        self.title == ERROR_TITLE && self.outline.is_empty()
    }

    /// Total number of headings across the forest.
    pub fn heading_count(&self) -> usize {
        self.outline.iter().map(OutlineNode::total_nodes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_display_and_parse() {
        assert_eq!(HeadingLevel::new(3).to_string(), "H3");
        assert_eq!("H12".parse::<HeadingLevel>().unwrap().rank(), 12);
        assert!("H0".parse::<HeadingLevel>().is_err());
        assert!("h1".parse::<HeadingLevel>().is_err());
        assert!("Heading".parse::<HeadingLevel>().is_err());
        assert_eq!(HeadingLevel::new(0), HeadingLevel::H1);
    }

    #[test]
    fn test_node_serialization_shape() {
        let mut root = OutlineNode::new(HeadingLevel::H1, "Intro", 1);
        root.children.push(OutlineNode::new(HeadingLevel::new(2), "Scope", 2));

        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(
            json,
            r#"{"level":"H1","text":"Intro","page":1,"children":[{"level":"H2","text":"Scope","page":2,"children":[]}]}"#
        );

        let back: OutlineNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn test_result_counts() {
        let mut root = OutlineNode::new(HeadingLevel::H1, "A", 1);
        root.children.push(OutlineNode::new(HeadingLevel::new(2), "B", 1));
        let sibling = OutlineNode::new(HeadingLevel::H1, "C", 2);
        let result = OutlineResult::new("Doc", vec![root, sibling]);

        assert_eq!(result.heading_count(), 3);
        assert!(!result.is_fallback());
        assert!(OutlineResult::fallback().is_fallback());
    }
}
