//! Heuristic thresholds for outline extraction.

/// Options controlling heading detection, levelling, and title extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// A fragment counts as "larger" when its size exceeds body size times this ratio
    pub size_ratio: f32,

    /// Shortest heading text, in characters
    pub min_chars: usize,

    /// Longest heading text, in characters
    pub max_chars: usize,

    /// Fewest words for the title-case and all-caps checks
    pub min_words: usize,

    /// Most words for the title-case and all-caps checks
    pub max_words: usize,

    /// Absolute size tolerance when collecting title fragments
    pub title_tolerance: f32,

    /// Level given to a heading whose size is missing from the size ranking
    pub fallback_level: u32,
}

impl OutlineOptions {
    /// Default body-size multiplier for "larger" text.
    pub const DEFAULT_SIZE_RATIO: f32 = 1.15;

    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size ratio that marks a fragment as larger than body text.
    pub fn with_size_ratio(mut self, ratio: f32) -> Self {
        self.size_ratio = ratio;
        self
    }

    /// Set the accepted heading length, in characters.
    pub fn with_char_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_chars = min;
        self.max_chars = max;
        self
    }

    /// Set the word-count bounds for the capitalization checks.
    pub fn with_word_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_words = min;
        self.max_words = max;
        self
    }

    /// Set the title size tolerance.
    pub fn with_title_tolerance(mut self, tolerance: f32) -> Self {
        self.title_tolerance = tolerance;
        self
    }

    /// Set the fallback level.
    pub fn with_fallback_level(mut self, level: u32) -> Self {
        self.fallback_level = level;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            size_ratio: Self::DEFAULT_SIZE_RATIO,
            min_chars: 3,
            max_chars: 250,
            min_words: 2,
            max_words: 9,
            title_tolerance: 0.1,
            fallback_level: 9,
        }
    }
}
