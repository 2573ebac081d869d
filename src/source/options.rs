//! Options for reading fragments out of a document.

/// Options for opening a document as a fragment source.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,
}

impl SourceOptions {
    /// Create new source options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

/// Error handling mode while reading pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}
