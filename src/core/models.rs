//! Output configuration for the entry writers.

/// Configuration for output format.
/// Controls which columns are written and which entries are kept.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Include the derived calendar/clock columns
    pub include_derived: bool,
    /// Include entries with sentinel authors (default: true)
    pub include_sentinels: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_derived: false,
            include_sentinels: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_derived(mut self) -> Self {
        self.include_derived = true;
        self
    }

    #[must_use]
    pub fn without_sentinels(mut self) -> Self {
        self.include_sentinels = false;
        self
    }
}
