//! Global Constants
//!
//! Centralized constants for analysis, parsing and reporting.

/// Rating scale constants
pub mod rating {
    pub const MIN_RATING: u8 = 0;

    pub const MAX_RATING: u8 = 10;

    /// Ratings at or above this value are high quality
    pub const HIGH_THRESHOLD: u8 = 8;

    /// Ratings at or above this value (and below HIGH_THRESHOLD) are medium quality
    pub const MEDIUM_THRESHOLD: u8 = 4;
}

/// Traversal constants
pub mod scan {
    /// Ignore-pattern file read from the analysis root
    pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

    /// Patterns excluded regardless of the ignore file
    pub const DEFAULT_EXCLUDES: &[&str] = &[".git/", ".venv/"];

    /// Project-level configuration directory; may hold credentials, so the
    /// walk never enters it
    pub const PROJECT_CONFIG_DIR: &str = ".codegrade";
}

/// Response parsing constants
pub mod parse {
    /// Characters of raw response text embedded in a parse-failure explanation
    pub const RAW_PREVIEW_CHARS: usize = 100;

    /// Complexity label used when the service omits one
    pub const DEFAULT_COMPLEXITY: &str = "O(1)";
}

/// LLM provider defaults
pub mod llm {
    pub const DEFAULT_PROVIDER: &str = "gemini";

    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    pub const DEFAULT_TEMPERATURE: f32 = 0.2;

    pub const DEFAULT_MAX_TOKENS: usize = 2048;
}
