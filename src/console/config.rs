//! Console configuration.

/// Default cap on interactively entered move labels (characters).
pub const DEFAULT_MAX_LABEL_LEN: usize = 10;

/// Settings for the interactive front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Interactively entered labels are cut to this many characters.
    pub max_label_len: usize,
    /// Remove spaces from interactively entered labels.
    pub strip_whitespace: bool,
    /// Print round results as JSON lines instead of prose.
    pub json: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_label_len: DEFAULT_MAX_LABEL_LEN,
            strip_whitespace: true,
            json: false,
        }
    }
}

impl ConsoleConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_label_len: lookup("FAIRPLAY_MAX_LABEL_LEN")
                .and_then(|v| v.parse().ok())
                .filter(|len: &usize| *len > 0)
                .unwrap_or(defaults.max_label_len),
            strip_whitespace: lookup("FAIRPLAY_STRIP_WHITESPACE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.strip_whitespace),
            json: lookup("FAIRPLAY_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.json),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
