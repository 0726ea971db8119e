use serde::{Deserialize, Serialize};

/// What to do with a line whose content exceeds [`ParseOptions::max_line_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlongLinePolicy {
    /// Keep the first `max_line_length` characters and drop the rest.
    Truncate,
    /// Fail with [`crate::ModeError::LineTooLong`].
    Reject,
}

/// Knobs for the line reader and the tree builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Width a literal tab contributes to a line's indent.
    pub tab_width: usize,
    /// Maximum number of open containers, root included.
    pub max_depth: usize,
    /// Maximum content length of a single line, in characters.
    pub max_line_length: usize,
    pub overlong_lines: OverlongLinePolicy,
    /// Strict parsing reports malformed structure as an error. Lenient parsing
    /// recovers: unclosed quotes run to end of line, overlong lines are cut and
    /// lines past the depth bound are dropped.
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            max_depth: 64,
            max_line_length: 4096,
            overlong_lines: OverlongLinePolicy::Reject,
            strict: true,
        }
    }
}

impl ParseOptions {
    /// The forgiving profile the config loader uses.
    pub fn lenient() -> Self {
        Self {
            overlong_lines: OverlongLinePolicy::Truncate,
            strict: false,
            ..Self::default()
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn with_overlong_lines(mut self, policy: OverlongLinePolicy) -> Self {
        self.overlong_lines = policy;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
