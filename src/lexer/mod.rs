// Author: Dustin Pilgrim
// License: MIT

use std::str::Split;
use std::iter::Enumerate;

use crate::options::{OverlongLinePolicy, ParseOptions};
use crate::ModeError;

mod scanner;
mod tokenizer;

pub use tokenizer::{classify, Payload};

/// One logical line: blank and comment lines never become a `Line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 0-based position in the source text.
    pub number: usize,
    /// Leading whitespace width, tabs expanded to the configured tab width.
    pub indent: usize,
    /// Text after the indent, trailing `\r`, spaces and tabs removed.
    pub content: &'a str,
    /// Character column (0-based) where `content` starts in the raw line.
    pub column: usize,
}

/// Splits text into [`Line`]s. Every call to [`LineReader::lines`] starts a
/// fresh pass over the same text.
#[derive(Debug, Clone)]
pub struct LineReader<'a> {
    text: &'a str,
    tab_width: usize,
    max_line_length: usize,
    overlong_lines: OverlongLinePolicy,
}

impl<'a> LineReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, &ParseOptions::default())
    }

    pub fn with_options(text: &'a str, options: &ParseOptions) -> Self {
        LineReader {
            text,
            tab_width: options.tab_width,
            max_line_length: options.max_line_length,
            overlong_lines: options.overlong_lines,
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn lines(&self) -> Lines<'a> {
        Lines {
            raw: self.text.split('\n').enumerate(),
            tab_width: self.tab_width,
            max_line_length: self.max_line_length,
            overlong_lines: self.overlong_lines,
        }
    }
}

impl<'r, 'a> IntoIterator for &'r LineReader<'a> {
    type Item = Result<Line<'a>, ModeError>;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

/// Lazy iterator behind [`LineReader::lines`].
pub struct Lines<'a> {
    raw: Enumerate<Split<'a, char>>,
    tab_width: usize,
    max_line_length: usize,
    overlong_lines: OverlongLinePolicy,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<Line<'a>, ModeError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (number, raw) in self.raw.by_ref() {
            let (indent, offset) = scanner::measure_indent(raw, self.tab_width);
            let content = scanner::trim_trailing(&raw[offset..]);

            if content.is_empty() || scanner::is_comment(content) {
                continue;
            }

            let content = match scanner::cap_length(content, self.max_line_length) {
                None => content,
                Some(cut) => match self.overlong_lines {
                    OverlongLinePolicy::Truncate => {
                        tracing::warn!(line = number + 1, limit = self.max_line_length, "truncating overlong line");
                        scanner::trim_trailing(cut)
                    }
                    OverlongLinePolicy::Reject => {
                        return Some(Err(ModeError::LineTooLong {
                            length: content.chars().count(),
                            limit: self.max_line_length,
                            line: number + 1,
                            hint: Some("Split the value or raise max_line_length".into()),
                            code: Some(105),
                        }));
                    }
                },
            };

            return Some(Ok(Line {
                number,
                indent,
                content,
                column: raw[..offset].chars().count(),
            }));
        }
        None
    }
}
