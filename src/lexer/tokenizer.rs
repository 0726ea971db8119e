use once_cell::sync::Lazy;
use regex::Regex;

use super::scanner::measure_indent;
use crate::options::ParseOptions;
use crate::ModeError;

/// `key:` or `key: rest`. The first unquoted colon ends the key.
static PLAIN_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([^\s"'#:][^:#]*?)\s*:(.*)$"#).expect("plain key pattern"));

/// What may follow a quoted key.
static KEY_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*:(.*)$").expect("key tail pattern"));

/// The shape of a line's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    /// `- rest`. `offset` is the indent width from the dash to `rest`,
    /// `column` the char column where `rest` starts.
    SequenceItem { rest: &'a str, offset: usize, column: usize },
    /// `key: value` with the value already unquoted.
    KeyValue { key: String, value: String },
    /// `key:` with nothing after it; its content is on the following lines.
    KeyBlock { key: String },
    Scalar(String),
}

/// Classifies one line of content. `line` is 1-based, `column` is the 0-based
/// char column where `content` starts.
pub fn classify<'a>(
    content: &'a str,
    line: usize,
    column: usize,
    options: &ParseOptions,
) -> Result<Payload<'a>, ModeError> {
    if let Some(after) = content.strip_prefix('-') {
        if after.is_empty() || after.starts_with([' ', '\t']) {
            let (gap, gap_bytes) = measure_indent(after, options.tab_width);
            let rest = &after[gap_bytes..];
            let rest = if rest.starts_with('#') { "" } else { rest };
            return Ok(Payload::SequenceItem {
                rest,
                offset: 1 + gap,
                column: column + 1 + gap_bytes,
            });
        }
    }

    if let Some(quote) = content.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let (text, tail) = read_quoted(content);
        let Some(tail) = tail else {
            return recover_unclosed(text, quote, line, column, options).map(Payload::Scalar);
        };

        return match KEY_TAIL.captures(tail) {
            Some(caps) => {
                let tail_column = column + char_offset(content, content.len() - tail.len());
                let rest = caps.get(1).map(|m| value_span(tail, m, tail_column));
                key_payload(text, rest, line, options)
            }
            None => Ok(Payload::Scalar(text)),
        };
    }

    match PLAIN_KEY.captures(content) {
        Some(caps) => {
            let key = caps[1].to_string();
            let rest = caps.get(2).map(|m| value_span(content, m, column));
            key_payload(key, rest, line, options)
        }
        None => Ok(Payload::Scalar(plain_scalar(content))),
    }
}

/// The text after a key's colon, left-trimmed, with the char column it starts at.
fn value_span<'s>(haystack: &'s str, m: regex::Match<'s>, column: usize) -> (&'s str, usize) {
    let raw = m.as_str();
    let trimmed = raw.trim_start();
    let start = m.start() + (raw.len() - trimmed.len());
    (trimmed, column + char_offset(haystack, start))
}

fn key_payload<'a>(
    key: String,
    rest: Option<(&str, usize)>,
    line: usize,
    options: &ParseOptions,
) -> Result<Payload<'a>, ModeError> {
    let value = match rest {
        Some((rest, column)) => read_value(rest, line, column, options)?,
        None => None,
    };

    Ok(match value {
        Some(value) => Payload::KeyValue { key, value },
        None => Payload::KeyBlock { key },
    })
}

/// Reads the text after `key:`. `None` means there is no inline value.
pub(crate) fn read_value(
    rest: &str,
    line: usize,
    column: usize,
    options: &ParseOptions,
) -> Result<Option<String>, ModeError> {
    let rest = rest.trim();
    if rest.is_empty() || rest.starts_with('#') {
        return Ok(None);
    }

    if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let (text, tail) = read_quoted(rest);
        return match tail {
            Some(_) => Ok(Some(text)),
            None => recover_unclosed(text, quote, line, column, options).map(Some),
        };
    }

    Ok(Some(plain_scalar(rest)))
}

/// Everything up to a `#`, right-trimmed.
fn plain_scalar(s: &str) -> String {
    let end = s.find('#').unwrap_or(s.len());
    s[..end].trim_end().to_string()
}

/// Reads a scalar opened by the quote at `s[0]`. `\X` always yields `X`.
/// The second element is whatever follows the closing quote, `None` if the
/// quote never closes.
fn read_quoted(s: &str) -> (String, Option<&str>) {
    let mut chars = s.char_indices();
    let quote = match chars.next() {
        Some((_, q)) => q,
        None => return (String::new(), None),
    };

    let mut text = String::new();
    while let Some((i, ch)) = chars.next() {
        if ch == quote {
            return (text, Some(&s[i + ch.len_utf8()..]));
        }
        if ch == '\\' {
            match chars.next() {
                Some((_, escaped)) => text.push(escaped),
                None => text.push('\\'),
            }
        } else {
            text.push(ch);
        }
    }
    (text, None)
}

fn recover_unclosed(
    text: String,
    quote: char,
    line: usize,
    column: usize,
    options: &ParseOptions,
) -> Result<String, ModeError> {
    if options.strict {
        return Err(ModeError::UnclosedString {
            quote,
            line,
            column: column + 1,
            hint: Some("Close the quoted value on the same line".into()),
            code: Some(103),
        });
    }
    tracing::warn!(line, column = column + 1, "unclosed quote, keeping the rest of the line");
    Ok(text)
}

fn char_offset(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}
