/// Width of the leading run of spaces and tabs, and the byte offset where it ends.
pub(super) fn measure_indent(raw: &str, tab_width: usize) -> (usize, usize) {
    let mut width = 0;
    let mut offset = 0;
    for b in raw.bytes() {
        match b {
            b' ' => width += 1,
            b'\t' => width += tab_width,
            _ => break,
        }
        offset += 1;
    }
    (width, offset)
}

pub(super) fn trim_trailing(s: &str) -> &str {
    s.trim_end_matches([' ', '\t', '\r'])
}

pub(super) fn is_comment(content: &str) -> bool {
    content.starts_with('#')
}

/// `Some(prefix)` holding the first `limit` chars when `content` is longer.
pub(super) fn cap_length(content: &str, limit: usize) -> Option<&str> {
    content
        .char_indices()
        .nth(limit)
        .map(|(cut, _)| &content[..cut])
}
