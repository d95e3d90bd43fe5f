/// Splits text into lines on any Unicode line boundary.
///
/// `\r\n` counts as a single boundary. A terminator at the very end of the
/// text does not produce a trailing empty line, matching [`str::lines`].
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + c.len_utf8();
        if c == '\r'
            && let Some(&(_, '\n')) = chars.peek()
        {
            chars.next();
            end += 1;
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
