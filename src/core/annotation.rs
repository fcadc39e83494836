//! Instructional comment header for the scratch file.
//!
//! Composite kinds prepend a short explanation to the editable text. Before
//! the edit is parsed, every comment line is removed again. The filter is
//! line-oriented: a line whose first non-whitespace byte is [`COMMENT_MARKER`]
//! is dropped wherever it appears, not only inside the header.

pub const COMMENT_MARKER: u8 = b'#';
pub const COMMENT_PREFIX: &str = "# ";
pub const WRAP_WIDTH: usize = 79;

/// Word-wrap `description` into `# `-prefixed lines. `width` bounds the
/// text of each line; the prefix is not counted.
///
/// Newlines in `description` are treated as ordinary word breaks. A word
/// longer than the available width gets a line of its own.
pub fn render_header(description: &str, width: usize) -> String {
    let budget = width.max(1);
    let mut out = String::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in description.split_whitespace() {
        let word_width = word.chars().count();
        if line_width > 0 && line_width + 1 + word_width > budget {
            push_comment(&mut out, &line);
            line.clear();
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }
    if line_width > 0 {
        push_comment(&mut out, &line);
    }
    out
}

fn push_comment(out: &mut String, line: &str) {
    out.push_str(COMMENT_PREFIX);
    out.push_str(line);
    out.push('\n');
}

pub fn is_comment_line(line: &[u8]) -> bool {
    line.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == COMMENT_MARKER)
}

/// Remove every comment line, terminator included. All other bytes are kept
/// exactly as they were.
pub fn strip(text: &[u8]) -> Vec<u8> {
    text.split_inclusive(|b| *b == b'\n')
        .filter(|line| !is_comment_line(line))
        .flatten()
        .copied()
        .collect()
}
