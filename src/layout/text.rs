use unicode_width::UnicodeWidthStr;

/// Number of output cells a line of text occupies.
pub fn text_width(line: &str) -> i32 {
    UnicodeWidthStr::width(line) as i32
}

/// Width (widest line) and height (line count) of a block of text in output cells.
pub fn cell_size(lines: &[String]) -> (i32, i32) {
    let width = lines.iter().map(|line| text_width(line)).max().unwrap_or(0);
    (width, lines.len() as i32)
}

/// Splits free-form text into output lines on `\n` and `\r\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}
