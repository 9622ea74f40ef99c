//! Char-offset helpers shared by the mask modules.
//!
//! All engine offsets are char offsets, never byte offsets; these helpers do
//! the byte/char translation in one place.

use unicode_width::UnicodeWidthChar;

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

/// Everything from char offset `from` on.
pub fn suffix(value: &str, from: usize) -> &str {
    &value[byte_index_at_char(value, from)..]
}

/// Terminal cell column of a char caret, for collaborators that place a
/// hardware cursor in cells rather than chars.
pub fn display_col(value: &str, caret: usize) -> usize {
    value
        .chars()
        .take(caret)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_splits_on_char_offsets() {
        let value = "ab예-cd";
        assert_eq!(suffix(value, 0), value);
        assert_eq!(suffix(value, 3), "-cd");
        assert_eq!(suffix(value, 99), "");
    }

    #[test]
    fn display_col_counts_wide_chars_as_two_cells() {
        assert_eq!(display_col("ab예cd", 2), 2);
        assert_eq!(display_col("ab예cd", 3), 4);
        assert_eq!(display_col("ab예cd", 5), 6);
    }

}
