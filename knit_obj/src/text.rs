//! Line-level helpers shared by the record parsers.

use crate::{Error, Result};

/// Characters stripped around a record.
const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r'];

/// Splits the buffer on `\n` without copying.
/// There is always one more line than there are delimiters.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Drops the comment starting at the first `#`, then surrounding whitespace.
pub fn trim_record(line: &str) -> &str {
    let uncommented = match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    };
    uncommented.trim_matches(WHITESPACE)
}

/// Counts occurrences of `c` in `s`.
pub fn count_char(s: &str, c: char) -> usize {
    s.chars().filter(|&x| x == c).count()
}

/// Splits a trimmed record into its tag and the payload after it.
pub fn split_tag(line: &str) -> (&str, &str) {
    match line.find(WHITESPACE) {
        Some(index) => (&line[..index], line[index..].trim_start_matches(WHITESPACE)),
        None => (line, ""),
    }
}

/// Splits a payload into space-separated fields.
/// The field count is the separator count plus one; an empty payload has none.
/// Tabs are not separators; callers reject them with `check_separators`.
pub(crate) fn fields(payload: &str) -> impl Iterator<Item = &str> {
    let mut split = payload.split(' ');
    if payload.is_empty() {
        split.next();
    }
    split
}

/// Fails when a tab appears between fields.
pub(crate) fn check_separators(payload: &str) -> Result<()> {
    if payload.contains('\t') {
        return Err(Error::TabSeparated(payload.into()));
    }
    Ok(())
}

/// Number of fields `fields` will yield.
pub(crate) fn field_count(payload: &str) -> usize {
    if payload.is_empty() {
        0
    } else {
        1 + count_char(payload, ' ')
    }
}
