//! Fixed column slicing

/// Header labels start at this column
pub(crate) const LABEL_OFFSET: usize = 60;

/// Returns the `[start, end)` column range of `line`, clamped to its length.
/// Ranges that do not fall on character boundaries come back empty,
/// which callers treat like missing content.
pub(crate) fn columns(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    let start = start.min(end);
    line.get(start..end).unwrap_or("")
}

/// Returns the trimmed header label of `line`, which is empty
/// for lines that do not reach the label columns.
pub(crate) fn label(line: &str) -> &str {
    columns(line, LABEL_OFFSET, line.len()).trim()
}
