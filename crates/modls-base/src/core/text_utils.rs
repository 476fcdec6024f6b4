//! Text manipulation utilities for working with source code.

use crate::core::Point;

/// Maps between byte offsets and (line, column) positions for one text
/// buffer. Built once per `Document` update and used by both the
/// incremental-edit machinery (spec.md §4.3) and cursor identification
/// (spec.md §4.5.4).
///
/// Columns are UTF-8 byte offsets within the line, matching the byte
/// offsets the syntax tree's nodes carry — not character or UTF-16 code
/// unit counts.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line.
    line_starts: Vec<usize>,
    text_len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            text_len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a `Point`. Offsets past the end of the
    /// buffer clamp to the last valid position.
    pub fn point_at_offset(&self, offset: usize) -> Point {
        let offset = offset.min(self.text_len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };
        let column = offset - self.line_starts[line];
        Point::new(line, column, offset)
    }

    /// Converts a (line, column) position to a byte offset. Returns `None`
    /// if the line is out of range; a column past the end of its line
    /// clamps to the buffer's length (or the next line's start, whichever
    /// is smaller), mirroring how editors report positions past the end of
    /// a line during incremental edits.
    pub fn offset_at_position(&self, line: usize, column: usize) -> Option<usize> {
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text_len);
        Some((line_start + column).min(line_end).min(self.text_len))
    }
}

#[cfg(test)]
mod line_index_tests {
    use super::*;

    #[test]
    fn single_line() {
        let idx = LineIndex::new("hello");
        assert_eq!(idx.line_count(), 1);
        assert_eq!(idx.point_at_offset(3), Point::new(0, 3, 3));
        assert_eq!(idx.offset_at_position(0, 3), Some(3));
    }

    #[test]
    fn multi_line_round_trip() {
        let text = "abc\ndef\nghi";
        let idx = LineIndex::new(text);
        assert_eq!(idx.line_count(), 3);

        for (line, col, expected_offset) in [
            (0, 0, 0),
            (0, 2, 2),
            (1, 0, 4),
            (1, 2, 6),
            (2, 0, 8),
            (2, 2, 10),
        ] {
            let offset = idx.offset_at_position(line, col).unwrap();
            assert_eq!(offset, expected_offset);
            let point = idx.point_at_offset(offset);
            assert_eq!((point.line, point.column), (line, col));
        }
    }

    #[test]
    fn offset_at_position_out_of_range_line() {
        let idx = LineIndex::new("abc\ndef");
        assert_eq!(idx.offset_at_position(5, 0), None);
    }

    #[test]
    fn point_at_offset_clamps_past_end() {
        let idx = LineIndex::new("abc");
        assert_eq!(idx.point_at_offset(100), Point::new(0, 3, 3));
    }
}
