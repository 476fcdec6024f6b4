//! Position/range conversions between `modls-base`'s byte-offset
//! `Point`/`Span` and LSP's UTF-16-ish `Position`/`Range`.

use modls::core::{Point, Span};
use tower_lsp::lsp_types::{Position, Range, Url};

pub fn uri_to_path(uri: &Url) -> Option<std::path::PathBuf> {
    uri.to_file_path().ok()
}

fn nth_line(text: &str, line: usize) -> &str {
    text.split('\n').nth(line).unwrap_or("")
}

/// Converts an LSP `Position` to a `(line, byte_column)` pair within
/// `text`, treating `position.character` as a count of `char`s on that
/// line rather than strict UTF-16 code units (Modelica identifiers are
/// ASCII per the grammar, so the two counts coincide in practice).
pub fn position_to_byte_column(text: &str, position: Position) -> (usize, usize) {
    let line = position.line as usize;
    let line_text = nth_line(text, line);
    let byte_column = line_text
        .chars()
        .take(position.character as usize)
        .map(char::len_utf8)
        .sum();
    (line, byte_column)
}

fn point_to_lsp_position(text: &str, point: &Point) -> Position {
    let line_text = nth_line(text, point.line);
    let character = line_text
        .char_indices()
        .take_while(|(byte, _)| *byte < point.column)
        .count();
    Position {
        line: point.line as u32,
        character: character as u32,
    }
}

pub fn span_to_lsp_range(text: &str, span: &Span) -> Range {
    Range {
        start: point_to_lsp_position(text, &span.start),
        end: point_to_lsp_position(text, &span.end),
    }
}
