use crate::span::Span;
use lsp_types::{Position, Range};

pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut line = 0u32;
    let mut col = 0u32;
    for (idx, ch) in text.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    Position::new(line, col)
}

pub fn position_to_offset(text: &str, position: Position) -> usize {
    let mut offset = 0usize;
    for (current_line, line) in text.split_inclusive('\n').enumerate() {
        let current_line: u32 = current_line.try_into().unwrap_or(u32::MAX);
        if current_line == position.line {
            let mut col_bytes = 0usize;
            for ch in line
                .trim_end_matches('\n')
                .chars()
                .take(position.character as usize)
            {
                col_bytes += ch.len_utf8();
            }
            offset += col_bytes;
            return offset;
        }
        offset += line.len();
    }
    text.len()
}

pub fn span_to_range(text: &str, span: Span) -> Range {
    let span = span.clamp_to(text.len());
    Range {
        start: offset_to_position(text, span.start),
        end: offset_to_position(text, span.end),
    }
}

pub fn range_to_span(text: &str, range: &Range) -> Option<Span> {
    let start = position_to_offset(text, range.start);
    let end = position_to_offset(text, range.end);
    if start <= end && end <= text.len() {
        Some(Span::new(start, end))
    } else {
        None
    }
}

pub fn is_ident_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$'
}

pub fn prev_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx > text.len() {
        idx = text.len();
    }
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Dotted identifier run (`a.b.c`) around `offset`, without leading or
/// trailing dots.
pub fn dotted_run_at(text: &str, offset: usize) -> Option<Span> {
    let bytes = text.as_bytes();
    let offset = prev_char_boundary(text, offset);
    let is_run_char = |ch: u8| is_ident_char(ch) || ch == b'.';
    let mut start = offset;
    while start > 0 && is_run_char(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = offset;
    while end < bytes.len() && is_run_char(bytes[end]) {
        end += 1;
    }
    while start < end && bytes[start] == b'.' {
        start += 1;
    }
    while end > start && bytes[end - 1] == b'.' {
        end -= 1;
    }
    if start == end || !(start..=end).contains(&offset) {
        None
    } else {
        Some(Span::new(start, end))
    }
}

/// Byte span covering the line holding `offset` plus `radius` lines on each side.
pub fn line_window(text: &str, offset: usize, radius: usize) -> Span {
    let bytes = text.as_bytes();
    let offset = prev_char_boundary(text, offset);
    let mut start = offset;
    let mut seen = 0usize;
    while start > 0 {
        if bytes[start - 1] == b'\n' {
            if seen == radius {
                break;
            }
            seen += 1;
        }
        start -= 1;
    }
    let mut end = offset;
    let mut seen = 0usize;
    while end < bytes.len() {
        if bytes[end] == b'\n' {
            if seen == radius {
                break;
            }
            seen += 1;
        }
        end += 1;
    }
    Span::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_round_trip_through_offsets() {
        let text = "const a = 1;\nconst Title = styled.h1`\n  color: red;\n`";
        let offset = text.find("styled").expect("styled");
        let position = offset_to_position(text, offset);
        assert_eq!(position, Position::new(1, 14));
        assert_eq!(position_to_offset(text, position), offset);
    }

    #[test]
    fn visible_range_maps_to_span() {
        let text = "a\nbb\nccc";
        let range = Range {
            start: Position::new(1, 0),
            end: Position::new(2, 3),
        };
        assert_eq!(range_to_span(text, &range), Some(Span::new(2, text.len())));
        let inverted = Range {
            start: range.end,
            end: range.start,
        };
        assert_eq!(range_to_span(text, &inverted), None);
    }

    #[test]
    fn dotted_run_trims_dots() {
        let text = "x = .palette.primary. + 1";
        let offset = text.find("primary").expect("primary");
        let span = dotted_run_at(text, offset).expect("run");
        assert_eq!(&text[span.start..span.end], "palette.primary");
        assert!(dotted_run_at(text, text.find('=').expect("eq")).is_none());
    }

    #[test]
    fn line_window_expands_by_radius() {
        let text = "a\nb\nc\nd\ne";
        let offset = text.find('c').expect("c");
        let span = line_window(text, offset, 1);
        assert_eq!(&text[span.start..span.end], "b\nc\nd");
        let all = line_window(text, offset, 10);
        assert_eq!(all, Span::new(0, text.len()));
    }
}
