//! Recognises theme access expressions in free-form source text.
//!
//! Accepted forms, with `PATH` possibly empty or cut off mid-segment:
//!
//! ```text
//! theme.PATH
//! props.theme.PATH
//! ({ ..., theme, ... }) => theme.PATH
//! (p) => p.theme.PATH
//! ```
//!
//! Anything that rebinds `theme` under another name, or reaches it through
//! a longer member chain, is not matched.

use crate::{
    span::Span,
    text::{is_ident_char, prev_char_boundary},
};
use serde::Serialize;

mod grammar;

use grammar::{
    arrow_head, styled_tag, theme_access, theme_binding, ArrowParam, ThemeBinding,
};
pub use grammar::{PROPS_KEYWORD, THEME_KEYWORD};

/// How far back an arrow-function head may start before the access it owns.
const ARROW_LOOKBEHIND: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PrefixKind {
    Direct,
    PropsQualified,
    ArrowDestructured,
    AliasedArrow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessExpression {
    /// Whole expression, including any arrow head or `props.` qualifier.
    pub span: Span,
    pub kind: PrefixKind,
    pub path_span: Span,
    pub path: String,
}

impl AccessExpression {
    pub fn path_end(&self) -> usize {
        self.path_span.end
    }

    /// Path text typed before `offset`, clamped to the path span.
    pub fn typed_prefix<'a>(&self, text: &'a str, offset: usize) -> &'a str {
        let end = offset.clamp(self.path_span.start, self.path_span.end);
        text.get(self.path_span.start..end).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointMatch {
    pub expression: AccessExpression,
    pub typed: String,
}

/// Point query: the access expression whose path covers or ends right at
/// `offset`.
pub fn expression_at(text: &str, offset: usize) -> Option<PointMatch> {
    if offset > text.len() {
        return None;
    }
    let offset = prev_char_boundary(text, offset);
    let line_start = text[..offset].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let expression = AccessScanner::new(text, Span::new(line_start, offset + 1))
        .filter(|expr| expr.path_span.touches(offset))
        .max_by_key(|expr| expr.span.len())?;
    let typed = expression.typed_prefix(text, offset).to_string();
    Some(PointMatch { expression, typed })
}

/// Range query: every access expression whose `theme` keyword starts in `range`.
pub fn expressions_in(text: &str, range: Span) -> Vec<AccessExpression> {
    AccessScanner::new(text, range).collect()
}

/// True when `text` contains a styled-components style tag at an
/// identifier boundary.
pub fn has_styled_tag(text: &str) -> bool {
    let bytes = text.as_bytes();
    text.char_indices().any(|(idx, ch)| {
        matches!(ch, 's' | 'c' | 'k')
            && (idx == 0 || !is_ident_char(bytes[idx - 1]))
            && styled_tag(&text[idx..]).is_ok()
    })
}

/// Lazily walks `theme.` occurrences in a window, yielding the ones that
/// form a recognised accessor.
pub struct AccessScanner<'a> {
    text: &'a str,
    cursor: usize,
    end: usize,
}

impl<'a> AccessScanner<'a> {
    pub fn new(text: &'a str, range: Span) -> Self {
        let range = range.clamp_to(text.len());
        Self {
            text,
            cursor: prev_char_boundary(text, range.start),
            end: range.end,
        }
    }

    fn next_keyword(&mut self) -> Option<usize> {
        if self.cursor >= self.end {
            return None;
        }
        let found = match self.text[self.cursor..].find(THEME_KEYWORD) {
            Some(idx) if self.cursor + idx < self.end => self.cursor + idx,
            _ => {
                self.cursor = self.end;
                return None;
            }
        };
        self.cursor = found + THEME_KEYWORD.len();
        Some(found)
    }
}

impl Iterator for AccessScanner<'_> {
    type Item = AccessExpression;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(keyword) = self.next_keyword() {
            if let Some(expression) = classify(self.text, keyword) {
                self.cursor = self.cursor.max(expression.path_end());
                return Some(expression);
            }
        }
        None
    }
}

fn classify(text: &str, keyword: usize) -> Option<AccessExpression> {
    let (rest, path) = theme_access(&text[keyword..]).ok()?;
    let path_end = text.len() - rest.len();
    let path_span = Span::new(path_end - path.len(), path_end);
    let bytes = text.as_bytes();

    let (start, kind) = match keyword.checked_sub(1).map(|idx| bytes[idx]) {
        Some(ch) if is_ident_char(ch) => return None,
        Some(b'.') => qualified_start(text, keyword - 1)?,
        _ => match arrow_before(text, keyword) {
            ArrowHead::Found(head, ArrowParam::Destructured(pattern)) => {
                match theme_binding(pattern) {
                    ThemeBinding::Bound => (head, PrefixKind::ArrowDestructured),
                    ThemeBinding::Renamed => return None,
                    ThemeBinding::Absent => (keyword, PrefixKind::Direct),
                }
            }
            // A parameter list we cannot read may rebind `theme`.
            ArrowHead::Unreadable => return None,
            ArrowHead::Found(_, ArrowParam::Ident(_)) | ArrowHead::Absent => {
                (keyword, PrefixKind::Direct)
            }
        },
    };

    Some(AccessExpression {
        span: Span::new(start, path_end),
        kind,
        path_span,
        path: path.to_string(),
    })
}

/// Handles `IDENT.theme.`: either `props.theme.` or an aliased arrow
/// parameter `(p) => p.theme.`.
fn qualified_start(text: &str, dot: usize) -> Option<(usize, PrefixKind)> {
    let bytes = text.as_bytes();
    let mut start = dot;
    while start > 0 && is_ident_char(bytes[start - 1]) {
        start -= 1;
    }
    let qualifier = &text[start..dot];
    if qualifier.is_empty() {
        return None;
    }
    if qualifier == PROPS_KEYWORD {
        return Some((start, PrefixKind::PropsQualified));
    }
    if start > 0 && bytes[start - 1] == b'.' {
        return None;
    }
    match arrow_before(text, start) {
        ArrowHead::Found(head, ArrowParam::Ident(param)) if param == qualifier => {
            Some((head, PrefixKind::AliasedArrow))
        }
        _ => None,
    }
}

enum ArrowHead<'a> {
    /// Nothing of the form `) =>` precedes the body.
    Absent,
    /// `) =>` precedes the body but its parameter list does not parse.
    Unreadable,
    Found(usize, ArrowParam<'a>),
}

/// Finds an arrow head `( ... ) =>` ending (modulo whitespace) exactly at
/// `body`, returning where the head starts.
fn arrow_before(text: &str, body: usize) -> ArrowHead<'_> {
    let before = text[..body].trim_end();
    let Some(before) = before.strip_suffix("=>") else {
        return ArrowHead::Absent;
    };
    let Some(close) = before.trim_end().strip_suffix(')').map(str::len) else {
        return ArrowHead::Absent;
    };
    let floor = prev_char_boundary(text, close.saturating_sub(ARROW_LOOKBEHIND));
    let Some(open) = matching_open_paren(text, floor, close) else {
        return ArrowHead::Unreadable;
    };
    match arrow_head(&text[open..]) {
        Ok((rest, param)) if text.len() - rest.len() == body => ArrowHead::Found(open, param),
        _ => ArrowHead::Unreadable,
    }
}

/// Walks back from the `)` at `close` to its partner, no further than `floor`.
fn matching_open_paren(text: &str, floor: usize, close: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for idx in (floor..close).rev() {
        match bytes[idx] {
            b')' => depth += 1,
            b'(' if depth == 0 => return Some(idx),
            b'(' => depth -= 1,
            _ => {}
        }
    }
    None
}
