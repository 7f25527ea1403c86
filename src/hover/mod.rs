use crate::{
    config::ResolverConfig,
    matcher::{expression_at, has_styled_tag},
    span::Span,
    text::{dotted_run_at, line_window},
    theme::{FlatThemeTable, ThemeValue},
};
use serde::Serialize;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Confidence {
    /// Reached through a recognised `theme.` accessor.
    High,
    /// A bare token that happens to equal a table path inside styled CSS.
    Inferred,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverResult {
    pub path: String,
    pub value: ThemeValue,
    pub confidence: Confidence,
    /// Source text the result describes.
    pub span: Span,
}

pub fn hover(
    text: &str,
    offset: usize,
    table: &FlatThemeTable,
    config: &ResolverConfig,
) -> Option<HoverResult> {
    accessor_hover(text, offset, table).or_else(|| inferred_hover(text, offset, table, config))
}

/// Resolves the accessor path up to the end of the hovered segment.
fn accessor_hover(text: &str, offset: usize, table: &FlatThemeTable) -> Option<HoverResult> {
    let hit = expression_at(text, offset)?;
    let expression = hit.expression;
    let typed = hit.typed.len();
    let segment_end = expression.path[typed..]
        .find('.')
        .map_or(expression.path.len(), |idx| typed + idx);
    let path = expression.path[..segment_end].trim_end_matches('.');
    let value = table.get(path)?;
    Some(HoverResult {
        path: path.to_string(),
        value: value.clone(),
        confidence: Confidence::High,
        span: Span::new(
            expression.path_span.start,
            expression.path_span.start + path.len(),
        ),
    })
}

fn inferred_hover(
    text: &str,
    offset: usize,
    table: &FlatThemeTable,
    config: &ResolverConfig,
) -> Option<HoverResult> {
    let run = dotted_run_at(text, offset)?;
    let token = &text[run.start..run.end];
    let value = table.get(token)?;
    let window = line_window(text, offset, config.hover_line_window);
    let nearby = &text[window.start..window.end];
    if !nearby.contains("${") || !has_styled_tag(nearby) {
        return None;
    }
    tracing::trace!(path = token, "inferred theme hover");
    Some(HoverResult {
        path: token.to_string(),
        value: value.clone(),
        confidence: Confidence::Inferred,
        span: run,
    })
}
