use crate::{
    cancel::Cancel,
    config::ResolverConfig,
    matcher::AccessScanner,
    span::Span,
    theme::{FlatThemeTable, ThemeValue},
};
use serde::Serialize;

#[cfg(test)]
mod tests;

pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Byte offset right after the annotated path.
    pub offset: usize,
    pub label: String,
    pub path: String,
    pub value: ThemeValue,
}

/// Inline value labels for every resolvable accessor in `range`, in text
/// order. A cancelled scan returns what it has so far.
pub fn annotate(
    text: &str,
    range: Span,
    table: &FlatThemeTable,
    config: &ResolverConfig,
    cancel: &impl Cancel,
) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    for expression in AccessScanner::new(text, range) {
        if cancel.is_cancelled() {
            tracing::trace!(done = annotations.len(), "inlay scan cancelled");
            break;
        }
        let Some(value) = table.get(&expression.path) else {
            continue;
        };
        if !value.is_scalar() {
            continue;
        }
        annotations.push(Annotation {
            offset: expression.path_end(),
            label: format!("{}{}", config.label_prefix, display_value(value, config)),
            path: expression.path,
            value: value.clone(),
        });
    }
    annotations
}

fn display_value(value: &ThemeValue, config: &ResolverConfig) -> String {
    match value {
        ThemeValue::String(text) => truncate(text, config.max_label_width),
        other => other.to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width).collect();
    short.push_str(ELLIPSIS);
    short
}
