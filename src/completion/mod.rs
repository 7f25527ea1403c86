use crate::{
    cancel::{Cancel, Uncancellable},
    matcher::{expression_at, AccessExpression},
    span::Span,
    theme::{FlatThemeTable, ThemeValue},
};
use indexmap::IndexMap;
use serde::Serialize;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub segment: String,
    /// More segments follow; the caller should re-trigger completion after inserting.
    pub is_intermediate: bool,
    pub full_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ThemeValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionContext {
    pub expression: AccessExpression,
    pub typed_prefix: String,
    /// The partially typed segment the chosen suggestion replaces.
    pub replace: Span,
    pub suggestions: Vec<Suggestion>,
}

/// Splits a typed path into the last node boundary (up to and including the
/// final `.`) and the partial segment after it.
pub fn node_boundary(typed: &str) -> (&str, &str) {
    match typed.rfind('.') {
        Some(idx) => typed.split_at(idx + 1),
        None => ("", typed),
    }
}

pub fn complete(typed_prefix: &str, table: &FlatThemeTable) -> Vec<Suggestion> {
    complete_with(typed_prefix, table, &Uncancellable)
}

/// Next-segment suggestions below the node `typed_prefix` sits in, in table
/// order. Stops early (keeping what it has) once `cancel` fires.
pub fn complete_with(
    typed_prefix: &str,
    table: &FlatThemeTable,
    cancel: &impl Cancel,
) -> Vec<Suggestion> {
    let (boundary, _) = node_boundary(typed_prefix);
    // segment -> (has deeper keys, leaf value)
    let mut segments: IndexMap<&str, (bool, Option<&ThemeValue>)> = IndexMap::new();

    for (path, value) in table.iter() {
        if cancel.is_cancelled() {
            break;
        }
        let Some(rest) = path.strip_prefix(boundary) else {
            continue;
        };
        let (segment, deeper) = match rest.find('.') {
            Some(idx) => (&rest[..idx], true),
            None => (rest, false),
        };
        if segment.is_empty() {
            continue;
        }
        let slot = segments.entry(segment).or_insert((false, None));
        if deeper {
            slot.0 = true;
        } else {
            slot.1 = Some(value);
        }
    }

    segments
        .into_iter()
        .map(|(segment, (is_intermediate, value))| {
            Suggestion {
                segment: segment.to_string(),
                is_intermediate,
                full_path: format!("{boundary}{segment}"),
                value: if is_intermediate { None } else { value.cloned() },
            }
        })
        .collect()
}

/// Completion at a cursor inside an access expression.
pub fn completion_at(
    text: &str,
    offset: usize,
    table: &FlatThemeTable,
    cancel: &impl Cancel,
) -> Option<CompletionContext> {
    let hit = expression_at(text, offset)?;
    let (_, partial) = node_boundary(&hit.typed);
    let replace_end = hit.expression.path_span.start + hit.typed.len();
    let replace = Span::new(replace_end - partial.len(), replace_end);
    let suggestions = complete_with(&hit.typed, table, cancel);
    tracing::trace!(
        typed = %hit.typed,
        count = suggestions.len(),
        "theme path completion"
    );
    Some(CompletionContext {
        expression: hit.expression,
        typed_prefix: hit.typed,
        replace,
        suggestions,
    })
}
