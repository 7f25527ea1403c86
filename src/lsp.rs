//! Conversions from resolver records to `lsp-types` payloads.

use crate::{
    completion::CompletionContext,
    hover::{Confidence, HoverResult},
    inlay::Annotation,
    text::{offset_to_position, span_to_range},
    theme::ThemeValue,
};
use lsp_types::{
    Command, CompletionItem, CompletionItemKind, CompletionTextEdit, Hover, HoverContents,
    InlayHint, InlayHintKind, InlayHintLabel, InlayHintTooltip, MarkupContent, MarkupKind,
    TextEdit,
};

pub const RETRIGGER_COMMAND: &str = "editor.action.triggerSuggest";

pub fn completion_items(text: &str, ctx: &CompletionContext) -> Vec<CompletionItem> {
    let range = span_to_range(text, ctx.replace);
    ctx.suggestions
        .iter()
        .enumerate()
        .map(|(idx, suggestion)| {
            let (new_text, kind, command) = if suggestion.is_intermediate {
                (
                    format!("{}.", suggestion.segment),
                    CompletionItemKind::MODULE,
                    Some(Command {
                        title: "Suggest".into(),
                        command: RETRIGGER_COMMAND.into(),
                        arguments: None,
                    }),
                )
            } else {
                (
                    suggestion.segment.clone(),
                    value_kind(suggestion.value.as_ref()),
                    None,
                )
            };
            CompletionItem {
                label: suggestion.segment.clone(),
                kind: Some(kind),
                detail: suggestion.value.as_ref().map(ToString::to_string),
                sort_text: Some(format!("{idx:05}")),
                filter_text: Some(suggestion.segment.clone()),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit { range, new_text })),
                command,
                ..CompletionItem::default()
            }
        })
        .collect()
}

fn value_kind(value: Option<&ThemeValue>) -> CompletionItemKind {
    match value {
        Some(ThemeValue::String(text)) if text.starts_with('#') => CompletionItemKind::COLOR,
        Some(ThemeValue::Function { .. }) => CompletionItemKind::FUNCTION,
        _ => CompletionItemKind::VALUE,
    }
}

pub fn hover_contents(text: &str, result: &HoverResult) -> Hover {
    let mut value = format!(
        "**theme.{}**\n\n```\n{}\n```",
        result.path, result.value
    );
    if result.confidence == Confidence::Inferred {
        value.push_str(
            "\n\n_Inferred: this token matches a theme path but is not read from `theme` directly._",
        );
    }
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(span_to_range(text, result.span)),
    }
}

pub fn inlay_hints(text: &str, annotations: &[Annotation]) -> Vec<InlayHint> {
    annotations
        .iter()
        .map(|annotation| InlayHint {
            position: offset_to_position(text, annotation.offset),
            label: InlayHintLabel::String(annotation.label.clone()),
            kind: Some(InlayHintKind::TYPE),
            text_edits: None,
            tooltip: Some(InlayHintTooltip::String(format!("theme.{}", annotation.path))),
            padding_left: Some(true),
            padding_right: None,
            data: None,
        })
        .collect()
}
