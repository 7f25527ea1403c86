use super::*;
use crate::cancel::{CancelToken, Uncancellable};
use std::cell::Cell;

fn palette_table() -> FlatThemeTable {
    [
        ("palette.primary.main", "#1976d2"),
        ("palette.secondary.main", "#9c27b0"),
    ]
    .into_iter()
    .collect()
}

fn full(text: &str) -> Span {
    Span::new(0, text.len())
}

#[test]
fn annotates_right_after_the_path() {
    let text = "${({theme}) => theme.palette.primary.main}";
    let annotations = annotate(
        text,
        full(text),
        &palette_table(),
        &ResolverConfig::default(),
        &Uncancellable,
    );
    assert_eq!(annotations.len(), 1);
    let annotation = &annotations[0];
    assert_eq!(annotation.label, "= #1976d2");
    assert_eq!(annotation.path, "palette.primary.main");
    assert_eq!(annotation.offset, text.rfind('}').expect("closing brace"));
}

#[test]
fn skips_unknown_and_non_scalar_paths() {
    let table = FlatThemeTable::from_iter([
        ("spacing", ThemeValue::Function { params: vec![] }),
        ("breakpoints.values", ThemeValue::List(vec![0.into(), 600.into()])),
        ("shape.borderRadius", ThemeValue::from(4)),
        ("transitions.reduced", ThemeValue::from(false)),
    ]);
    let text = concat!(
        "${theme.spacing} ${theme.breakpoints.values} ${theme.palette}\n",
        "${theme.shape.borderRadius} ${theme.transitions.reduced}",
    );
    let labels: Vec<String> = annotate(
        text,
        full(text),
        &table,
        &ResolverConfig::default(),
        &Uncancellable,
    )
    .into_iter()
    .map(|annotation| annotation.label)
    .collect();
    assert_eq!(labels, vec!["= 4", "= false"]);
}

#[test]
fn long_strings_are_truncated() {
    let table = FlatThemeTable::from_iter([(
        "typography.fontFamily",
        "\"Roboto\", \"Helvetica\", \"Arial\", sans-serif",
    )]);
    let config = ResolverConfig {
        max_label_width: 10,
        ..ResolverConfig::default()
    };
    let text = "font-family: ${theme.typography.fontFamily};";
    let annotations = annotate(text, full(text), &table, &config, &Uncancellable);
    assert_eq!(annotations[0].label, "= \"Roboto\", ...");
}

#[test]
fn restricted_to_the_visible_range() {
    let text = "${theme.palette.primary.main}\n${theme.palette.secondary.main}";
    let second_line = text.find('\n').expect("newline") + 1;
    let annotations = annotate(
        text,
        Span::new(second_line, text.len()),
        &palette_table(),
        &ResolverConfig::default(),
        &Uncancellable,
    );
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].path, "palette.secondary.main");
}

#[test]
fn cancelled_scan_is_a_prefix_of_the_full_scan() {
    let text = (0..6)
        .map(|idx| {
            if idx % 2 == 0 {
                "${theme.palette.primary.main}\n"
            } else {
                "${theme.palette.secondary.main}\n"
            }
        })
        .collect::<String>();
    let config = ResolverConfig::default();
    let table = palette_table();
    let complete = annotate(&text, full(&text), &table, &config, &Uncancellable);
    assert_eq!(complete.len(), 6);

    for budget in 0u32..=7 {
        let left = Cell::new(budget);
        let cancel = || {
            let remaining = left.get();
            left.set(remaining.saturating_sub(1));
            remaining == 0
        };
        let partial = annotate(&text, full(&text), &table, &config, &cancel);
        assert!(partial.len() <= complete.len());
        assert_eq!(partial[..], complete[..partial.len()]);
    }

    let token = CancelToken::new();
    token.cancel();
    assert!(annotate(&text, full(&text), &table, &config, &token).is_empty());
}
