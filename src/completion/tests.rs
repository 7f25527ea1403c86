use super::*;
use std::cell::Cell;

fn mixed_table() -> FlatThemeTable {
    FlatThemeTable::from_iter([
        ("palette.primary.main", ThemeValue::from("#1976d2")),
        ("typography.fontSize", ThemeValue::from(14)),
    ])
}

fn palette_table() -> FlatThemeTable {
    [
        ("palette.primary.main", "#1976d2"),
        ("palette.secondary.main", "#9c27b0"),
    ]
    .into_iter()
    .collect()
}

fn shape(suggestions: &[Suggestion]) -> Vec<(&str, bool)> {
    suggestions
        .iter()
        .map(|s| (s.segment.as_str(), s.is_intermediate))
        .collect()
}

#[test]
fn empty_prefix_lists_first_level_segments() {
    let suggestions = complete("", &mixed_table());
    assert_eq!(shape(&suggestions), vec![("palette", true), ("typography", true)]);
    assert!(suggestions.iter().all(|s| s.value.is_none()));
}

#[test]
fn dotted_prefix_lists_children() {
    let suggestions = complete("palette.", &palette_table());
    assert_eq!(shape(&suggestions), vec![("primary", true), ("secondary", true)]);
    assert_eq!(suggestions[1].full_path, "palette.secondary");
}

#[test]
fn leaf_segments_are_terminal_with_value() {
    let suggestions = complete("palette.primary.", &palette_table());
    assert_eq!(
        suggestions,
        vec![Suggestion {
            segment: "main".into(),
            is_intermediate: false,
            full_path: "palette.primary.main".into(),
            value: Some(ThemeValue::from("#1976d2")),
        }]
    );
}

#[test]
fn mid_segment_prefix_matches_node_boundary() {
    let table = palette_table();
    assert_eq!(complete("palette.pri", &table), complete("palette.", &table));
    assert_eq!(complete("pal", &table), complete("", &table));
    assert_eq!(node_boundary("palette.pri"), ("palette.", "pri"));
    assert_eq!(node_boundary("pal"), ("", "pal"));
}

#[test]
fn deeper_leaves_collapse_to_one_suggestion() {
    let table: FlatThemeTable = [
        ("palette.grey.50", "#fafafa"),
        ("palette.grey.100", "#f5f5f5"),
        ("palette.divider", "rgba(0, 0, 0, 0.12)"),
        ("palette.grey.A100", "#f5f5f5"),
    ]
    .into_iter()
    .collect();
    let suggestions = complete("palette.", &table);
    assert_eq!(shape(&suggestions), vec![("grey", true), ("divider", false)]);
}

#[test]
fn order_follows_table_not_alphabet() {
    let table: FlatThemeTable = [("zIndex.modal", 1300), ("breakpoints.unit", 8)]
        .into_iter()
        .map(|(path, value)| (path, ThemeValue::from(value)))
        .collect();
    let segments: Vec<String> = complete("", &table)
        .into_iter()
        .map(|s| s.segment)
        .collect();
    assert_eq!(segments, vec!["zIndex", "breakpoints"]);
}

#[test]
fn unknown_prefix_yields_nothing() {
    assert!(complete("shadows.", &palette_table()).is_empty());
    assert!(complete("palette.primary.main.", &palette_table()).is_empty());
}

#[test]
fn cancellation_keeps_a_prefix_of_the_full_result() {
    let table: FlatThemeTable = [
        ("a.x", "1"),
        ("b.x", "2"),
        ("c", "3"),
        ("d.y", "4"),
    ]
    .into_iter()
    .collect();
    let full = complete("", &table);
    let budget = Cell::new(2u32);
    let cancel = || {
        let left = budget.get();
        budget.set(left.saturating_sub(1));
        left == 0
    };
    let partial = complete_with("", &table, &cancel);
    assert_eq!(partial.len(), 2);
    assert_eq!(partial[..], full[..2]);
}

#[test]
fn completion_at_cursor_inside_template() {
    let text = "const Button = styled.button`\n  color: ${({ theme }) => theme.palette.pri}\n`;";
    let offset = text.find("pri}").map(|idx| idx + 3).expect("cursor");
    let ctx = completion_at(text, offset, &palette_table(), &Uncancellable).expect("context");
    assert_eq!(ctx.typed_prefix, "palette.pri");
    assert_eq!(&text[ctx.replace.start..ctx.replace.end], "pri");
    assert_eq!(shape(&ctx.suggestions), vec![("primary", true), ("secondary", true)]);
}

#[test]
fn completion_right_after_accessor_dot() {
    let text = "${props.theme.}";
    let offset = text.find('}').expect("close brace");
    let ctx = completion_at(text, offset, &palette_table(), &Uncancellable).expect("context");
    assert!(ctx.replace.is_empty());
    assert_eq!(shape(&ctx.suggestions), vec![("palette", true)]);
}

#[test]
fn completion_outside_accessor_is_none() {
    let text = "const palette = {};";
    assert!(completion_at(text, 10, &palette_table(), &Uncancellable).is_none());
}
