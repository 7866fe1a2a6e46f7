//! Integration tests: lint rules against realistic Inkscape exports.

use sr_core::lint::has_errors;
use sr_core::{LintSeverity, lint_markup};

#[test]
fn complete_export_only_notes_background() {
    let diags = lint_markup(include_str!("fixtures/layered.svg"));
    assert_eq!(diags.len(), 1, "got: {diags:?}");
    assert_eq!(diags[0].rule, "unknown-label");
    assert!(diags[0].message.contains("Background"));
    assert!(!has_errors(&diags));
}

#[test]
fn partial_export_warns_per_missing_layer() {
    let diags = lint_markup(include_str!("fixtures/partial.svg"));
    let missing: Vec<&str> = diags
        .iter()
        .filter(|d| d.rule == "missing-layer")
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(missing.len(), 2);
    assert!(missing[0].contains("0007D3"));
    assert!(missing[1].contains("0011D5"));
    assert!(
        diags
            .iter()
            .all(|d| d.severity != LintSeverity::Error)
    );
}

#[test]
fn error_page_has_no_root() {
    let diags = lint_markup(include_str!("fixtures/not_found.html"));
    assert!(has_errors(&diags));
    assert_eq!(diags[0].rule, "no-svg-root");
}
