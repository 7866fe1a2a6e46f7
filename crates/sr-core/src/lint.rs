//! Lint diagnostics for layered SVG files.
//!
//! Reports the problems that would make the effect misbehave at runtime
//! without touching any page. Results feed `sr-check` and the bridge's
//! `validate_svg`.

use crate::layer::{LAYER_NAMES, is_layer_name};
use crate::markup::{SvgMarkup, parse_svg_markup};
use serde::Serialize;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Initialization would abort.
    Error,
    /// Initialization succeeds but part of the sequence never appears.
    Warning,
    /// Harmless, probably unintended.
    Info,
}

/// A single lint diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintDiagnostic {
    /// Short rule identifier (e.g. "missing-layer").
    pub rule: &'static str,
    pub severity: LintSeverity,
    /// Human-readable message.
    pub message: String,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over SVG markup.
#[must_use]
pub fn lint_markup(markup: &str) -> Vec<LintDiagnostic> {
    let doc = match parse_svg_markup(markup) {
        Ok(doc) => doc,
        Err(e) => {
            return vec![LintDiagnostic {
                rule: "unreadable-markup",
                severity: LintSeverity::Error,
                message: e,
            }];
        }
    };

    let Some(root) = doc.root() else {
        return vec![LintDiagnostic {
            rule: "no-svg-root",
            severity: LintSeverity::Error,
            message: "No `<svg>` element found; the loader would abort.".to_string(),
        }];
    };

    let mut diags = Vec::new();
    lint_missing_layers(&doc, root, &mut diags);
    lint_duplicate_layers(&doc, root, &mut diags);
    lint_unknown_labels(&doc, root, &mut diags);
    diags
}

/// `true` if any diagnostic is an error.
pub fn has_errors(diags: &[LintDiagnostic]) -> bool {
    diags.iter().any(|d| d.severity == LintSeverity::Error)
}

// ─── Rules ────────────────────────────────────────────────────────────────

/// Warn for every expected layer with no matching group.
fn lint_missing_layers(doc: &SvgMarkup, root: usize, diags: &mut Vec<LintDiagnostic>) {
    for (index, name) in LAYER_NAMES.iter().enumerate() {
        if doc.find_group(root, name).is_none() {
            diags.push(LintDiagnostic {
                rule: "missing-layer",
                severity: LintSeverity::Warning,
                message: format!(
                    "Layer `{name}` (page {}) not found; it will never be shown.",
                    index + 1
                ),
            });
        }
    }
}

/// Warn when an expected label appears on more than one group; only the
/// first one is animated.
fn lint_duplicate_layers(doc: &SvgMarkup, root: usize, diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for (_, label) in doc.group_labels(root) {
        if !is_layer_name(label) {
            continue;
        }
        if !seen.insert(label) && reported.insert(label) {
            diags.push(LintDiagnostic {
                rule: "duplicate-layer",
                severity: LintSeverity::Warning,
                message: format!(
                    "Layer `{label}` is used by more than one group; only the first is animated."
                ),
            });
        }
    }
}

/// Info for top-level labelled groups that are not part of the sequence.
fn lint_unknown_labels(doc: &SvgMarkup, root: usize, diags: &mut Vec<LintDiagnostic>) {
    let root_depth = doc.elements[root].depth;
    for (idx, label) in doc.group_labels(root) {
        if doc.elements[idx].depth != root_depth + 1 || is_layer_name(label) {
            continue;
        }
        diags.push(LintDiagnostic {
            rule: "unknown-label",
            severity: LintSeverity::Info,
            message: format!("Group `{label}` is not in the layer list and stays as drawn."),
        });
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
