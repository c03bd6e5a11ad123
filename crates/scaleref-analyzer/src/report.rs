//! Human-readable report formatting.

use scaleref_core::DiagnosticResult;

/// Width of a value cell inside the summary box.
const CELL: usize = 30;

/// Clip `value` to the box cell, marking the cut with an ellipsis.
fn fit(value: &str) -> String {
    if value.chars().count() <= CELL {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(CELL - 1).collect();
    clipped.push('…');
    clipped
}

pub fn format_report(results: &[DiagnosticResult], scope: Option<&str>) -> String {
    let mut out = String::new();
    let scope = scope.unwrap_or("all namespaces");

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Autoscaler Reference Analysis           ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Scope:    {:<CELL$}║\n", fit(scope)));
    out.push_str(&format!("║  Failing:  {:<CELL$}║\n", results.len()));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    if results.is_empty() {
        out.push_str("✅ All scale-target references resolve.\n");
        return out;
    }

    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("  {}. {} {}", i + 1, result.kind, result.name));
        if let Some(parent) = &result.parent_object {
            out.push_str(&format!(" ({parent})"));
        }
        out.push('\n');
        for failure in &result.failures {
            out.push_str(&format!("     ❌ {failure}\n"));
        }
        out.push('\n');
    }

    out
}

/// Render results as pretty JSON.
pub fn format_json(results: &[DiagnosticResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
