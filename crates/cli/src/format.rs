//! Output formatting for the three output modes

use revcheck_procedures::{Check, ProcedureError, RunReport};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Summary line plus bindings before and after
    Human,
    /// One JSON document per result
    Json,
    /// Final bindings only
    Raw,
}

/// Catalog listing
pub fn format_list(checks: &[Box<dyn Check>], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            let entries: Vec<serde_json::Value> = checks
                .iter()
                .map(|c| serde_json::json!({ "name": c.name(), "summary": c.summary() }))
                .collect();
            serde_json::Value::Array(entries).to_string()
        }
        OutputMode::Raw => checks
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Human => {
            let width = checks.iter().map(|c| c.name().len()).max().unwrap_or(0);
            checks
                .iter()
                .map(|c| format!("{:<width$}  {}", c.name(), c.summary(), width = width))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// A passed run
pub fn format_report(report: &RunReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            serde_json::to_string(report).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
        }
        OutputMode::Raw => report
            .after
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Human => {
            let mut out = format!("(ok) {}", report.summary());
            out.push_str("\n  before:");
            for binding in &report.before {
                out.push_str(&format!("\n    {}", binding));
            }
            out.push_str("\n  after one round:");
            for binding in &report.after {
                out.push_str(&format!("\n    {}", binding));
            }
            out
        }
    }
}

/// A failed run (or lookup)
pub fn format_error(procedure: &str, err: &ProcedureError, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({
            "procedure": procedure,
            "error": err.to_string(),
            "violation": err.violation_kind().map(|k| k.to_string()),
        })
        .to_string(),
        OutputMode::Raw | OutputMode::Human => format!("(error) {}: {}", procedure, err),
    }
}
