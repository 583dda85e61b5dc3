//! Format run summaries and plans as text.

use crate::materialize::OutcomeStatus;
use crate::plan::Allocation;
use crate::run::RunSummary;
use crate::types::format_bytes;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn push_warnings<T: std::fmt::Display>(out: &mut String, warnings: &[T]) {
    if warnings.is_empty() {
        return;
    }
    out.push_str(&format!("{}\n\n", format_section_heading("Warnings")));
    for warning in warnings {
        out.push_str(&format!("  {} {}\n", "!".yellow(), warning));
    }
    out.push('\n');
}

/// Format a run summary as human-readable text.
pub fn format_summary_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Generated Files")));
    out.push_str(&format!("  Destination: {}\n", summary.destination.display()));
    if summary.fill_mode == summary.requested_fill_mode {
        out.push_str(&format!("  Fill mode: {}\n", summary.fill_mode));
    } else {
        out.push_str(&format!(
            "  Fill mode: {} (requested {})\n",
            summary.fill_mode, summary.requested_fill_mode
        ));
    }
    if summary.content_buffer_bytes > 0 {
        out.push_str(&format!(
            "  Content buffer: {}\n",
            format_bytes(summary.content_buffer_bytes as u64)
        ));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Planned", "Actual", "Outcome"]);
    for outcome in &summary.outcomes {
        let status = match outcome.status {
            OutcomeStatus::Success => "ok".to_string(),
            OutcomeStatus::Failed => format!(
                "failed: {}",
                outcome.error_detail.as_deref().unwrap_or("unknown error")
            ),
        };
        table.add_row(vec![
            outcome.path.display().to_string(),
            format_bytes(outcome.requested_size),
            format_bytes(outcome.actual_size),
            status,
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    push_warnings(&mut out, &summary.warnings);

    out.push_str(&format!("{}\n\n", format_section_heading("Totals")));
    out.push_str(&format!("  Files processed: {}\n", summary.outcomes.len()));
    out.push_str(&format!("  Succeeded: {}\n", summary.succeeded));
    if summary.has_failures() {
        out.push_str(&format!("  Failed: {}\n", summary.failed.red()));
    } else {
        out.push_str("  Failed: 0\n");
    }
    out.push_str(&format!(
        "  Bytes planned: {} ({} bytes)\n",
        format_bytes(summary.total_requested_bytes),
        summary.total_requested_bytes
    ));
    out.push_str(&format!(
        "  Bytes generated: {} ({} bytes)\n",
        format_bytes(summary.total_actual_bytes),
        summary.total_actual_bytes
    ));
    out.push_str(&format!("  Duration: {} ms\n", summary.duration_ms));
    out
}

/// Format a planned allocation as human-readable text.
pub fn format_plan_text(allocation: &Allocation) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Planned Files")));
    out.push_str(&format!(
        "  Budget: {} ({} bytes)\n",
        format_bytes(allocation.budget.total_bytes),
        allocation.budget.total_bytes
    ));
    out.push_str(&format!(
        "  Explicit sizes: {}\n",
        format_bytes(allocation.specified_bytes)
    ));
    if let Some(per_file) = allocation.per_file_bytes {
        out.push_str(&format!(
            "  Per unspecified file: {} ({} bytes)\n",
            format_bytes(per_file),
            per_file
        ));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Size", "Bytes", "Source"]);
    for file in &allocation.files {
        let origin = if file.explicit { "explicit" } else { "budget" };
        table.add_row(vec![
            file.path.display().to_string(),
            format_bytes(file.size_bytes),
            file.size_bytes.to_string(),
            origin.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    push_warnings(&mut out, &allocation.warnings);

    let total = allocation.total_bytes();
    out.push_str(&format!(
        "  Total: {} file(s), {} ({} bytes)\n",
        allocation.files.len(),
        format_bytes(total),
        total
    ));
    out
}
