//! Terminal rendering of audit results

use std::fmt::Write;

use crate::version::platform::PlatformConstraintTracker;
use crate::version::types::UpdateFinding;

const HEADERS: [&str; 3] = ["Package Name", "Locked Version", "Latest version"];

/// Render findings as a box-drawn table with one row per outdated package
pub fn render_table(findings: &[UpdateFinding]) -> String {
    let rows: Vec<[String; 3]> = findings
        .iter()
        .map(|finding| {
            [
                finding.package_name.clone(),
                finding.current_version_locked.to_string(),
                finding.latest_version.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = |left: &str, joint: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(joint), right)
    };
    let line = |cells: [&str; 3]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!(" {:<width$} ", cell, width = width))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", border("┌", "┬", "┐"));
    let _ = writeln!(out, "{}", line(HEADERS));
    let _ = writeln!(out, "{}", border("├", "┼", "┤"));
    for row in &rows {
        let _ = writeln!(out, "{}", line([&row[0], &row[1], &row[2]]));
    }
    out.push_str(&border("└", "┴", "┘"));
    out
}

/// Render the PHP range required across the checked packages
pub fn render_platform_bounds(platform: &PlatformConstraintTracker) -> String {
    let show = |bound: Option<&semver::Version>| {
        bound.map_or_else(|| "none".to_string(), |version| version.to_string())
    };

    format!(
        "{{ minPHPVersion: {}, maxPHPVersion: {} }}",
        show(platform.min()),
        show(platform.max())
    )
}
