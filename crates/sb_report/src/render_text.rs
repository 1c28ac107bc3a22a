//! Plain-text renderer: a fixed-width table plus the summary line.

use std::fmt::Write as _;

use crate::ReportModel;

const HEADERS: [&str; 5] = ["Item", "Count", "Value", "Score", "Bonus"];

/// Render the model as text. The last line is always `Bonuses: X  Total: Y`.
pub fn render_text(model: &ReportModel) -> String {
    let cells: Vec<[String; 5]> = model
        .rows
        .iter()
        .map(|r| {
            [
                r.label.clone(),
                r.count.to_string(),
                r.value.to_string(),
                r.score.to_string(),
                r.bonus.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(c.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", model.cover.title);
    out.push('\n');
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let _ = writeln!(out, "{}", "-".repeat(rule));
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push('\n');
    let _ = writeln!(out, "{}", model.summary.line);
    out
}

// Label column left-aligned, numbers right-aligned.
fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (i, (c, w)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = w.saturating_sub(c.chars().count());
        if i == 0 {
            line.push_str(c);
            line.push_str(&" ".repeat(pad));
        } else {
            line.push_str(&" ".repeat(pad));
            line.push_str(c);
        }
    }
    let _ = writeln!(out, "{}", line.trim_end());
}
