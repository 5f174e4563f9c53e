//! Text summary builder for CLI output.
//!
//! Formats the reconciled roster as aligned human-readable lines for text
//! mode: one row per student with per-subject marks and the total.

use crate::model::SUBJECTS;
use crate::roster::Roster;

/// Pre-formatted lines for text output.
pub struct TextSummary {
    pub lines: Vec<String>,
}

fn mark_cell(mark: Option<i64>) -> String {
    match mark {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn total_cell(total: Option<i64>) -> String {
    match total {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

/// Build a roster table. Column widths adapt to the widest cell.
pub fn build_text_summary(roster: &Roster) -> TextSummary {
    let mut lines = Vec::new();

    if roster.is_empty() {
        lines.push("No student records.".to_string());
        return TextSummary { lines };
    }

    let mut header: Vec<String> = vec!["Name".to_string(), "Standard".to_string()];
    header.extend(SUBJECTS.iter().map(|s| s.to_string()));
    header.push("Total".to_string());

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(roster.len());
    for student in roster.iter() {
        let mut row = vec![student.name.clone(), student.standard.clone()];
        row.extend(student.marks.iter().map(|m| mark_cell(*m)));
        row.push(total_cell(student.total()));
        rows.push(row);
    }

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    lines.push(render(&header));
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in &rows {
        lines.push(render(row));
    }

    TextSummary { lines }
}
