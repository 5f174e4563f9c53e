//! Chart dataset projection.
//!
//! Produces the (labels, values, colors) triples the rendering surfaces
//! consume. Colors are drawn fresh on every call; they are a presentation
//! hint, never a stored attribute, so two renders of the same data may color
//! the same slice differently.

use crate::model::{ChartSeries, StudentRecord, SUBJECTS};
use crate::roster::Roster;
use rand::Rng;

const HEX_DIGITS: &[u8] = b"0123456789ABCDEF";

/// One random `#RRGGBB` color.
fn random_color<R: Rng>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_DIGITS[rng.gen_range(0..16)] as char);
    }
    color
}

/// A palette of `n` independently drawn random colors.
pub fn random_palette(n: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| random_color(&mut rng)).collect()
}

/// Per-subject breakdown of one student's marks, in catalog order.
pub fn student_breakdown(student: &StudentRecord) -> ChartSeries {
    ChartSeries {
        labels: SUBJECTS.iter().map(|s| s.to_string()).collect(),
        values: student.marks.clone(),
        colors: random_palette(SUBJECTS.len()),
    }
}

/// Total marks per student across the whole roster, in roster order. A null
/// mark anywhere in a student's vector nulls that student's total.
pub fn totals(roster: &Roster) -> ChartSeries {
    let labels: Vec<String> = roster.iter().map(|s| s.name.clone()).collect();
    let values: Vec<Option<i64>> = roster.iter().map(|s| s.total()).collect();
    let colors = random_palette(labels.len());
    ChartSeries {
        labels,
        values,
        colors,
    }
}
