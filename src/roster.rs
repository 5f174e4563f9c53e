//! Roster reconciliation.
//!
//! The store may return several rows for one student name; the roster keeps
//! exactly one entry per name. The fold is order-sensitive and deterministic:
//! the same raw sequence always produces the same roster.

use crate::model::StudentRecord;
use std::collections::HashMap;

/// Deduplicated, name-keyed view of the fetched records, in first-insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<StudentRecord>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StudentRecord] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&StudentRecord> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }
}

/// Fold raw records into a roster.
///
/// First occurrence of a name inserts the record whole and fixes its position;
/// later occurrences refresh only `marks`, leaving the name and standard from
/// the first occurrence in place. O(n) with hashed name lookup.
pub fn reconcile(raw: Vec<StudentRecord>) -> Roster {
    let mut roster = Roster::default();
    for record in raw {
        match roster.by_name.get(&record.name) {
            Some(&i) => {
                roster.entries[i].marks = record.marks;
            }
            None => {
                roster.by_name.insert(record.name.clone(), roster.entries.len());
                roster.entries.push(record);
            }
        }
    }
    roster
}
