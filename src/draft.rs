//! Input draft: the not-yet-submitted form state.
//!
//! The draft is always in exactly one of two shapes - manual per-subject
//! entries, or a single pending bulk file - and the transitions here enforce
//! that the two never coexist.

use crate::model::{PendingFile, StudentRecord, Submission, ValidationError, SUBJECTS};
use std::path::Path;

/// Extensions accepted for bulk upload, compared case-insensitively against
/// the substring after the last dot.
const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub standard: String,
    marks_text: Vec<String>,
    pending_file: Option<PendingFile>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            standard: String::new(),
            marks_text: vec![String::new(); SUBJECTS.len()],
            pending_file: None,
        }
    }
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marks_text(&self) -> &[String] {
        &self.marks_text
    }

    pub fn pending_file(&self) -> Option<&PendingFile> {
        self.pending_file.as_ref()
    }

    /// Write raw text into one subject's mark field. Choosing manual entry
    /// always discards a previously chosen file.
    ///
    /// # Panics
    /// Panics if `index` is out of range for the subject catalog.
    pub fn set_manual_mark(&mut self, index: usize, text: impl Into<String>) {
        assert!(index < SUBJECTS.len(), "mark index out of range");
        self.marks_text[index] = text.into();
        self.pending_file = None;
    }

    /// Choose a file for bulk upload. A rejected extension leaves the draft
    /// untouched; acceptance clears every manual mark field.
    pub fn set_file(&mut self, candidate: PendingFile) -> Result<(), ValidationError> {
        let extension = candidate
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::UnsupportedFileType { extension });
        }
        self.pending_file = Some(candidate);
        for entry in &mut self.marks_text {
            entry.clear();
        }
        Ok(())
    }

    /// Drop the pending file without touching anything else.
    pub fn clear_file(&mut self) {
        self.pending_file = None;
    }

    /// True when any manual mark field holds text.
    pub fn has_any_mark(&self) -> bool {
        self.marks_text.iter().any(|m| !m.is_empty())
    }

    /// Manual mark fields are editable only while no file is pending.
    pub fn manual_entry_enabled(&self) -> bool {
        self.pending_file.is_none()
    }

    /// The file field is editable only while every manual mark is empty.
    pub fn file_entry_enabled(&self) -> bool {
        !self.has_any_mark()
    }

    /// Reset to the initial empty shape. Called synchronously when a
    /// submission is dispatched, regardless of how the network calls end.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build a canonical submission from the current draft.
    ///
    /// File mode wins when a file is pending: the record carries the filename,
    /// an "N/A" standard, and all-null marks (per-subject values are not
    /// parsed client-side). Manual mode requires every field to hold text;
    /// unparseable text becomes a null mark unless `strict` is set.
    pub fn build(&self, strict: bool) -> Result<Submission, ValidationError> {
        if let Some(file) = &self.pending_file {
            return Ok(Submission {
                record: StudentRecord {
                    name: file.file_name.clone(),
                    standard: "N/A".to_string(),
                    marks: vec![None; SUBJECTS.len()],
                },
                file: Some(file.clone()),
            });
        }

        if self.marks_text.iter().any(|m| m.is_empty()) {
            return Err(ValidationError::IncompleteMarks);
        }

        let mut marks = Vec::with_capacity(SUBJECTS.len());
        for (subject, text) in SUBJECTS.iter().zip(&self.marks_text) {
            let parsed = parse_mark(text);
            if strict && parsed.is_none() {
                return Err(ValidationError::InvalidMark {
                    subject: subject.to_string(),
                    text: text.clone(),
                });
            }
            marks.push(parsed);
        }

        Ok(Submission {
            record: StudentRecord {
                name: self.name.clone(),
                standard: self.standard.clone(),
                marks,
            },
            file: None,
        })
    }
}

/// Build a `PendingFile` from a filesystem path, taking the filename from its
/// final component.
pub fn pending_file_from_path(path: &Path) -> PendingFile {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    PendingFile {
        file_name,
        path: path.to_path_buf(),
    }
}

/// Base-10 parse with `parseInt` semantics: skip leading whitespace, accept an
/// optional sign, then consume the longest decimal-digit prefix. No digits
/// (or overflow) yields `None` rather than an error.
pub fn parse_mark(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}
