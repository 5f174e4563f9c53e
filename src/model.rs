use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed subject catalog. Every marks vector has exactly this many entries,
/// in this order.
pub const SUBJECTS: &[&str] = &["Telugu", "Maths", "Science", "Social", "Hindi", "English"];

/// Number of subjects in the catalog.
pub fn subject_count() -> usize {
    SUBJECTS.len()
}

/// One student's record as stored and fetched.
///
/// A `None` mark serializes to JSON `null` and stands for "no usable numeric
/// value" - either an unparseable manual entry or a file submission whose
/// per-subject values are only known server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub standard: String,
    pub marks: Vec<Option<i64>>,
}

impl StudentRecord {
    /// Sum of all marks. Any `None` entry poisons the total, mirroring
    /// NaN propagation through an integer sum.
    pub fn total(&self) -> Option<i64> {
        self.marks.iter().try_fold(0i64, |acc, m| Some(acc + (*m)?))
    }
}

/// Chart-ready dataset handed to a rendering surface: parallel labels,
/// values and hex color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<i64>>,
    pub colors: Vec<String>,
}

/// A file chosen for bulk upload. Only the filename is inspected client-side;
/// the body is forwarded opaquely at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub file_name: String,
    pub path: PathBuf,
}

/// Output of the submission builder: the record to store plus the file to
/// forward afterwards, if the draft was in file mode.
#[derive(Debug, Clone)]
pub struct Submission {
    pub record: StudentRecord,
    pub file: Option<PendingFile>,
}

/// Local validation failures. These block the action before any network call
/// and are surfaced only as a status diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("fill in every subject mark before submitting")]
    IncompleteMarks,
    #[error("unsupported file type '.{extension}' (accepted: .csv, .xlsx, .xls)")]
    UnsupportedFileType { extension: String },
    #[error("mark for {subject} is not a number: '{text}'")]
    InvalidMark { subject: String, text: String },
}

/// Events emitted by the controller and consumed by presentation layers.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw fetch result, in store order. The consumer reconciles it.
    RosterFetched { records: Vec<StudentRecord> },
    Info(InfoEvent),
}

/// Structured status messages rendered on the TUI status line or stderr.
#[derive(Debug, Clone)]
pub enum InfoEvent {
    Message(String),
    RecordStored { name: String },
    FileUploaded { file_name: String },
    /// A network round-trip failed. Reported and swallowed; nothing is
    /// retried or rolled back.
    NetworkError { op: &'static str, detail: String },
}

impl InfoEvent {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Message(msg) => msg.clone(),
            InfoEvent::RecordStored { name } => format!("Stored record for {}", name),
            InfoEvent::FileUploaded { file_name } => format!("Uploaded {}", file_name),
            InfoEvent::NetworkError { op, detail } => format!("{} failed: {}", op, detail),
        }
    }
}
