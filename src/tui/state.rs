use crate::draft::Draft;
use crate::model::AppEvent;
use crate::roster::{reconcile, Roster};

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Standard,
    Mark(usize),
    File,
}

impl Focus {
    pub fn next(self, subject_count: usize) -> Self {
        match self {
            Focus::Name => Focus::Standard,
            Focus::Standard => Focus::Mark(0),
            Focus::Mark(i) if i + 1 < subject_count => Focus::Mark(i + 1),
            Focus::Mark(_) => Focus::File,
            Focus::File => Focus::Name,
        }
    }

    pub fn prev(self, subject_count: usize) -> Self {
        match self {
            Focus::Name => Focus::File,
            Focus::Standard => Focus::Name,
            Focus::Mark(0) => Focus::Standard,
            Focus::Mark(i) => Focus::Mark(i - 1),
            Focus::File => Focus::Mark(subject_count - 1),
        }
    }
}

/// All mutable UI state. Owned by the UI thread only; every mutation happens
/// through the event/key handlers there, never concurrently.
pub struct UiState {
    pub draft: Draft,
    pub roster: Roster,
    /// Last selected roster entry, by name. Parameterizes the per-student
    /// chart and nothing else; a refetch may invalidate it.
    pub selected: Option<String>,
    /// Highlighted roster row.
    pub cursor: usize,
    pub focus: Focus,
    /// Path text being typed into the file field, before it is applied.
    pub file_path_input: String,
    pub info: String,
    pub strict_marks: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            draft: Draft::new(),
            roster: Roster::default(),
            selected: None,
            cursor: 0,
            focus: Focus::Name,
            file_path_input: String::new(),
            info: String::new(),
            strict_marks: false,
        }
    }
}

impl UiState {
    /// Apply a controller event. A fetch replaces the whole roster
    /// (last-write-wins when refetches race).
    pub fn apply_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::RosterFetched { records } => {
                self.roster = reconcile(records);
                if self.cursor >= self.roster.len() {
                    self.cursor = self.roster.len().saturating_sub(1);
                }
            }
            AppEvent::Info(info) => {
                self.info = info.to_message();
            }
        }
    }

    /// Move the roster highlight and select that entry.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.roster.is_empty() {
            return;
        }
        let last = self.roster.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.selected = self
            .roster
            .entries()
            .get(self.cursor)
            .map(|s| s.name.clone());
    }
}
