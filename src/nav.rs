//! Cursor, scroll offset and directory transitions for the listing.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::fs::scanner::{Entry, ScanError};

/// Transient message shown on the warning line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("NO READ PERMISSION FOR: {}", .0.display())]
    NoReadPermission(PathBuf),
    #[error("ERROR READING: {}", .0.display())]
    ErrorReading(PathBuf),
    #[error("CANNOT SELECT A SYMLINK: {}", .0.display())]
    Symlink(PathBuf),
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    None,
    /// Cursor, offset or selection changed; redraw only.
    Moved,
    /// A directory change is staged and must be committed before the next frame.
    PendingChange,
    Warning(Warning),
}

/// Navigation state for the directory currently on screen.
///
/// Holds `scroll_offset <= cursor < entries.len()` after every transition,
/// with both at zero when the directory is empty.
#[derive(Debug)]
pub struct NavState {
    current: PathBuf,
    previous: Option<PathBuf>,
    pending: Option<PathBuf>,
    lowest: Option<PathBuf>,
    entries: Vec<Entry>,
    cursor: usize,
    scroll_offset: usize,
}

impl NavState {
    /// State for `current` whose listing is already known.
    pub fn new(current: PathBuf, lowest: Option<PathBuf>, entries: Vec<Entry>) -> Self {
        Self {
            current,
            previous: None,
            pending: None,
            lowest,
            entries,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current
    }

    pub fn previous_dir(&self) -> Option<&Path> {
        self.previous.as_deref()
    }

    #[allow(dead_code)]
    pub fn pending_dir(&self) -> Option<&Path> {
        self.pending.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Entry under the cursor, if the directory is not empty.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    /// Move the cursor up one row, wrapping to the last entry.
    pub fn move_up(&mut self, capacity: usize) -> Transition {
        let len = self.entries.len();
        if len <= 1 {
            return Transition::None;
        }
        let rows = capacity.max(1);
        let overflow = len > rows;

        if self.cursor > 0 {
            if overflow && self.scroll_offset == self.cursor {
                self.scroll_offset -= 1;
            }
            self.cursor -= 1;
        } else {
            self.cursor = len - 1;
            if overflow {
                // Last page: the final entry sits on the bottom row.
                self.scroll_offset = len - rows;
            }
        }
        Transition::Moved
    }

    /// Move the cursor down one row, wrapping to the first entry.
    pub fn move_down(&mut self, capacity: usize) -> Transition {
        let len = self.entries.len();
        if len <= 1 {
            return Transition::None;
        }
        let rows = capacity.max(1);

        if self.cursor < len - 1 {
            if self.cursor == self.scroll_offset + rows - 1 {
                self.scroll_offset += 1;
            }
            self.cursor += 1;
        } else {
            self.cursor = 0;
            self.scroll_offset = 0;
        }
        Transition::Moved
    }

    /// Stage entering the directory under the cursor.
    pub fn enter_directory(&mut self) -> Transition {
        let Some(entry) = self.entries.get(self.cursor) else {
            return Transition::None;
        };
        if !entry.is_dir() {
            return Transition::None;
        }
        if !entry.readable {
            return Transition::Warning(Warning::NoReadPermission(entry.path.clone()));
        }
        if entry.scan_error {
            return Transition::Warning(Warning::ErrorReading(entry.path.clone()));
        }
        self.pending = Some(entry.path.clone());
        Transition::PendingChange
    }

    /// Stage going to the parent directory, unless already at the floor.
    pub fn go_back(&mut self) -> Transition {
        if self.lowest.as_deref() == Some(self.current.as_path()) {
            return Transition::None;
        }
        // The root is its own parent.
        let parent = self.current.parent().unwrap_or(self.current.as_path());
        self.pending = Some(parent.to_path_buf());
        Transition::PendingChange
    }

    /// Switch to the staged directory using `scan` to list it.
    ///
    /// On success the listing is replaced and cursor and offset go back to
    /// the top. On failure the staged change is dropped and the directory,
    /// listing, cursor and offset stay exactly as they were.
    pub fn commit<F>(&mut self, scan: F) -> Result<bool, ScanError>
    where
        F: FnOnce(&Path) -> Result<Vec<Entry>, ScanError>,
    {
        let Some(next) = self.pending.take() else {
            return Ok(false);
        };
        let entries = scan(&next)?;
        self.previous = Some(std::mem::replace(&mut self.current, next));
        self.entries = entries;
        self.cursor = 0;
        self.scroll_offset = 0;
        Ok(true)
    }

    /// Bring the cursor back into view after the viewport changed size.
    pub fn fit_viewport(&mut self, capacity: usize) {
        let rows = capacity.max(1);
        if self.entries.len() <= rows {
            self.scroll_offset = 0;
        } else if self.cursor >= self.scroll_offset + rows {
            self.scroll_offset = self.cursor + 1 - rows;
        }
    }
}
