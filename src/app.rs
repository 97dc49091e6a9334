use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::PickerOptions;
use crate::error::{AppError, Result};
use crate::fs::scanner::{self, Identity};
use crate::nav::{NavState, Transition, Warning};
use crate::selection::SelectionSet;

/// Everything the user can ask the picker to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    GoBack,
    EnterDirectory,
    ToggleSelect,
    Quit,
}

/// Main application state.
pub struct App {
    pub nav: NavState,
    pub selection: SelectionSet,
    identity: Identity,
    /// Shown on the warning line until the next key press.
    pub warning: Option<Warning>,
    pub should_quit: bool,
}

impl App {
    /// Scan the start directory and seed the selection.
    pub fn new(options: &PickerOptions, identity: Identity) -> Result<Self> {
        let entries = scanner::scan(&options.start_dir, &identity)
            .map_err(|e| AppError::InvalidPath(e.to_string()))?;
        let nav = NavState::new(
            options.start_dir.clone(),
            options.lowest_dir.clone(),
            entries,
        );
        let selection = SelectionSet::from_paths(options.preselected.iter().cloned());
        debug!(
            start = %options.start_dir.display(),
            preselected = selection.len(),
            "picker state created"
        );
        Ok(Self::from_parts(nav, selection, identity))
    }

    pub fn from_parts(nav: NavState, selection: SelectionSet, identity: Identity) -> Self {
        Self {
            nav,
            selection,
            identity,
            warning: None,
            should_quit: false,
        }
    }

    /// Apply one command against a viewport of `capacity` rows.
    ///
    /// A returned `PendingChange` must be followed by
    /// [`commit_directory_change`](Self::commit_directory_change) before the
    /// next frame is planned.
    pub fn apply(&mut self, command: Command, capacity: usize) -> Transition {
        let transition = match command {
            Command::MoveUp => self.nav.move_up(capacity),
            Command::MoveDown => self.nav.move_down(capacity),
            Command::GoBack => self.nav.go_back(),
            Command::EnterDirectory => self.nav.enter_directory(),
            Command::ToggleSelect => self.toggle_select(),
            Command::Quit => {
                self.quit();
                Transition::None
            }
        };
        if let Transition::Warning(ref w) = transition {
            debug!(warning = %w, "command refused");
            self.warning = Some(w.clone());
        }
        transition
    }

    /// Toggle the entry under the cursor in the selection.
    pub fn toggle_select(&mut self) -> Transition {
        let Some(entry) = self.nav.selected_entry() else {
            return Transition::None;
        };
        if !entry.readable {
            return Transition::Warning(Warning::NoReadPermission(entry.path.clone()));
        }
        if entry.is_symlink {
            return Transition::Warning(Warning::Symlink(entry.path.clone()));
        }
        if entry.scan_error {
            return Transition::Warning(Warning::ErrorReading(entry.path.clone()));
        }
        let selected = self.selection.toggle(&entry.path);
        debug!(path = %entry.path.display(), selected, "selection toggled");
        Transition::Moved
    }

    /// Perform a staged directory change. Returns whether the directory moved.
    ///
    /// A directory that cannot be listed leaves the previous listing in place.
    pub fn commit_directory_change(&mut self) -> bool {
        let identity = &self.identity;
        match self.nav.commit(|dir| scanner::scan(dir, identity)) {
            Ok(true) => {
                info!(
                    dir = %self.nav.current_dir().display(),
                    from = ?self.nav.previous_dir(),
                    "changed directory"
                );
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(
                    error = %e,
                    staying = %self.nav.current_dir().display(),
                    "directory change rolled back"
                );
                false
            }
        }
    }

    /// Clear the transient warning line.
    pub fn clear_warning(&mut self) {
        self.warning = None;
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Final result, in selection order.
    pub fn into_selection(self) -> Vec<PathBuf> {
        self.selection.into_vec()
    }
}
