//! What goes on which row, decided without touching the terminal.

use crate::app::App;
use crate::nav::NavState;
use crate::selection::SelectionSet;

pub const TITLE: &str = "File Picker";
pub const KEY_HELP: &str =
    "[UP = up, DOWN = down, LEFT = go back dir, RIGHT = enter dir, SPACE = select file/dir, Q = quit]";

/// Rows above the listing: blank, title, key help, blank, current
/// directory, blank, warning line, blank.
pub const HEADER_ROWS: u16 = 8;
/// Rows below the listing.
pub const FOOTER_ROWS: u16 = 1;
pub const CHROME_ROWS: u16 = HEADER_ROWS + FOOTER_ROWS;

/// Entry rows that fit in a terminal `rows` high.
pub fn viewport_capacity(rows: u16) -> usize {
    rows.saturating_sub(CHROME_ROWS) as usize
}

/// One row of the listing area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDescriptor {
    Blank,
    Entry {
        name: String,
        is_dir: bool,
        is_selected: bool,
        is_highlighted: bool,
    },
}

impl RowDescriptor {
    /// Text for the row, e.g. `[*] docs/`.
    pub fn label(&self) -> String {
        match self {
            RowDescriptor::Blank => String::new(),
            RowDescriptor::Entry {
                name,
                is_dir,
                is_selected,
                ..
            } => format!(
                "[{}] {}{}",
                if *is_selected { '*' } else { ' ' },
                name,
                if *is_dir { "/" } else { "" }
            ),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(
            self,
            RowDescriptor::Entry {
                is_highlighted: true,
                ..
            }
        )
    }
}

/// Exactly `capacity` rows: row `i` shows entry `scroll_offset + i`, or
/// `Blank` past the end of the listing.
pub fn plan_rows(nav: &NavState, selection: &SelectionSet, capacity: usize) -> Vec<RowDescriptor> {
    let entries = nav.entries();
    (0..capacity)
        .map(|row| {
            let index = nav.scroll_offset() + row;
            match entries.get(index) {
                Some(entry) => RowDescriptor::Entry {
                    name: entry.name.clone(),
                    is_dir: entry.is_dir(),
                    is_selected: selection.contains(&entry.path),
                    is_highlighted: index == nav.cursor(),
                },
                None => RowDescriptor::Blank,
            }
        })
        .collect()
}

/// A complete frame for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    pub header: String,
    pub rows: Vec<RowDescriptor>,
    pub warning: Option<String>,
    pub footer: String,
}

pub fn plan_frame(app: &App, capacity: usize) -> FramePlan {
    let nav = &app.nav;
    let position = match nav.selected_entry() {
        Some(entry) => format!(
            "{}/{}  {} {}",
            nav.cursor() + 1,
            nav.entries().len(),
            entry.permissions(),
            entry.owner.as_deref().unwrap_or("?")
        ),
        None => "empty".to_string(),
    };

    FramePlan {
        header: format!("Current directory: {}", nav.current_dir().display()),
        rows: plan_rows(nav, &app.selection, capacity),
        warning: app.warning.as_ref().map(ToString::to_string),
        footer: format!("{} selected  {}", app.selection.len(), position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::scanner::{EntryKind, Identity};
    use crate::nav::tests::entry;
    use crate::nav::Warning;
    use std::path::{Path, PathBuf};

    fn nav() -> NavState {
        NavState::new(
            PathBuf::from("/data"),
            None,
            vec![
                entry("/data", "a.txt", EntryKind::File),
                entry("/data", "b", EntryKind::Directory),
                entry("/data", "c.txt", EntryKind::File),
                entry("/data", "d.txt", EntryKind::File),
            ],
        )
    }

    #[test]
    fn viewport_capacity_subtracts_chrome() {
        assert_eq!(viewport_capacity(24), 15);
        assert_eq!(viewport_capacity(9), 0);
        assert_eq!(viewport_capacity(3), 0);
    }

    #[test]
    fn rows_pad_with_blanks() {
        let rows = plan_rows(&nav(), &SelectionSet::new(), 6);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[4], RowDescriptor::Blank);
        assert_eq!(rows[5], RowDescriptor::Blank);
        assert_eq!(rows[1].label(), "[ ] b/");
    }

    #[test]
    fn rows_follow_scroll_offset_and_cursor() {
        let mut nav = nav();
        nav.move_up(2);
        let rows = plan_rows(&nav, &SelectionSet::new(), 2);
        assert_eq!(rows[0].label(), "[ ] c.txt");
        assert_eq!(rows[1].label(), "[ ] d.txt");
        assert!(!rows[0].is_highlighted());
        assert!(rows[1].is_highlighted());
    }

    #[test]
    fn exactly_one_row_highlighted() {
        let rows = plan_rows(&nav(), &SelectionSet::new(), 4);
        assert_eq!(rows.iter().filter(|r| r.is_highlighted()).count(), 1);
        assert!(rows[0].is_highlighted());
    }

    #[test]
    fn selected_entries_are_marked() {
        let mut selection = SelectionSet::new();
        selection.toggle(Path::new("/data/c.txt"));
        let rows = plan_rows(&nav(), &selection, 4);
        assert_eq!(rows[2].label(), "[*] c.txt");
        assert_eq!(rows[0].label(), "[ ] a.txt");
    }

    #[test]
    fn empty_directory_is_all_blank() {
        let nav = NavState::new(PathBuf::from("/empty"), None, Vec::new());
        let rows = plan_rows(&nav, &SelectionSet::new(), 3);
        assert!(rows.iter().all(|r| *r == RowDescriptor::Blank));
    }

    #[test]
    fn frame_carries_header_warning_and_footer() {
        let mut app = App::from_parts(nav(), SelectionSet::new(), Identity::current());
        app.warning = Some(Warning::ErrorReading(PathBuf::from("/data/x")));
        let frame = plan_frame(&app, 3);
        assert_eq!(frame.header, "Current directory: /data");
        assert_eq!(frame.rows.len(), 3);
        assert_eq!(frame.warning.as_deref(), Some("ERROR READING: /data/x"));
        assert_eq!(frame.footer, "0 selected  1/4  -rw-r--r-- ?");
    }
}
