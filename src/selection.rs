use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Chosen paths in the order they were first selected.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    paths: IndexSet<PathBuf>,
}

impl SelectionSet {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from preselected paths. Repeats keep their first position.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Add `path` if absent, remove it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, path: &Path) -> bool {
        if self.paths.shift_remove(path) {
            false
        } else {
            self.paths.insert(path.to_path_buf());
            true
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths.into_iter().collect()
    }
}
