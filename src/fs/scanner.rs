//! One-directory-at-a-time listing with per-entry permission metadata.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use nix::unistd::{self, Gid, Uid, User};
use thiserror::Error;
use tracing::debug;

const OWNER_READ: u32 = 0o400;
const GROUP_READ: u32 = 0o040;
const OTHER_READ: u32 = 0o004;

/// What a listed child turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Metadata could not be retrieved.
    Unreadable,
}

/// One child of the scanned directory.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub is_symlink: bool,
    pub readable: bool,
    pub scan_error: bool,
    pub owner: Option<String>,
    pub mode: u32,
}

impl Entry {
    fn errored(name: String, path: PathBuf, is_symlink: bool) -> Self {
        Self {
            name,
            path,
            kind: EntryKind::Unreadable,
            is_symlink,
            readable: false,
            scan_error: true,
            owner: None,
            mode: 0,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// `ls -l` style mode string such as `drwxr-xr-x`, or `?` when unknown.
    pub fn permissions(&self) -> String {
        if self.scan_error {
            return "?".to_string();
        }
        let kind = if self.is_symlink {
            'l'
        } else if self.is_dir() {
            'd'
        } else {
            '-'
        };
        let bits = [
            (0o400, 'r'),
            (0o200, 'w'),
            (0o100, 'x'),
            (0o040, 'r'),
            (0o020, 'w'),
            (0o010, 'x'),
            (0o004, 'r'),
            (0o002, 'w'),
            (0o001, 'x'),
        ];
        std::iter::once(kind)
            .chain(
                bits.iter()
                    .map(|&(bit, c)| if self.mode & bit != 0 { c } else { '-' }),
            )
            .collect()
    }
}

/// The directory itself could not be listed.
#[derive(Debug, Error)]
#[error("cannot list {}: {source}", path.display())]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The invoking user's ids, captured once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: u32,
    pub gid: u32,
    /// Supplementary groups.
    pub groups: Vec<u32>,
}

impl Identity {
    /// Identity of the running process.
    pub fn current() -> Self {
        let groups = unistd::getgroups()
            .map(|gids| gids.into_iter().map(Gid::as_raw).collect())
            .unwrap_or_default();
        Self {
            uid: Uid::current().as_raw(),
            gid: Gid::current().as_raw(),
            groups,
        }
    }

    fn in_group(&self, gid: u32) -> bool {
        self.gid == gid || self.groups.contains(&gid)
    }
}

/// Read permission for `identity` on a file with the given mode and ownership.
///
/// Clauses are tried in order owner, other, group and the first that holds
/// wins. A non-owner is judged on the other-read bit before group membership
/// is consulted, and an owner without the owner-read bit still gets the
/// group clause.
pub fn is_readable(mode: u32, file_uid: u32, file_gid: u32, identity: &Identity) -> bool {
    let is_owner = file_uid == identity.uid;
    (is_owner && mode & OWNER_READ != 0)
        || (!is_owner && mode & OTHER_READ != 0)
        || (identity.in_group(file_gid) && mode & GROUP_READ != 0)
}

/// List the immediate children of `dir`, sorted by raw name bytes.
///
/// Either the whole listing succeeds or a `ScanError` is returned; a child
/// whose metadata cannot be read is kept as an errored entry instead.
pub fn scan(dir: &Path, identity: &Identity) -> Result<Vec<Entry>, ScanError> {
    let fail = |source| ScanError {
        path: dir.to_path_buf(),
        source,
    };

    let mut names: Vec<OsString> = Vec::new();
    for entry in fs::read_dir(dir).map_err(fail)? {
        names.push(entry.map_err(fail)?.file_name());
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| scan_entry(dir, name, identity))
        .collect())
}

fn scan_entry(dir: &Path, name: OsString, identity: &Identity) -> Entry {
    let path = dir.join(&name);
    let name = name.to_string_lossy().into_owned();

    let is_symlink = fs::symlink_metadata(&path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    let metadata = match fs::metadata(&path) {
        Ok(m) => m,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "stat failed");
            return Entry::errored(name, path, is_symlink);
        }
    };

    let owner = match User::from_uid(Uid::from_raw(metadata.uid())) {
        Ok(Some(user)) => user.name,
        Ok(None) => {
            debug!(path = %path.display(), uid = metadata.uid(), "owner has no passwd entry");
            return Entry::errored(name, path, is_symlink);
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "owner lookup failed");
            return Entry::errored(name, path, is_symlink);
        }
    };

    let mode = metadata.mode();
    let kind = if metadata.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    };

    Entry {
        readable: is_readable(mode, metadata.uid(), metadata.gid(), identity),
        name,
        path,
        kind,
        is_symlink,
        scan_error: false,
        owner: Some(owner),
        mode,
    }
}
