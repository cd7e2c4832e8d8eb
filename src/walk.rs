//! Generic policy-driven directory traversal
//!
//! [`walk`] visits every non-directory entry under a root and dispatches it
//! to the matching hook of a [`WalkVisitor`]. Directories are descended into
//! but never passed to a hook, and symlinks are never followed, so a walk
//! cannot cycle. Enumeration order within a directory is
//! filesystem-dependent; callers needing determinism must sort downstream.

use std::fs::Metadata;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// What kind of filesystem node a [`WalkEntry`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    Regular,
    /// Directory (traversed, never passed to a hook).
    Directory,
    /// Symbolic link (never followed).
    Symlink,
    /// Anything else: fifo, socket, device node.
    Special,
}

/// One filesystem node handed to a visitor hook.
///
/// Borrowed per visit; not retained past the hook call.
#[derive(Debug)]
pub struct WalkEntry<'a> {
    /// Absolute (or walk-root-joined) path of the entry.
    pub path: &'a Path,
    /// Path relative to the walk root.
    pub relative_path: &'a Path,
    /// Entry type tag.
    pub kind: EntryKind,
    /// POSIX mode bits (permissions only).
    pub mode: u32,
    /// Size in bytes.
    pub size: u64,
}

/// Outcome of a visitor hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    /// Keep walking.
    Continue,
    /// Keep walking without acting on this entry. Equivalent to `Continue`
    /// for non-directory entries; kept as a distinct signal for hooks that
    /// want to record the skip.
    Skip,
    /// Abort the walk immediately.
    Fail,
}

/// Per-entry-type hooks invoked by [`walk`].
///
/// All hooks default to `Continue` so a visitor only implements the entry
/// types it cares about.
pub trait WalkVisitor {
    /// Called once before the first entry is visited.
    fn on_start(&mut self, _root: &Path) -> WalkAction {
        WalkAction::Continue
    }

    /// Called for every regular file.
    fn on_regular_file(&mut self, _entry: &WalkEntry<'_>) -> WalkAction {
        WalkAction::Continue
    }

    /// Called for every symlink. The link is never resolved.
    fn on_symlink(&mut self, _entry: &WalkEntry<'_>) -> WalkAction {
        WalkAction::Continue
    }

    /// Called for fifos, sockets and device nodes.
    fn on_special(&mut self, _entry: &WalkEntry<'_>) -> WalkAction {
        WalkAction::Continue
    }

    /// Called exactly once when the walk ends, with `true` on normal
    /// completion and `false` when any hook failed or an IO error aborted
    /// the traversal.
    fn on_finish(&mut self, _success: bool) {}
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn mode_bits(_metadata: &Metadata) -> u32 {
    0o644
}

fn classify(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_file() {
        EntryKind::Regular
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_symlink() {
        EntryKind::Symlink
    } else {
        EntryKind::Special
    }
}

/// Walk the tree rooted at `root`, dispatching every non-directory entry to
/// `visitor`.
///
/// IO errors while enumerating a directory or stat-ing an entry abort the
/// walk through the same channel as a `Fail` hook result: `on_finish(false)`
/// is invoked and the error is returned. There is no continue-on-error mode.
pub fn walk<V: WalkVisitor>(root: &Path, visitor: &mut V) -> Result<()> {
    if visitor.on_start(root) == WalkAction::Fail {
        visitor.on_finish(false);
        return Err(Error::WalkAborted {
            path: root.to_path_buf(),
        });
    }

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                visitor.on_finish(false);
                return Err(err.into());
            }
        };

        let kind = classify(entry.file_type());
        if kind == EntryKind::Directory {
            continue;
        }

        let relative_path = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(err) => {
                visitor.on_finish(false);
                return Err(Error::InvalidPath(format!(
                    "{}: {}",
                    entry.path().display(),
                    err
                )));
            }
        };
        // The root itself shows up with an empty relative path when it is
        // not a directory; nothing useful to hand to a hook.
        if relative_path.as_os_str().is_empty() {
            continue;
        }

        // With follow_links disabled this stats the link itself, not its
        // target, so symlink entries cannot error on a dangling target.
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                visitor.on_finish(false);
                return Err(err.into());
            }
        };

        let walk_entry = WalkEntry {
            path: entry.path(),
            relative_path,
            kind,
            mode: mode_bits(&metadata),
            size: metadata.len(),
        };

        let action = match kind {
            EntryKind::Regular => visitor.on_regular_file(&walk_entry),
            EntryKind::Symlink => visitor.on_symlink(&walk_entry),
            EntryKind::Special => visitor.on_special(&walk_entry),
            EntryKind::Directory => WalkAction::Continue,
        };

        if action == WalkAction::Fail {
            visitor.on_finish(false);
            return Err(Error::WalkAborted {
                path: entry.path().to_path_buf(),
            });
        }
    }

    visitor.on_finish(true);
    Ok(())
}
