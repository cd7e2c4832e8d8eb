//! AROMA installer generation
//!
//! Composes the filesystem walker, the archive writer and the template
//! engine into the end-to-end `generate` operation: every regular file
//! under the template directory is streamed into the installer zip at its
//! root-relative path, except the config template, which is rendered
//! against the ROM registry snapshot and written under its final name.

use std::fs;
use std::path::Path;

use crate::archive::{ArchiveWriter, DEFAULT_ENTRY_MODE};
use crate::error::{Error, Result};
use crate::template::{self, PlaceholderContext};
use crate::walk::{self, WalkAction, WalkEntry, WalkVisitor};

/// Template-dir-relative path of the config template. Never emitted.
pub const MARKER_PATH: &str = "META-INF/com/google/android/aroma-config.in";

/// Archive path the rendered config is written to.
pub const CONFIG_PATH: &str = "META-INF/com/google/android/aroma-config";

/// Archive entry name for a walk entry: root-relative, forward slashes.
fn archive_name(relative_path: &Path) -> String {
    relative_path.to_string_lossy().replace('\\', "/")
}

/// Walk visitor that streams every reached file into the archive.
///
/// Symlinks and special files are explicitly skipped: never resolved,
/// never archived, so the walk cannot be steered outside the template
/// tree. The first entry-level error is kept for the caller; the walker
/// sees it as a plain `Fail`.
struct InstallerVisitor<'a> {
    archive: &'a mut ArchiveWriter,
    ctx: &'a PlaceholderContext,
    error: Option<Error>,
}

impl InstallerVisitor<'_> {
    fn add_regular_file(&mut self, entry: &WalkEntry<'_>) -> Result<()> {
        let name = archive_name(entry.relative_path);
        tracing::debug!("{} -> {}", entry.path.display(), name);

        if name == MARKER_PATH {
            // The one dynamic file: read whole, render, insert under the
            // final name. The .in path itself never reaches the archive.
            let text = String::from_utf8(fs::read(entry.path)?)?;
            let rendered = template::render(&text, self.ctx);
            self.archive
                .add_bytes(CONFIG_PATH, rendered.as_bytes(), DEFAULT_ENTRY_MODE)
        } else {
            self.archive
                .add_file(&name, entry.path, entry.mode, entry.size)
        }
    }
}

impl WalkVisitor for InstallerVisitor<'_> {
    fn on_regular_file(&mut self, entry: &WalkEntry<'_>) -> WalkAction {
        match self.add_regular_file(entry) {
            Ok(()) => WalkAction::Continue,
            Err(err) => {
                tracing::error!("{}: {}", entry.path.display(), err);
                self.error = Some(err);
                WalkAction::Fail
            }
        }
    }

    fn on_symlink(&mut self, entry: &WalkEntry<'_>) -> WalkAction {
        tracing::warn!(
            "ignoring symlink when creating zip: {}",
            entry.path.display()
        );
        WalkAction::Continue
    }

    fn on_special(&mut self, entry: &WalkEntry<'_>) -> WalkAction {
        tracing::warn!(
            "ignoring special file when creating zip: {}",
            entry.path.display()
        );
        WalkAction::Continue
    }

    fn on_finish(&mut self, success: bool) {
        tracing::debug!(
            "template walk finished: {}",
            if success { "ok" } else { "aborted" }
        );
    }
}

/// Generate the installer archive at `output` from the tree under
/// `template_dir`, substituting placeholders from `ctx`.
///
/// The archive is opened before the walk starts (so a bad destination
/// fails without touching the template tree) and closed on every exit
/// path. Any entry or traversal error fails the whole operation; the
/// output file must then be discarded.
pub fn generate<P: AsRef<Path>, Q: AsRef<Path>>(
    template_dir: P,
    output: Q,
    ctx: &PlaceholderContext,
) -> Result<()> {
    let root = template_dir.as_ref();
    tracing::info!(
        "generating installer from {} into {}",
        root.display(),
        output.as_ref().display()
    );

    let mut archive = ArchiveWriter::create(output.as_ref())?;

    let (walked, entry_error) = {
        let mut visitor = InstallerVisitor {
            archive: &mut archive,
            ctx,
            error: None,
        };
        let walked = walk::walk(root, &mut visitor);
        (walked, visitor.error.take())
    };

    // Close regardless of how the walk went, so the on-disk structure is
    // left as consistent as achievable even on failure.
    let closed = archive.finish();

    if let Some(err) = entry_error {
        return Err(err);
    }
    walked?;
    closed?;

    tracing::info!("installer created successfully");
    Ok(())
}
