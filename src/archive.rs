//! Streaming ZIP archive writer
//!
//! Thin wrapper over [`zip::ZipWriter`] that enforces the policies every
//! entry of a generated installer shares: deflate at the default level,
//! bounded-buffer streaming for file content, and per-entry ZIP64 selection
//! once a file reaches the 32-bit size ceiling.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};

/// Fixed chunk size for streaming file content into the archive.
const STREAM_BUF_SIZE: usize = 32 * 1024;

/// Mode bits applied to synthetic (in-memory) entries.
pub const DEFAULT_ENTRY_MODE: u32 = 0o644;

/// An entry at or above this size needs the ZIP64 extension. Writing such an
/// entry without it silently corrupts the archive, so this is checked per
/// entry, not per archive.
const ZIP64_THRESHOLD: u64 = (1 << 32) - 1;

fn needs_zip64(size: u64) -> bool {
    size >= ZIP64_THRESHOLD
}

/// Streaming writer for one output archive.
///
/// Opened once, finished exactly once. Any entry-level error poisons the
/// whole session: the caller must still call [`ArchiveWriter::finish`] so
/// the on-disk structure is as consistent as achievable, but must treat the
/// operation as failed.
#[derive(Debug)]
pub struct ArchiveWriter {
    inner: ZipWriter<BufWriter<File>>,
}

impl ArchiveWriter {
    /// Create the destination archive, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| Error::ArchiveCreateFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        Ok(ArchiveWriter {
            inner: ZipWriter::new(BufWriter::new(file)),
        })
    }

    fn options(mode: u32, size: u64) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(mode)
            .large_file(needs_zip64(size))
    }

    /// Stream a file from disk into a new entry named `name`.
    ///
    /// `mode` and `size` come from the stat captured at traversal time;
    /// `size` drives ZIP64 selection. Content is copied through a fixed
    /// 32 KiB buffer, never loaded wholesale.
    pub fn add_file(&mut self, name: &str, source: &Path, mode: u32, size: u64) -> Result<()> {
        let mut file = File::open(source)?;

        self.inner.start_file(name, Self::options(mode, size))?;

        let mut buf = [0u8; STREAM_BUF_SIZE];
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            self.inner.write_all(&buf[..n])?;
        }

        Ok(())
    }

    /// Write an in-memory buffer as a new entry named `name`.
    ///
    /// Used for generated content; gets [`DEFAULT_ENTRY_MODE`] unless the
    /// caller passes something else.
    pub fn add_bytes(&mut self, name: &str, data: &[u8], mode: u32) -> Result<()> {
        self.inner
            .start_file(name, Self::options(mode, data.len() as u64))?;
        self.inner.write_all(data)?;
        Ok(())
    }

    /// Write the central directory and flush the archive to disk.
    pub fn finish(self) -> Result<()> {
        let mut writer = self.inner.finish()?;
        writer.flush()?;
        Ok(())
    }
}
