//! Partition wipe operations
//!
//! Recursive deletion of the filesystem trees a ROM owns. A path that does
//! not exist counts as success, matching the recovery semantics these
//! commands are used under: wiping something already gone is not an error.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::roms::Roms;

/// Delete `path` and everything under it. Missing paths are success.
pub fn delete_recursive<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    tracing::info!("recursively deleting {}", path.display());

    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            if metadata.is_dir() {
                fs::remove_dir_all(path)?;
            } else {
                fs::remove_file(path)?;
            }
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Delete the contents of `dir`, keeping the directory itself. When
/// `wipe_media` is false the top-level `media` entry is preserved (user
/// data under `/data/media` survives a data wipe). A missing directory is
/// success.
pub fn wipe_directory<P: AsRef<Path>>(dir: P, wipe_media: bool) -> Result<()> {
    let dir = dir.as_ref();
    tracing::info!(
        "wiping {}{}",
        dir.display(),
        if wipe_media { "" } else { " (excluding media directory)" }
    );

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    for entry in entries {
        let entry = entry?;
        if !wipe_media && entry.file_name() == "media" {
            continue;
        }
        delete_recursive(entry.path())?;
    }

    Ok(())
}

/// Wipe the system tree of the ROM `id`.
pub fn wipe_system(roms: &Roms, id: &str) -> Result<()> {
    let rom = roms.require(id)?;
    wipe_directory(&rom.system_path, true)?;
    // Drop the ROM's now-empty /system dir; harmless if it isn't empty.
    let _ = fs::remove_dir(&rom.system_path);
    Ok(())
}

/// Wipe the cache tree of the ROM `id`.
pub fn wipe_cache(roms: &Roms, id: &str) -> Result<()> {
    let rom = roms.require(id)?;
    wipe_directory(&rom.cache_path, true)?;
    let _ = fs::remove_dir(&rom.cache_path);
    Ok(())
}

/// Wipe the data tree of the ROM `id`, preserving its media directory.
pub fn wipe_data(roms: &Roms, id: &str) -> Result<()> {
    let rom = roms.require(id)?;
    wipe_directory(&rom.data_path, false)?;
    let _ = fs::remove_dir(rom.data_path.join("media"));
    let _ = fs::remove_dir(&rom.data_path);
    Ok(())
}

/// Wipe the dalvik-cache of the ROM `id`.
///
/// Most ROMs use `<data>/dalvik-cache`, some use `<cache>/dalvik-cache`;
/// both are removed.
pub fn wipe_dalvik_cache(roms: &Roms, id: &str) -> Result<()> {
    let rom = roms.require(id)?;
    delete_recursive(rom.data_path.join("dalvik-cache"))?;
    delete_recursive(rom.cache_path.join("dalvik-cache"))?;
    Ok(())
}

/// Delete the ROM's directory under the multiboot data directory.
pub fn wipe_multiboot(roms: &Roms, id: &str) -> Result<()> {
    roms.require(id)?;
    delete_recursive(roms.multiboot_path(id))
}
