//! Installed ROM registry and per-ROM configuration
//!
//! Each installed ROM owns a directory under the multiboot data directory
//! (`/data/media/0/MultiBoot/<id>` on device). The directory name is the
//! ROM id; an optional `config.json` inside it carries the user-facing
//! display name.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default on-device location of the per-ROM data directories.
pub const DEFAULT_MULTIBOOT_DIR: &str = "/data/media/0/MultiBoot";

/// One installed ROM and the filesystem trees it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    /// Stable identifier (directory name under the multiboot dir).
    pub id: String,
    /// The ROM's system tree.
    pub system_path: PathBuf,
    /// The ROM's cache tree.
    pub cache_path: PathBuf,
    /// The ROM's data tree.
    pub data_path: PathBuf,
}

impl Rom {
    /// Build a ROM record for `id`. The primary ROM owns the real mount
    /// points; every other ROM lives under `/data/multiboot/<id>`.
    fn new(id: &str) -> Self {
        if id == "primary" {
            Rom {
                id: id.to_string(),
                system_path: PathBuf::from("/system"),
                cache_path: PathBuf::from("/cache"),
                data_path: PathBuf::from("/data"),
            }
        } else {
            let base = Path::new("/data/multiboot").join(id);
            Rom {
                id: id.to_string(),
                system_path: base.join("system"),
                cache_path: base.join("cache"),
                data_path: base.join("data"),
            }
        }
    }
}

/// Per-ROM configuration stored as `config.json` in the ROM's multiboot
/// directory. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RomConfig {
    /// ROM id the config claims to belong to.
    pub id: Option<String>,
    /// User-facing display name.
    pub name: Option<String>,
}

impl RomConfig {
    /// Load a config from a JSON file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Registry of installed ROMs.
pub struct Roms {
    multiboot_dir: PathBuf,
    roms: Vec<Rom>,
}

impl Roms {
    /// Registry rooted at the on-device multiboot directory.
    pub fn new() -> Self {
        Self::with_multiboot_dir(DEFAULT_MULTIBOOT_DIR)
    }

    /// Registry rooted somewhere else (primarily for tests).
    pub fn with_multiboot_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Roms {
            multiboot_dir: dir.into(),
            roms: Vec::new(),
        }
    }

    /// Enumerate installed ROMs: every subdirectory of the multiboot dir,
    /// sorted by id so the resulting menu order is stable. A missing
    /// multiboot dir simply yields an empty registry.
    pub fn add_installed(&mut self) -> Result<()> {
        let entries = match std::fs::read_dir(&self.multiboot_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                ids.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        ids.sort();

        for id in &ids {
            if self.find_by_id(id).is_none() {
                self.roms.push(Rom::new(id));
            }
        }

        tracing::debug!("registry: {} installed ROM(s)", self.roms.len());
        Ok(())
    }

    /// Look a ROM up by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Rom> {
        self.roms.iter().find(|rom| rom.id == id)
    }

    /// Like [`Roms::find_by_id`] but an error for callers that require the
    /// ROM to exist.
    pub fn require(&self, id: &str) -> Result<&Rom> {
        self.find_by_id(id).ok_or_else(|| Error::RomNotFound {
            id: id.to_string(),
        })
    }

    /// Installed ROMs in registry (menu) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rom> {
        self.roms.iter()
    }

    /// Number of installed ROMs.
    pub fn len(&self) -> usize {
        self.roms.len()
    }

    /// True when no ROMs are installed.
    pub fn is_empty(&self) -> bool {
        self.roms.is_empty()
    }

    /// The ROM's directory under the multiboot dir.
    pub fn multiboot_path(&self, id: &str) -> PathBuf {
        self.multiboot_dir.join(id)
    }

    /// Path of the ROM's `config.json`.
    pub fn config_path(&self, id: &str) -> PathBuf {
        self.multiboot_path(id).join("config.json")
    }

    /// Resolve the display name for `id`, falling back to the id itself
    /// when no config exists or it carries no name.
    pub fn display_name(&self, id: &str) -> String {
        match RomConfig::load_file(self.config_path(id)) {
            Ok(config) => config.name.unwrap_or_else(|| id.to_string()),
            Err(err) => {
                tracing::debug!("no usable config for {id}: {err}");
                id.to_string()
            }
        }
    }
}

impl Default for Roms {
    fn default() -> Self {
        Self::new()
    }
}
