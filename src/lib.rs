//! # mbutil
//!
//! Multiboot utilities for Android ROM management.
//!
//! ## What it does
//!
//! - **Installer generation** - Build an AROMA installer zip from a
//!   template directory, substituting the installed-ROM list into the
//!   installer's config script
//! - **ROM registry** - Enumerate installed ROMs and their per-ROM
//!   configuration
//! - **Wipe operations** - Recursively wipe a ROM's system, cache, data,
//!   dalvik-cache or multiboot directories
//!
//! ## Quick Start
//!
//! ```no_run
//! use mbutil::roms::Roms;
//! use mbutil::template::PlaceholderContext;
//!
//! let mut roms = Roms::new();
//! roms.add_installed()?;
//!
//! let ctx = PlaceholderContext::from_registry(&roms);
//! mbutil::generator::generate("/tmp/template", "/tmp/installer.zip", &ctx)?;
//! # Ok::<(), mbutil::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `mbutil` command-line binary

pub mod archive;
pub mod error;
pub mod generator;
pub mod roms;
pub mod template;
pub mod walk;
pub mod wipe;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::archive::ArchiveWriter;
    pub use crate::error::{Error, Result};
    pub use crate::generator::{CONFIG_PATH, MARKER_PATH, generate};
    pub use crate::roms::{Rom, RomConfig, Roms};
    pub use crate::template::{PlaceholderContext, RomItem, render};
    pub use crate::walk::{EntryKind, WalkAction, WalkEntry, WalkVisitor, walk};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
