use clap::Subcommand;
use std::path::PathBuf;

pub mod generate;
pub mod wipe;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an AROMA installer zip from a template directory
    Generate {
        /// Template directory to archive
        template_dir: PathBuf,

        /// Output zip file
        output_file: PathBuf,
    },

    /// Wipe a ROM's system tree
    WipeSystem {
        /// ROM id (e.g. "primary", "dual")
        rom_id: String,
    },

    /// Wipe a ROM's cache tree
    WipeCache {
        /// ROM id
        rom_id: String,
    },

    /// Wipe a ROM's data tree (preserves the media directory)
    WipeData {
        /// ROM id
        rom_id: String,
    },

    /// Wipe a ROM's dalvik-cache
    WipeDalvikCache {
        /// ROM id
        rom_id: String,
    },

    /// Delete a ROM's multiboot data directory
    WipeMultiboot {
        /// ROM id
        rom_id: String,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Generate {
                template_dir,
                output_file,
            } => generate::execute(template_dir, output_file),
            Commands::WipeSystem { rom_id } => wipe::execute(wipe::WipeKind::System, rom_id),
            Commands::WipeCache { rom_id } => wipe::execute(wipe::WipeKind::Cache, rom_id),
            Commands::WipeData { rom_id } => wipe::execute(wipe::WipeKind::Data, rom_id),
            Commands::WipeDalvikCache { rom_id } => {
                wipe::execute(wipe::WipeKind::DalvikCache, rom_id)
            }
            Commands::WipeMultiboot { rom_id } => wipe::execute(wipe::WipeKind::Multiboot, rom_id),
        }
    }
}
