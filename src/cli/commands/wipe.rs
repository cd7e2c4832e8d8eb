use crate::roms::Roms;
use crate::wipe;

/// Which of a ROM's trees to wipe.
#[derive(Debug, Clone, Copy)]
pub enum WipeKind {
    System,
    Cache,
    Data,
    DalvikCache,
    Multiboot,
}

pub fn execute(kind: WipeKind, rom_id: &str) -> anyhow::Result<()> {
    let mut roms = Roms::new();
    roms.add_installed()?;

    match kind {
        WipeKind::System => wipe::wipe_system(&roms, rom_id)?,
        WipeKind::Cache => wipe::wipe_cache(&roms, rom_id)?,
        WipeKind::Data => wipe::wipe_data(&roms, rom_id)?,
        WipeKind::DalvikCache => wipe::wipe_dalvik_cache(&roms, rom_id)?,
        WipeKind::Multiboot => wipe::wipe_multiboot(&roms, rom_id)?,
    }

    println!("Wipe succeeded for ROM '{rom_id}'");
    Ok(())
}
