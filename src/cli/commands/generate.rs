use std::path::Path;

use crate::generator;
use crate::roms::Roms;
use crate::template::PlaceholderContext;

pub fn execute(template_dir: &Path, output_file: &Path) -> anyhow::Result<()> {
    let mut roms = Roms::new();
    roms.add_installed()?;

    println!(
        "Generating installer from {} ({} installed ROM(s))",
        template_dir.display(),
        roms.len()
    );

    let ctx = PlaceholderContext::from_registry(&roms);
    generator::generate(template_dir, output_file, &ctx)?;

    println!("Installer created: {}", output_file.display());
    Ok(())
}
