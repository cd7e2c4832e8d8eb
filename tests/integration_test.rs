use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use mbutil::prelude::*;
use mbutil::template::BASE_INDEX;
use tempfile::tempdir;

const TEMPLATE_TEXT: &str = "ini_set(\"rom_name\", \"@MBTOOL_VERSION@\");\n\
@ROM_MENU_ITEMS@\n\
@ROM_SELECTION_ITEMS@\n\
range(@FIRST_INDEX@, @LAST_INDEX@);\n";

fn write_template_tree(root: &Path) {
    fs::create_dir_all(root.join("META-INF/com/google/android")).unwrap();
    fs::write(
        root.join("META-INF/com/google/android/aroma-config.in"),
        TEMPLATE_TEXT,
    )
    .unwrap();
    fs::write(
        root.join("META-INF/com/google/android/update-binary"),
        b"#!/sbin/sh\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("multiboot")).unwrap();
    fs::write(root.join("multiboot/busybox"), vec![0u8; 70_000]).unwrap();
}

fn entry_names(archive_path: &Path) -> BTreeSet<String> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn entry_bytes(archive_path: &Path, name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    let mut buf = Vec::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_end(&mut buf)
        .unwrap();
    buf
}

fn one_rom_context() -> PlaceholderContext {
    PlaceholderContext::new(vec![RomItem {
        id: "primary".to_string(),
        name: "Primary".to_string(),
    }])
}

#[test]
fn generated_archive_contains_exactly_the_regular_files() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    write_template_tree(&template);

    let output = dir.path().join("installer.zip");
    generate(&template, &output, &one_rom_context()).unwrap();

    let names = entry_names(&output);
    let expected: BTreeSet<String> = [
        "META-INF/com/google/android/aroma-config",
        "META-INF/com/google/android/update-binary",
        "multiboot/busybox",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(names, expected);
    // The .in source path never appears in the output.
    assert!(!names.contains(MARKER_PATH));
}

#[test]
fn non_marker_files_round_trip_byte_identical() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    write_template_tree(&template);

    let output = dir.path().join("installer.zip");
    generate(&template, &output, &one_rom_context()).unwrap();

    assert_eq!(
        entry_bytes(&output, "multiboot/busybox"),
        fs::read(template.join("multiboot/busybox")).unwrap()
    );
    assert_eq!(
        entry_bytes(&output, "META-INF/com/google/android/update-binary"),
        b"#!/sbin/sh\n"
    );
}

#[test]
fn marker_file_is_rendered_not_copied() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    write_template_tree(&template);

    let ctx = one_rom_context();
    let output = dir.path().join("installer.zip");
    generate(&template, &output, &ctx).unwrap();

    let config = String::from_utf8(entry_bytes(&output, CONFIG_PATH)).unwrap();
    assert_eq!(config, render(TEMPLATE_TEXT, &ctx));
    assert!(config.contains(mbutil::VERSION));
    assert!(config.contains("\"Primary\", \"\", \"@default\","));
    assert!(config.contains(&format!("range({}, {});", BASE_INDEX, BASE_INDEX)));
    assert!(!config.contains("@ROM_MENU_ITEMS@"));
}

#[cfg(unix)]
#[test]
fn symlinks_and_modes() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    write_template_tree(&template);
    fs::set_permissions(
        template.join("META-INF/com/google/android/update-binary"),
        fs::Permissions::from_mode(0o755),
    )
    .unwrap();
    std::os::unix::fs::symlink("busybox", template.join("multiboot/sh")).unwrap();

    let output = dir.path().join("installer.zip");
    generate(&template, &output, &one_rom_context()).unwrap();

    // Symlinks never become entries.
    let names = entry_names(&output);
    assert!(!names.contains("multiboot/sh"));

    // Mode bits captured at walk time survive into the archive.
    let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
    let entry = archive
        .by_name("META-INF/com/google/android/update-binary")
        .unwrap();
    assert_eq!(entry.unix_mode().map(|mode| mode & 0o777), Some(0o755));
}

#[test]
fn two_runs_are_deterministic() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    write_template_tree(&template);

    let ctx = one_rom_context();
    let first = dir.path().join("first.zip");
    let second = dir.path().join("second.zip");
    generate(&template, &first, &ctx).unwrap();
    generate(&template, &second, &ctx).unwrap();

    assert_eq!(entry_names(&first), entry_names(&second));
    assert_eq!(
        entry_bytes(&first, CONFIG_PATH),
        entry_bytes(&second, CONFIG_PATH)
    );
}

#[test]
fn missing_destination_directory_fails_before_walking() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    write_template_tree(&template);

    let output = dir.path().join("no-such-dir/installer.zip");
    let err = generate(&template, &output, &one_rom_context()).unwrap_err();

    // The open failure precedes any traversal.
    assert!(matches!(err, Error::ArchiveCreateFailed { .. }));
    assert!(!output.exists());
}

#[test]
fn empty_template_directory_yields_empty_archive() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    fs::create_dir(&template).unwrap();

    let output = dir.path().join("installer.zip");
    generate(&template, &output, &PlaceholderContext::default()).unwrap();

    assert!(entry_names(&output).is_empty());
}

#[test]
fn missing_template_directory_fails() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("installer.zip");

    let err = generate(
        &dir.path().join("nope"),
        &output,
        &PlaceholderContext::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::WalkDirError(_)));
}

#[test]
fn registry_snapshot_drives_the_rendered_config() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("template");
    write_template_tree(&template);

    // Two installed ROMs, one with a config.json display name.
    let mb_dir = dir.path().join("MultiBoot");
    fs::create_dir_all(mb_dir.join("primary")).unwrap();
    fs::create_dir_all(mb_dir.join("dual")).unwrap();
    fs::write(
        mb_dir.join("primary/config.json"),
        br#"{"id": "primary", "name": "Stock ROM"}"#,
    )
    .unwrap();

    let mut roms = Roms::with_multiboot_dir(&mb_dir);
    roms.add_installed().unwrap();
    let ctx = PlaceholderContext::from_registry(&roms);

    let output = dir.path().join("installer.zip");
    generate(&template, &output, &ctx).unwrap();

    let config = String::from_utf8(entry_bytes(&output, CONFIG_PATH)).unwrap();
    // Sorted registry order: dual first, primary ("Stock ROM") second.
    assert!(config.contains("\"dual\", \"\", \"@default\","));
    assert!(config.contains("\"Stock ROM\", \"\", \"@default\","));
    assert!(config.contains(&format!("range({}, {});", BASE_INDEX, BASE_INDEX + 1)));
    assert!(config.contains("setvar(\"romname\", \"Stock ROM\");"));
}
