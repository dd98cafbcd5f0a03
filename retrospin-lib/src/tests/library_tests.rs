use super::*;
use std::fs;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn sanitize_drops_forbidden_characters() {
    assert_eq!(
        sanitize_title(" Resident Evil: Director's Cut? "),
        "Resident Evil Director's Cut"
    );
    assert_eq!(sanitize_title("AC/DC <Live>"), "ACDC Live");
}

#[test]
fn clean_title_keeps_region() {
    assert_eq!(clean_title("Grandia (Japan) (En,Ja)"), "Grandia (Japan)");
    assert_eq!(clean_title("Panzer Dragoon (Europe) (En,Fr,De)"), "Panzer Dragoon (Europe)");
    assert_eq!(clean_title("Sonic CD (USA)"), "Sonic CD (USA)");
    assert_eq!(clean_title("Tomb Raider (USA) (Rev 1)"), "Tomb Raider (USA)");
    assert_eq!(clean_title("Nights (Japan) (Beta)"), "Nights (Japan)");
    assert_eq!(clean_title("Saturn Demo (1995-08-21)"), "Saturn Demo");
    assert_eq!(clean_title("Half Title (Rev"), "Half Title");
}

#[test]
fn chd_found_in_first_directory() {
    let dir = tempfile::tempdir().unwrap();
    let fat = dir.path().join("fat");
    let usb = dir.path().join("usb");
    touch(&fat.join("Sega Rally Championship (USA).chd"));
    touch(&usb.join("Sega Rally Championship (USA).chd"));

    let found = find_game_image(
        "Sega Rally Championship (USA)",
        System::Saturn,
        &[fat.clone(), usb],
    );
    assert_eq!(found, Some(fat.join("Sega Rally Championship (USA).chd")));
}

#[test]
fn chd_preferred_over_cue_pair() {
    let dir = tempfile::tempdir().unwrap();
    let fat = dir.path().join("fat");
    let usb = dir.path().join("usb");
    touch(&fat.join("Metal Gear Solid.cue"));
    touch(&fat.join("Metal Gear Solid.bin"));
    touch(&usb.join("nested").join("Metal Gear Solid.chd"));

    let found = find_game_image("Metal Gear Solid", System::Psx, &[fat, usb.clone()]);
    assert_eq!(found, Some(usb.join("nested").join("Metal Gear Solid.chd")));
}

#[test]
fn cue_requires_matching_bin() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    touch(&root.join("a").join("Sonic CD (USA).cue"));
    touch(&root.join("b").join("Sonic CD (USA).cue"));
    touch(&root.join("b").join("Sonic CD (USA).bin"));

    let found = find_game_image("Sonic CD (USA)", System::MegaCd, &[root.clone()]);
    assert_eq!(found, Some(root.join("b").join("Sonic CD (USA).cue")));
}

#[test]
fn falls_back_to_cleaned_title() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    touch(&root.join("Grandia (Japan).chd"));

    let found = find_game_image("Grandia (Japan) (En,Ja)", System::Saturn, &[root.clone()]);
    assert_eq!(found, Some(root.join("Grandia (Japan).chd")));
}

#[test]
fn sanitized_title_matches_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    touch(&root.join("Resident Evil Director's Cut (USA).chd"));

    let found = find_game_image(
        "Resident Evil: Director's Cut (USA)",
        System::Psx,
        &[root.clone()],
    );
    assert_eq!(found, Some(root.join("Resident Evil Director's Cut (USA).chd")));
}

#[test]
fn nothing_found_in_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let found = find_game_image(
        "Metal Gear Solid",
        System::Psx,
        &[dir.path().join("does-not-exist")],
    );
    assert_eq!(found, None);
    assert_eq!(find_game_image("", System::Psx, &[dir.path().to_path_buf()]), None);
}
