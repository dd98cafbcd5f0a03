use super::*;

/// Titles stored under exactly this key.
fn titles<'a>(index: &'a TitleIndex, system: &str, serial: &str) -> &'a [TitleEntry] {
    let key = (system.to_string(), normalize_serial(serial));
    index.entries.get(&key).map(Vec::as_slice).unwrap_or_default()
}

fn row(serial: &str, title: &str, system: &str) -> TitleRow {
    TitleRow {
        serial: serial.to_string(),
        title: title.to_string(),
        system: system.to_string(),
    }
}

#[test]
fn keys_are_normalized() {
    let mut index = TitleIndex::new();
    index.insert("PSX", " slus_00515 ", "Metal Gear Solid (USA) (Disc 1)");
    let found = titles(&index, "psx", "SLUS00515");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].serial, "SLUS00515");
    assert_eq!(titles(&index, "psx", "slus_00515"), found);
}

#[test]
fn duplicate_keys_keep_every_title() {
    let index = TitleIndex::from_rows([
        row("T-1234", "Game (Disc 1)", "ss"),
        row("T_1234", "Game (Disc 2)", "ss"),
    ]);
    // `T_1234` normalizes to `T1234`, a different key from `T-1234`
    assert_eq!(index.key_count(), 2);

    let index = TitleIndex::from_rows([
        row("SLUS_00515", "First", "psx"),
        row("slus00515", "Second", "psx"),
    ]);
    assert_eq!(index.key_count(), 1);
    assert_eq!(index.len(), 2);
    let names: Vec<&str> = titles(&index, "psx", "SLUS00515")
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[test]
fn systems_are_separate() {
    let index = TitleIndex::from_rows([
        row("T-123", "Saturn Game", "ss"),
        row("T-123", "Mega CD Game", "mcd"),
    ]);
    assert_eq!(titles(&index, "ss", "T-123")[0].title, "Saturn Game");
    assert_eq!(titles(&index, "mcd", "T-123")[0].title, "Mega CD Game");
    assert!(titles(&index, "psx", "T-123").is_empty());
}

#[test]
fn blank_serials_are_dropped() {
    let index = TitleIndex::from_rows([row("  ", "Nothing", "psx"), row("___", "Nothing", "psx")]);
    assert!(index.is_empty());
}

#[test]
fn keys_for_lists_one_system_in_order() {
    let index = TitleIndex::from_rows([
        row("SLUS-00776", "Disc 2", "psx"),
        row("MK-81051", "Sega Rally", "ss"),
        row("SLUS-00515", "Disc 1", "psx"),
        row("SLES-01234", "Euro", "psx"),
    ]);
    let keys: Vec<&str> = index.keys_for("psx").map(|(serial, _)| serial).collect();
    assert_eq!(keys, vec!["SLES-01234", "SLUS-00515", "SLUS-00776"]);
    assert_eq!(index.keys_for("ss").count(), 1);
    assert_eq!(index.keys_for("mcd").count(), 0);
}

#[test]
fn open_missing_store_is_index_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = TitleIndex::open(&dir.path().join("games.db")).unwrap_err();
    assert!(matches!(err, ProbeError::IndexUnavailable(_)));
}

#[test]
fn open_loads_store_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.db");
    {
        let conn = retrospin_db::open_database(&path).unwrap();
        retrospin_db::upsert_game(
            &conn,
            &retrospin_db::GameRecord::new("MK-81051", "Sega Rally Championship (USA)", "SS"),
        )
        .unwrap();
    }
    let index = TitleIndex::open(&path).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(
        titles(&index, "ss", "MK-81051")[0].title,
        "Sega Rally Championship (USA)"
    );
}
