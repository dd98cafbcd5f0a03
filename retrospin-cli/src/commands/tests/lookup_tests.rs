use super::*;
use std::path::Path;

use retrospin_db::{GameRecord, open_database, upsert_game};

fn settings_with_store(dir: &Path, games: &[(&str, &str, &str)]) -> Settings {
    let db_path = dir.join("games.db");
    let conn = open_database(&db_path).unwrap();
    for (serial, title, system) in games {
        upsert_game(&conn, &GameRecord::new(*serial, *title, *system)).unwrap();
    }
    let mut settings = Settings::default();
    settings.index.db_path = Some(db_path);
    settings
}

#[test]
fn lookup_accepts_underscore_serial() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_with_store(dir.path(), &[("SLUS-00515", "Crash Bandicoot 3", "psx")]);

    let title = run_lookup(&settings, "slus_00515", System::Psx).unwrap();
    assert_eq!(title.as_deref(), Some("Crash Bandicoot 3"));
}

#[test]
fn lookup_is_scoped_to_system() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_with_store(dir.path(), &[("T-12345", "Some Saturn Game", "ss")]);

    let title = run_lookup(&settings, "T-12345", System::MegaCd).unwrap();
    assert_eq!(title, None);
}

#[test]
fn lookup_without_store_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.index.db_path = Some(dir.path().join("missing.db"));

    assert!(matches!(
        run_lookup(&settings, "SLUS-00515", System::Psx),
        Err(CliError::Database(_))
    ));
}
