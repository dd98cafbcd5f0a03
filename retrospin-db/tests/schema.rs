use retrospin_db::schema::{CURRENT_VERSION, create_schema};
use retrospin_db::{SchemaError, open_database, open_memory, open_read_only};

fn table_exists(conn: &rusqlite::Connection, table: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [table],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in ["schema_version", "games", "unknown", "systems"] {
        assert!(table_exists(&conn, table), "Table '{}' should exist", table);
    }
}

#[test]
fn open_database_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.db");
    {
        let conn = open_database(&path).unwrap();
        assert!(table_exists(&conn, "games"));
    }
    assert!(path.is_file());

    // Reopening an existing store keeps its version
    let conn = open_database(&path).unwrap();
    let rows: i32 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn open_database_adopts_etl_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE games (serial TEXT, title TEXT, category TEXT, region TEXT,
                                 system TEXT, language TEXT, PRIMARY KEY (serial, system));
             INSERT INTO games (serial, title, system) VALUES ('T-4301G', 'Rayman', 'ss');",
        )
        .unwrap();
    }
    let conn = open_database(&path).unwrap();
    assert!(table_exists(&conn, "schema_version"));
    assert!(table_exists(&conn, "unknown"));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn open_database_refuses_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }
    let err = open_database(&path).unwrap_err();
    assert!(matches!(err, SchemaError::VersionMismatch { .. }));
}

#[test]
fn read_only_requires_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");
    let err = open_read_only(&path).unwrap_err();
    assert!(matches!(err, SchemaError::Missing(_)));
    assert!(!path.exists());
}

#[test]
fn read_only_requires_games_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE other (x INTEGER);").unwrap();
    }
    let err = open_read_only(&path).unwrap_err();
    assert!(matches!(err, SchemaError::NoGamesTable(_)));
}

#[test]
fn read_only_rejects_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.db");
    drop(open_database(&path).unwrap());

    let conn = open_read_only(&path).unwrap();
    let result = conn.execute(
        "INSERT INTO games (serial, title, system) VALUES ('X', 'Y', 'psx')",
        [],
    );
    assert!(result.is_err());
}
