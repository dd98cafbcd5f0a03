//! SQLite title store.
//!
//! Provides schema creation, row loading for the title index, and the
//! unknown-title log, backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    GameRecord, StoreError, UNKNOWN_FIELD, UnknownEntry, placeholder_title, record_unknown,
    upsert_game,
};
pub use queries::{
    StoreStats, SystemCount, TitleRow, load_titles, store_stats, title_count,
    titles_per_system, unknown_entries,
};
pub use schema::{SchemaError, open_database, open_memory, open_read_only};
