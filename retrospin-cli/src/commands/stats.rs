use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retrospin_lib::Settings;

use crate::CliError;

pub(crate) fn run_stats(settings: &Settings) -> Result<(), CliError> {
    let db_path = settings.db_path();

    if !db_path.exists() {
        log::warn!("No title database found at {}", db_path.display());
        log::info!("Build one with the title ETL scripts, or pass --db.");
        return Ok(());
    }

    let conn = retrospin_db::open_read_only(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open title database: {}", e)))?;
    let stats = retrospin_db::store_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query title stats: {}", e)))?;

    log::info!(
        "{}",
        "Title Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    for row in &stats.per_system {
        let label = row.name.as_deref().unwrap_or(&row.system);
        match &row.core {
            Some(core) => log::info!(
                "  {:<24} {:>8}  {}",
                label,
                row.titles,
                format!("[{}]", core).if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!("  {:<24} {:>8}", label, row.titles),
        }
    }
    log::info!("  {:<24} {:>8}", "Total titles", stats.titles);
    log::info!("  {:<24} {:>8}", "Unknown discs", stats.unknown);

    Ok(())
}
