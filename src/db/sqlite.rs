use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Open a SQLite connection to the given path and run migrations
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(())
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![
        (1, include_str!("../../resources/migrations/001_initial.sql")),
    ];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT MAX(version) FROM schema_version",
        [],
        |row| row.get::<_, i64>(0),
    )
    .unwrap_or(0)
}

/// Load the starter symptom catalog if the database is empty.
///
/// A catalog that already has rows is left untouched, so operators can
/// replace or extend the seed data without it being re-applied on startup.
pub fn seed_catalog(conn: &Connection) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM symptoms", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(false);
    }

    conn.execute_batch(include_str!("../../resources/seed/catalog.sql"))?;

    let seeded: i64 = conn.query_row("SELECT COUNT(*) FROM symptoms", [], |row| row.get(0))?;
    tracing::info!(symptoms = seeded, "Seeded starter symptom catalog");
    Ok(true)
}
