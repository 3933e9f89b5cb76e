use rusqlite::Connection;

use crate::error::{Result, TermsiftError};

use super::SqliteIndexStore;

const MIGRATION_SCHEMA_SQL: &str = r"
    PRAGMA journal_mode = WAL;
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS generations (
        name TEXT PRIMARY KEY,
        created_at TEXT NOT NULL,
        sample_group_count INTEGER NOT NULL,
        term_count INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS sample_groups (
        generation TEXT NOT NULL REFERENCES generations(name) ON DELETE CASCADE,
        ordinal INTEGER NOT NULL,
        group_id TEXT NOT NULL,
        study_id TEXT NOT NULL,
        doc_json TEXT NOT NULL,
        PRIMARY KEY (generation, ordinal)
    );

    CREATE INDEX IF NOT EXISTS idx_sample_groups_study
    ON sample_groups(generation, study_id);

    CREATE TABLE IF NOT EXISTS term_entries (
        generation TEXT NOT NULL REFERENCES generations(name) ON DELETE CASCADE,
        ordinal INTEGER NOT NULL,
        name TEXT NOT NULL,
        doc_json TEXT NOT NULL,
        PRIMARY KEY (generation, ordinal)
    );

    CREATE TABLE IF NOT EXISTS system_kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

impl SqliteIndexStore {
    pub fn migrate(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(MIGRATION_SCHEMA_SQL)?;
            ensure_required_column(
                conn,
                "sample_groups",
                "study_id",
                "unsupported sample_groups schema: study_id is missing; rebuild the index database",
            )?;
            ensure_required_column(
                conn,
                "term_entries",
                "name",
                "unsupported term_entries schema: name is missing; rebuild the index database",
            )?;
            Ok(())
        })
    }
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for row in rows {
        if row? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn ensure_required_column(
    conn: &Connection,
    table: &str,
    column: &str,
    error_message: &'static str,
) -> Result<()> {
    if has_column(conn, table, column)? {
        Ok(())
    } else {
        Err(TermsiftError::Validation(error_message.to_string()))
    }
}
