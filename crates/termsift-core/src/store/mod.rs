use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, TermsiftError};
use crate::index::IndexGeneration;
use crate::models::{GenerationInfo, GenerationRole, SampleGroup, TermEntry};

mod migration;

const LIVE_GENERATION_KEY: &str = "generation.live";
const PREVIOUS_GENERATION_KEY: &str = "generation.previous";

/// SQLite persistence for index generations and the live/previous pointers.
#[derive(Clone)]
pub struct SqliteIndexStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteIndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteIndexStore").finish_non_exhaustive()
    }
}

/// Fresh, sortable generation name: `gen-<utc timestamp>-<uuid8>`.
#[must_use]
pub fn new_generation_name(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("gen-{}-{}", now.format("%Y%m%dT%H%M%SZ"), &suffix[..8])
}

impl SqliteIndexStore {
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| TermsiftError::lock_poisoned("sqlite"))?;
        f(&conn)
    }

    fn with_tx<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| TermsiftError::lock_poisoned("sqlite"))?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        drop(conn);
        Ok(value)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        #[cfg(unix)]
        harden_sqlite_permissions(path)?;
        Ok(store)
    }

    pub fn get_system_value(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| read_system_value(conn, key))
    }

    pub fn live_generation_name(&self) -> Result<Option<String>> {
        self.get_system_value(LIVE_GENERATION_KEY)
    }

    pub fn previous_generation_name(&self) -> Result<Option<String>> {
        self.get_system_value(PREVIOUS_GENERATION_KEY)
    }

    /// Persist a complete generation without making it live.
    pub fn write_generation(&self, generation: &IndexGeneration) -> Result<()> {
        self.with_tx(|tx| {
            tx.execute(
                r"
                INSERT INTO generations(name, created_at, sample_group_count, term_count)
                VALUES (?1, ?2, ?3, ?4)
                ",
                params![
                    generation.name(),
                    generation.created_at(),
                    to_sql_count(generation.sample_groups().len())?,
                    to_sql_count(generation.terms().len())?,
                ],
            )?;
            {
                let mut stmt = tx.prepare(
                    r"
                    INSERT INTO sample_groups(generation, ordinal, group_id, study_id, doc_json)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    ",
                )?;
                for (ordinal, group) in generation.sample_groups().iter().enumerate() {
                    stmt.execute(params![
                        generation.name(),
                        to_sql_count(ordinal)?,
                        group.id,
                        group.study.id,
                        serde_json::to_string(group)?,
                    ])?;
                }
            }
            {
                let mut stmt = tx.prepare(
                    r"
                    INSERT INTO term_entries(generation, ordinal, name, doc_json)
                    VALUES (?1, ?2, ?3, ?4)
                    ",
                )?;
                for (ordinal, entry) in generation.terms().iter().enumerate() {
                    stmt.execute(params![
                        generation.name(),
                        to_sql_count(ordinal)?,
                        entry.name,
                        serde_json::to_string(entry)?,
                    ])?;
                }
            }
            Ok(())
        })?;
        info!(
            generation = generation.name(),
            sample_groups = generation.sample_groups().len(),
            terms = generation.terms().len(),
            "wrote index generation"
        );
        Ok(())
    }

    /// Make `name` live, demote the old live generation to previous and
    /// delete every other generation. Returns the demoted generation.
    pub fn promote(&self, name: &str) -> Result<Option<String>> {
        let demoted = self.with_tx(|tx| {
            if !generation_exists(tx, name)? {
                return Err(TermsiftError::NotFound(format!("generation {name}")));
            }
            let old_live = read_system_value(tx, LIVE_GENERATION_KEY)?;
            let demoted = old_live.filter(|old| old != name);
            write_system_value(tx, LIVE_GENERATION_KEY, Some(name))?;
            write_system_value(tx, PREVIOUS_GENERATION_KEY, demoted.as_deref())?;
            let removed = tx.execute(
                "DELETE FROM generations WHERE name != ?1 AND name != coalesce(?2, '')",
                params![name, demoted],
            )?;
            debug!(removed, "pruned superseded generations");
            Ok(demoted)
        })?;
        info!(live = name, previous = ?demoted, "promoted index generation");
        Ok(demoted)
    }

    /// Swap live and previous. Returns the generation that is now live.
    pub fn rollback(&self) -> Result<String> {
        let (live, previous) = self.with_tx(|tx| {
            let live = read_system_value(tx, LIVE_GENERATION_KEY)?;
            let Some(previous) = read_system_value(tx, PREVIOUS_GENERATION_KEY)? else {
                return Err(TermsiftError::Conflict(
                    "no previous generation to roll back to".to_string(),
                ));
            };
            write_system_value(tx, LIVE_GENERATION_KEY, Some(&previous))?;
            write_system_value(tx, PREVIOUS_GENERATION_KEY, live.as_deref())?;
            Ok((previous, live))
        })?;
        info!(live = %live, previous = ?previous, "rolled back index generation");
        Ok(live)
    }

    pub fn load_generation(&self, name: &str) -> Result<IndexGeneration> {
        self.with_conn(|conn| {
            let created_at = conn
                .query_row(
                    "SELECT created_at FROM generations WHERE name = ?1",
                    params![name],
                    |row| row.get::<_, String>(0),
                )
                .optional()?
                .ok_or_else(|| TermsiftError::NotFound(format!("generation {name}")))?;

            let mut stmt = conn.prepare(
                "SELECT doc_json FROM sample_groups WHERE generation = ?1 ORDER BY ordinal ASC",
            )?;
            let rows = stmt.query_map(params![name], |row| row.get::<_, String>(0))?;
            let mut groups = Vec::new();
            for row in rows {
                groups.push(serde_json::from_str::<SampleGroup>(&row?)?);
            }

            let mut stmt = conn.prepare(
                "SELECT doc_json FROM term_entries WHERE generation = ?1 ORDER BY ordinal ASC",
            )?;
            let rows = stmt.query_map(params![name], |row| row.get::<_, String>(0))?;
            let mut terms = Vec::new();
            for row in rows {
                terms.push(serde_json::from_str::<TermEntry>(&row?)?);
            }

            Ok(IndexGeneration::new(name, created_at, groups, terms))
        })
    }

    pub fn load_live(&self) -> Result<Option<IndexGeneration>> {
        match self.live_generation_name()? {
            Some(name) => self.load_generation(&name).map(Some),
            None => Ok(None),
        }
    }

    pub fn list_generations(&self) -> Result<Vec<GenerationInfo>> {
        let live = self.live_generation_name()?;
        let previous = self.previous_generation_name()?;
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT name, created_at, sample_group_count, term_count
                FROM generations
                ORDER BY created_at DESC, name DESC
                ",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?;

            let mut out = Vec::new();
            for row in rows {
                let (name, created_at, sample_group_count, term_count) = row?;
                let role = if live.as_deref() == Some(name.as_str()) {
                    Some(GenerationRole::Live)
                } else if previous.as_deref() == Some(name.as_str()) {
                    Some(GenerationRole::Previous)
                } else {
                    None
                };
                out.push(GenerationInfo {
                    name,
                    created_at,
                    sample_group_count: usize::try_from(sample_group_count).unwrap_or(0),
                    term_count: usize::try_from(term_count).unwrap_or(0),
                    role,
                });
            }
            Ok(out)
        })
    }
}

fn read_system_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM system_kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

fn write_system_value(conn: &Connection, key: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => {
            conn.execute(
                r"
                INSERT INTO system_kv(key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                  value = excluded.value,
                  updated_at = excluded.updated_at
                ",
                params![key, value, Utc::now().to_rfc3339()],
            )?;
        }
        None => {
            conn.execute("DELETE FROM system_kv WHERE key = ?1", params![key])?;
        }
    }
    Ok(())
}

fn generation_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM generations WHERE name = ?1",
            params![name],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    Ok(exists)
}

fn to_sql_count(value: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| TermsiftError::Internal(format!("count overflow: {value}")))
}

#[cfg(unix)]
fn harden_sqlite_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    for suffix in ["", "-wal", "-shm"] {
        let mut os = path.as_os_str().to_os_string();
        os.push(suffix);
        let candidate = PathBuf::from(os);
        if candidate.exists() {
            std::fs::set_permissions(candidate, std::fs::Permissions::from_mode(0o600))?;
        }
    }
    Ok(())
}
