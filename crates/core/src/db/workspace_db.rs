use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::db::{ConfirmationRecord, RunKind, RunRecord};

/// Minimum schema version we know how to handle.
///
/// `0` means "no schema yet" (fresh DB).
const MIN_SUPPORTED_SCHEMA_VERSION: i32 = 0;

/// Latest schema version this crate knows about.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Error type for workspace database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Underlying SQLite error.
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The database was created with a newer schema version than we support.
    #[error(
        "Unsupported schema version {found}; supported range is {min_supported}..={max_supported}"
    )]
    UnsupportedSchemaVersion { found: i32, min_supported: i32, max_supported: i32 },
}

/// Convenience result type for DB operations.
pub type DbResult<T> = Result<T, DbError>;

/// SQLite-backed workspace database.
///
/// This is a thin wrapper around `rusqlite::Connection` that is responsible for:
/// - Opening/creating the DB file.
/// - Applying schema migrations.
/// - Storing confirmations (one node id per component label) and run history.
#[derive(Debug)]
pub struct WorkspaceDb {
    conn: Connection,
}

impl WorkspaceDb {
    /// Open (or create) a workspace database at the given path and ensure the schema exists.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        apply_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory database, mainly for tests and one-off sessions.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        apply_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Expose a reference to the underlying connection for advanced callers.
    /// For most code, prefer higher-level helpers.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Record (or replace) the confirmed node for a component label.
    pub fn upsert_confirmation(&self, record: &ConfirmationRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO confirmations (component, node_id, confirmed_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(component) DO UPDATE SET
                node_id = excluded.node_id,
                confirmed_at = excluded.confirmed_at
            "#,
            params![record.component, record.node_id, record.confirmed_at],
        )?;
        Ok(())
    }

    /// Look up the confirmation for one component label.
    pub fn confirmation_for(&self, component: &str) -> DbResult<Option<ConfirmationRecord>> {
        let record = self
            .conn
            .query_row(
                r#"
                SELECT component, node_id, confirmed_at
                FROM confirmations
                WHERE component = ?1
                "#,
                params![component],
                |row| {
                    Ok(ConfirmationRecord {
                        component: row.get(0)?,
                        node_id: row.get(1)?,
                        confirmed_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Remove a confirmation; returns whether one existed.
    pub fn delete_confirmation(&self, component: &str) -> DbResult<bool> {
        let changed =
            self.conn.execute("DELETE FROM confirmations WHERE component = ?1", params![component])?;
        Ok(changed > 0)
    }

    /// List all confirmations (ordered by component label).
    pub fn list_confirmations(&self) -> DbResult<Vec<ConfirmationRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT component, node_id, confirmed_at
            FROM confirmations
            ORDER BY component
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ConfirmationRecord {
                component: row.get(0)?,
                node_id: row.get(1)?,
                confirmed_at: row.get(2)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Insert a run record and return its row id.
    pub fn insert_run(&self, record: &RunRecord) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO runs (kind, policy, nodes_digest, secondary_digest, overall_confidence,
                              resolved, unresolved, started_at, finished_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                record.kind.as_str(),
                record.policy,
                record.nodes_digest,
                record.secondary_digest,
                record.overall_confidence,
                record.resolved,
                record.unresolved,
                record.started_at,
                record.finished_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List runs, optionally filtered by kind.
    pub fn list_runs(&self, kind: Option<RunKind>) -> DbResult<Vec<RunRecord>> {
        fn map_run(row: &rusqlite::Row<'_>) -> rusqlite::Result<RunRecord> {
            let kind: String = row.get(0)?;
            let kind = kind.parse::<RunKind>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e.into())
            })?;
            Ok(RunRecord {
                kind,
                policy: row.get(1)?,
                nodes_digest: row.get(2)?,
                secondary_digest: row.get(3)?,
                overall_confidence: row.get(4)?,
                resolved: row.get(5)?,
                unresolved: row.get(6)?,
                started_at: row.get(7)?,
                finished_at: row.get(8)?,
            })
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT kind, policy, nodes_digest, secondary_digest, overall_confidence,
                   resolved, unresolved, started_at, finished_at
            FROM runs
            WHERE ?1 IS NULL OR kind = ?1
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map(params![kind.map(|k| k.as_str())], map_run)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

/// Apply schema migrations to bring the database to the latest version.
///
/// We use `PRAGMA user_version` as the schema version indicator.
///
/// Version map:
/// - 0: no schema
/// - 1: confirmations table
/// - 2: add runs table
fn apply_migrations(conn: &Connection) -> DbResult<()> {
    let current_version = current_schema_version(conn)?;

    // Reject DBs created with a newer schema than we support.
    if current_version > CURRENT_SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            found: current_version,
            min_supported: MIN_SUPPORTED_SCHEMA_VERSION,
            max_supported: CURRENT_SCHEMA_VERSION,
        });
    }

    if current_version < 1 {
        conn.execute_batch(
            r#"
            BEGIN;
            CREATE TABLE IF NOT EXISTS confirmations (
                component    TEXT PRIMARY KEY,
                node_id      TEXT NOT NULL,
                confirmed_at TEXT NOT NULL
            );

            PRAGMA user_version = 1;
            COMMIT;
            "#,
        )?;
    }

    if current_version < 2 {
        conn.execute_batch(
            r#"
            BEGIN;
            CREATE TABLE IF NOT EXISTS runs (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                kind               TEXT NOT NULL,
                policy             TEXT,
                nodes_digest       TEXT NOT NULL,
                secondary_digest   TEXT,
                overall_confidence REAL NOT NULL,
                resolved           INTEGER NOT NULL,
                unresolved         INTEGER NOT NULL,
                started_at         TEXT NOT NULL,
                finished_at        TEXT NOT NULL
            );

            PRAGMA user_version = 2;
            COMMIT;
            "#,
        )?;
    }

    Ok(())
}

/// Read the SQLite schema version from `PRAGMA user_version`.
fn current_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
