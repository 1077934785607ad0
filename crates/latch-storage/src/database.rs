// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and lifecycle.
//!
//! One `Database` owns one `rusqlite::Connection`; all access is synchronous
//! and single-writer. Opening a second `Database` on the same vault file for
//! concurrent mutation is unsupported.

use std::path::Path;

use latch_core::LatchError;
use rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// A vault database: an open SQLite connection with the schema migrated.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the vault database at `path` and run migrations.
    ///
    /// WAL journaling with `synchronous=FULL` so that every committed
    /// statement is durable before the call returns.
    pub fn open(path: &Path) -> Result<Self, LatchError> {
        let mut conn = Connection::open(path).map_err(map_sql_err)?;

        // journal_mode returns the resulting mode as a row; discard it.
        conn.query_row("PRAGMA journal_mode = WAL", [], |_row| Ok(()))
            .map_err(map_sql_err)?;
        conn.pragma_update(None, "synchronous", "FULL")
            .map_err(map_sql_err)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(map_sql_err)?;

        migrations::run_migrations(&mut conn)?;

        debug!(path = %path.display(), "vault database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying connection.
    ///
    /// Single statements are atomic in SQLite, which is all the vault's
    /// mutation model requires; no multi-statement transactions are exposed.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Convert rusqlite errors to `LatchError::Storage`.
pub fn map_sql_err(e: rusqlite::Error) -> LatchError {
    LatchError::Storage {
        source: Box::new(e),
    }
}
