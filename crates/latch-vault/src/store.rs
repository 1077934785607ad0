// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry CRUD over the encrypted `entries` table.
//!
//! Every payload is sealed with the entry's plaintext label as associated
//! data. `get` decrypts against the *currently stored* label, so any drift
//! between a label and the ciphertext it was bound to surfaces as an
//! authentication failure — a deliberate tamper/desync detector. Label
//! changes therefore always re-encrypt; there is no bare rename.
//!
//! `list` and `search` read only the plaintext label and timestamp columns.

use latch_config::VaultConfig;
use latch_core::{EntryId, LatchError};
use latch_storage::{map_sql_err, Database};
use rusqlite::params;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto;
use crate::fields::EntryFields;
use crate::now_stamp;
use crate::session::VaultSession;

/// One row of `list`/`search` output: plaintext columns only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub id: EntryId,
    pub label: String,
    pub updated_at: String,
}

/// CRUD over encrypted entries. All operations require an unlocked
/// [`VaultSession`]; a locked session yields a precondition error.
pub struct EntryStore<'a> {
    db: &'a Database,
    case_sensitive_search: bool,
}

impl<'a> EntryStore<'a> {
    pub fn new(db: &'a Database, config: &VaultConfig) -> Self {
        Self {
            db,
            case_sensitive_search: config.search_case_sensitive,
        }
    }

    /// Encrypt `fields` bound to `label` and insert a new entry.
    pub fn add(
        &self,
        session: &VaultSession,
        label: &str,
        fields: &EntryFields,
    ) -> Result<EntryId, LatchError> {
        let key = session.key()?;
        let plaintext = fields.to_bytes()?;
        let blob = crypto::seal(key, &plaintext, label.as_bytes())?;

        let now = now_stamp();
        self.db
            .connection()
            .execute(
                "INSERT INTO entries (display, data, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![label, blob, now, now],
            )
            .map_err(map_sql_err)?;

        let id = self.db.connection().last_insert_rowid();
        debug!(id, "entry added");
        Ok(id)
    }

    /// Fetch and decrypt one entry.
    ///
    /// The stored label is the associated data for decryption; if the label
    /// no longer matches what the payload was sealed under, this fails with
    /// [`LatchError::Authentication`].
    pub fn get(
        &self,
        session: &VaultSession,
        id: EntryId,
    ) -> Result<(String, EntryFields), LatchError> {
        let key = session.key()?;

        let row = self.db.connection().query_row(
            "SELECT display, data FROM entries WHERE id = ?1",
            params![id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?)),
        );
        let (label, blob) = match row {
            Ok(r) => r,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Err(LatchError::NotFound(id)),
            Err(e) => return Err(map_sql_err(e)),
        };

        let plaintext = Zeroizing::new(crypto::open(key, &blob, label.as_bytes())?);
        let fields = EntryFields::from_bytes(&plaintext)?;
        Ok((label, fields))
    }

    /// Replace an entry's label and fields.
    ///
    /// The payload is always re-encrypted under `new_label` and persisted
    /// together with it in a single UPDATE statement, keeping the
    /// label/ciphertext binding consistent at every point in time.
    pub fn update(
        &self,
        session: &VaultSession,
        id: EntryId,
        new_label: &str,
        fields: &EntryFields,
    ) -> Result<(), LatchError> {
        let key = session.key()?;
        let plaintext = fields.to_bytes()?;
        let blob = crypto::seal(key, &plaintext, new_label.as_bytes())?;

        let changed = self
            .db
            .connection()
            .execute(
                "UPDATE entries SET display = ?1, data = ?2, updated_at = ?3 WHERE id = ?4",
                params![new_label, blob, now_stamp(), id],
            )
            .map_err(map_sql_err)?;
        if changed == 0 {
            return Err(LatchError::NotFound(id));
        }
        debug!(id, "entry updated");
        Ok(())
    }

    /// Hard-delete an entry. No tombstone; an unknown id is an error rather
    /// than a silent no-op.
    pub fn delete(&self, session: &VaultSession, id: EntryId) -> Result<(), LatchError> {
        session.ensure_unlocked()?;

        let changed = self
            .db
            .connection()
            .execute("DELETE FROM entries WHERE id = ?1", params![id])
            .map_err(map_sql_err)?;
        if changed == 0 {
            return Err(LatchError::NotFound(id));
        }
        debug!(id, "entry deleted");
        Ok(())
    }

    /// List all entries, `updated_at` descending, ties broken by `id`
    /// descending. Never touches ciphertext.
    pub fn list(&self, session: &VaultSession) -> Result<Vec<EntrySummary>, LatchError> {
        session.ensure_unlocked()?;
        self.query_summaries(
            "SELECT id, display, updated_at FROM entries
             ORDER BY updated_at DESC, id DESC",
            params![],
        )
    }

    /// Substring search over labels, same ordering as [`list`](Self::list).
    ///
    /// Matching is literal (`instr`), so `%` and `_` in the keyword are not
    /// wildcards. Case sensitivity follows `vault.search_case_sensitive`;
    /// the insensitive default folds via SQL `lower()`, which is ASCII-only.
    pub fn search(
        &self,
        session: &VaultSession,
        keyword: &str,
    ) -> Result<Vec<EntrySummary>, LatchError> {
        session.ensure_unlocked()?;
        let sql = if self.case_sensitive_search {
            "SELECT id, display, updated_at FROM entries
             WHERE instr(display, ?1) > 0
             ORDER BY updated_at DESC, id DESC"
        } else {
            "SELECT id, display, updated_at FROM entries
             WHERE instr(lower(display), lower(?1)) > 0
             ORDER BY updated_at DESC, id DESC"
        };
        self.query_summaries(sql, params![keyword])
    }

    fn query_summaries(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<EntrySummary>, LatchError> {
        let mut stmt = self.db.connection().prepare(sql).map_err(map_sql_err)?;
        let rows = stmt
            .query_map(params, |row| {
                Ok(EntrySummary {
                    id: row.get(0)?,
                    label: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            })
            .map_err(map_sql_err)?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row.map_err(map_sql_err)?);
        }
        Ok(summaries)
    }
}
