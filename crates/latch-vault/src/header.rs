// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault header and the verifier protocol: initialization and unlock.
//!
//! The header is the single immutable row holding KDF parameters and the
//! verifier blob: the fixed marker encrypted under the derived key with
//! empty associated data. Unlock re-derives the key and attempts to decrypt
//! the verifier; success proves the password. The same AEAD primitive
//! protects the verifier and the entries, so there is no separate
//! password-hash scheme to get wrong.

use latch_core::LatchError;
use latch_storage::{map_sql_err, Database};
use rusqlite::params;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::crypto;
use crate::kdf::{self, SALT_LEN};
use crate::now_stamp;
use crate::session::{MasterKey, VaultSession};

/// Fixed plaintext sealed into the verifier blob at initialization.
pub(crate) const VERIFIER_MARKER: &[u8] = b"vault-ok";

/// The persisted header row. Created exactly once, immutable thereafter;
/// there is no in-place re-derivation or parameter migration.
#[derive(Debug)]
pub struct VaultHeader {
    pub kdf_iter: u32,
    pub salt: [u8; SALT_LEN],
    pub verifier: Vec<u8>,
    pub created_at: String,
}

impl VaultHeader {
    /// Load the header row.
    ///
    /// A missing row is a precondition failure (the vault was never
    /// initialized), not a wrong-password outcome.
    pub fn load(db: &Database) -> Result<Self, LatchError> {
        let row = db.connection().query_row(
            "SELECT kdf_iter, salt, verifier, created_at FROM header WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, Vec<u8>>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        );
        let (kdf_iter, salt, verifier, created_at) = match row {
            Ok(r) => r,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(LatchError::Precondition(
                    "vault is not initialized".to_string(),
                ));
            }
            Err(e) => return Err(map_sql_err(e)),
        };
        let salt: [u8; SALT_LEN] = salt
            .try_into()
            .map_err(|_| LatchError::corrupt("corrupted salt (expected 16 bytes)"))?;
        Ok(Self {
            kdf_iter,
            salt,
            verifier,
            created_at,
        })
    }
}

/// Whether the vault already has its header row.
pub fn is_initialized(db: &Database) -> Result<bool, LatchError> {
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM header WHERE id = 1", [], |row| {
            row.get(0)
        })
        .map_err(map_sql_err)?;
    Ok(count > 0)
}

/// Initialize the vault: derive a key from a fresh salt, seal the verifier,
/// persist the header, and return an unlocked session.
///
/// Legal only once per vault; fails with a precondition error if a header
/// already exists.
pub fn create_master(
    db: &Database,
    password: &SecretString,
    iterations: u32,
) -> Result<VaultSession, LatchError> {
    if is_initialized(db)? {
        return Err(LatchError::Precondition(
            "vault is already initialized".to_string(),
        ));
    }

    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key(password.expose_secret().as_bytes(), &salt, iterations)?;
    let verifier = crypto::seal(&key, VERIFIER_MARKER, &[])?;

    db.connection()
        .execute(
            "INSERT INTO header (id, kdf_iter, salt, verifier, created_at)
             VALUES (1, ?1, ?2, ?3, ?4)",
            params![iterations, salt.to_vec(), verifier, now_stamp()],
        )
        .map_err(map_sql_err)?;

    info!(kdf_iter = iterations, "vault header created");
    Ok(VaultSession::new(MasterKey::new(*key)))
}

/// Attempt to unlock the vault.
///
/// Returns `Ok(Some(session))` iff the verifier decrypts under the
/// re-derived key, `Ok(None)` on a wrong password — a routine outcome, not
/// an error. Hard failures (missing header, storage fault, corrupted field
/// widths) propagate as errors; the catch below is deliberately narrow so an
/// infrastructure fault is never reported as a password mismatch.
pub fn unlock(db: &Database, password: &SecretString) -> Result<Option<VaultSession>, LatchError> {
    let header = VaultHeader::load(db)?;
    let key = kdf::derive_key(
        password.expose_secret().as_bytes(),
        &header.salt,
        header.kdf_iter,
    )?;

    match crypto::open(&key, &header.verifier, &[]) {
        Ok(marker) if marker == VERIFIER_MARKER => {
            debug!("vault unlocked");
            Ok(Some(VaultSession::new(MasterKey::new(*key))))
        }
        // Decrypts but is not the marker: treat exactly like a failed tag.
        Ok(_) => Ok(None),
        Err(LatchError::Authentication) => Ok(None),
        Err(e) => Err(e),
    }
}
