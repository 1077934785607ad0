// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM authenticated-storage engine for the Latch secrets vault.
//!
//! The master key is derived from the password with PBKDF2-HMAC-SHA256 and
//! authenticated against a stored verifier: a fixed marker encrypted under
//! the derived key. Successful decryption of the verifier proves the
//! password without storing any password hash.
//!
//! Each entry's secret payload is sealed with the entry's plaintext label as
//! associated data, so a stored label and its ciphertext can never drift
//! apart without decryption failing. Blob layout everywhere is
//! `nonce(12) || ciphertext || tag(16)`.
//!
//! The derived key lives only inside a [`VaultSession`] capability that every
//! store operation requires; [`VaultSession::lock`] zeroes it.

pub mod crypto;
pub mod fields;
pub mod header;
pub mod kdf;
pub mod session;
pub mod store;

pub use fields::EntryFields;
pub use header::{create_master, is_initialized, unlock, VaultHeader};
pub use session::{MasterKey, VaultSession};
pub use store::{EntryStore, EntrySummary};

/// Timestamp format of the `created_at`/`updated_at` text columns.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC wall-clock time in the stored column format.
pub(crate) fn now_stamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
