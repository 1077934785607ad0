// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Latch secrets vault.

use thiserror::Error;

/// The primary error type used across all Latch crates.
#[derive(Debug, Error)]
pub enum LatchError {
    /// An operation was attempted in the wrong vault state: data access
    /// before unlock, re-initializing an already-initialized vault, or
    /// unlocking a vault that has no header yet.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// An AEAD verification failure: wrong key, corrupted or truncated
    /// ciphertext, or mismatched associated data.
    ///
    /// Carries no detail by design. The caller must not be able to tell a
    /// wrong password apart from tampered data.
    #[error("authentication failed")]
    Authentication,

    /// No entry exists with the given id.
    #[error("entry not found: {0}")]
    NotFound(i64),

    /// Underlying persistent-store fault (SQLite error, I/O failure, or a
    /// stored value with an impossible shape).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML values, out-of-range parameters).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors, such as a cryptographic primitive
    /// rejecting well-formed inputs.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LatchError {
    /// Build a `Storage` error from a plain message, for corrupted on-disk
    /// values that have no underlying error object (e.g. a salt column that
    /// is not 16 bytes wide).
    pub fn corrupt(msg: impl Into<String>) -> Self {
        LatchError::Storage {
            source: msg.into().into(),
        }
    }
}
