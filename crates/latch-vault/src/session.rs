// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unlocked-session capability.
//!
//! A [`VaultSession`] is the only way to reach the derived master key, and it
//! is handed out solely by `header::create_master` and `header::unlock`.
//! Store operations take `&VaultSession`, so "all data operations require
//! Unlocked" is enforced by construction plus an explicit lock check.

use latch_core::LatchError;
use zeroize::Zeroizing;

use crate::kdf::KEY_LEN;

/// The 32-byte master key. Exists only in volatile memory; wiped on drop.
///
/// Debug output intentionally omits the key bytes.
pub struct MasterKey(Zeroizing<[u8; KEY_LEN]>);

impl MasterKey {
    pub(crate) fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub(crate) fn bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MasterKey").field(&"[REDACTED]").finish()
    }
}

/// Capability object holding the master key for the unlocked duration.
///
/// Invalidation is explicit: [`VaultSession::lock`] drops the key, which
/// zeroes it. The external idle timer calls `lock()`; the session itself
/// keeps no clock.
#[derive(Debug)]
pub struct VaultSession {
    key: Option<MasterKey>,
}

impl VaultSession {
    pub(crate) fn new(key: MasterKey) -> Self {
        Self { key: Some(key) }
    }

    /// Whether the session still holds the master key.
    pub fn is_unlocked(&self) -> bool {
        self.key.is_some()
    }

    /// Invalidate the cached master key. The key bytes are zeroed as the
    /// `MasterKey` drops. Idempotent; every subsequent data operation fails
    /// with a precondition error.
    pub fn lock(&mut self) {
        self.key = None;
    }

    /// Access the key, or fail if the session has been locked.
    pub(crate) fn key(&self) -> Result<&[u8; KEY_LEN], LatchError> {
        self.key
            .as_ref()
            .map(MasterKey::bytes)
            .ok_or_else(|| LatchError::Precondition("vault session is locked".to_string()))
    }

    /// Check the Unlocked precondition without touching the key, for
    /// operations that only read plaintext columns.
    pub(crate) fn ensure_unlocked(&self) -> Result<(), LatchError> {
        self.key().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> VaultSession {
        VaultSession::new(MasterKey::new([42u8; KEY_LEN]))
    }

    #[test]
    fn fresh_session_is_unlocked() {
        let s = session();
        assert!(s.is_unlocked());
        assert!(s.key().is_ok());
    }

    #[test]
    fn lock_invalidates_key() {
        let mut s = session();
        s.lock();
        assert!(!s.is_unlocked());
        assert!(matches!(s.key(), Err(LatchError::Precondition(_))));
        assert!(matches!(
            s.ensure_unlocked(),
            Err(LatchError::Precondition(_))
        ));
    }

    #[test]
    fn lock_is_idempotent() {
        let mut s = session();
        s.lock();
        s.lock();
        assert!(!s.is_unlocked());
    }

    #[test]
    fn debug_output_is_redacted() {
        let s = session();
        let rendered = format!("{s:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("42"));
    }
}
