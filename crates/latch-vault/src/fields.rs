// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The secret fields bundle of an entry.
//!
//! Serialized to canonical JSON bytes before encryption. The encoding is not
//! part of the security boundary (the whole bundle is sealed), but it must
//! round-trip exactly.

use latch_core::LatchError;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Secret payload of a credential entry. All four fields are encrypted
/// together as one blob; none of them is individually addressable on disk.
///
/// Zeroed on drop. Debug output omits the field values.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct EntryFields {
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
}

impl std::fmt::Debug for EntryFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryFields")
            .field("username", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("url", &"[REDACTED]")
            .field("notes", &"[REDACTED]")
            .finish()
    }
}

impl EntryFields {
    /// Serialize to the canonical byte encoding used as AEAD plaintext.
    ///
    /// Struct field order is fixed, so the encoding is deterministic.
    pub(crate) fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>, LatchError> {
        serde_json::to_vec(self)
            .map(Zeroizing::new)
            .map_err(|e| LatchError::Internal(format!("failed to encode entry fields: {e}")))
    }

    /// Deserialize a decrypted payload.
    ///
    /// The bytes already passed AEAD verification, so a parse failure here
    /// is a bug, not tampering.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, LatchError> {
        serde_json::from_slice(bytes)
            .map_err(|e| LatchError::Internal(format!("decrypted payload is not valid: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntryFields {
        EntryFields {
            username: "alice".to_string(),
            password: "p@ss".to_string(),
            url: "https://example.com".to_string(),
            notes: "work account".to_string(),
        }
    }

    #[test]
    fn encoding_round_trips_exactly() {
        let fields = sample();
        let bytes = fields.to_bytes().unwrap();
        let decoded = EntryFields::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, fields);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = sample().to_bytes().unwrap();
        let b = sample().to_bytes().unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn empty_fields_round_trip() {
        let fields = EntryFields::default();
        let bytes = fields.to_bytes().unwrap();
        assert_eq!(EntryFields::from_bytes(&bytes).unwrap(), fields);
    }

    #[test]
    fn non_ascii_fields_round_trip() {
        let fields = EntryFields {
            username: "grüße".to_string(),
            password: "пароль☃".to_string(),
            url: String::new(),
            notes: "メモ".to_string(),
        };
        let bytes = fields.to_bytes().unwrap();
        assert_eq!(EntryFields::from_bytes(&bytes).unwrap(), fields);
    }

    #[test]
    fn debug_output_is_redacted() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("p@ss"));
        assert!(!rendered.contains("alice"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn garbage_bytes_fail_as_internal() {
        let result = EntryFields::from_bytes(b"not json");
        assert!(matches!(result, Err(LatchError::Internal(_))));
    }
}
