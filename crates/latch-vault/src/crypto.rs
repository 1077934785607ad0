// SPDX-FileCopyrightText: 2026 Latch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open with associated data.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the
//! system CSPRNG; nonce reuse under the same key would be catastrophic for
//! GCM. The nonce is prepended to the result, giving the single-blob layout
//! `nonce(12) || ciphertext || tag(16)` used for both the header verifier
//! and entry payloads.

use latch_core::LatchError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

use crate::kdf::KEY_LEN;

/// Length of the GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Length of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`, authenticating `aad` alongside it.
///
/// Returns `nonce || ciphertext || tag`. The associated data is not stored
/// in the blob; the caller must present the same bytes to [`open`].
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LatchError> {
    let key = gcm_key(key)?;

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| LatchError::Internal("failed to generate random nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = plaintext.to_vec();
    key.seal_in_place_append_tag(nonce, Aad::from(aad), &mut in_out)
        .map_err(|_| LatchError::Internal("AES-256-GCM encryption failed".to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + in_out.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&in_out);
    Ok(blob)
}

/// Decrypt a blob produced by [`seal`], verifying `aad` against its tag.
///
/// Fails with [`LatchError::Authentication`] for a wrong key, a corrupted or
/// truncated blob, or associated data that differs from what was sealed.
/// These cases are deliberately indistinguishable to the caller.
pub fn open(key: &[u8; KEY_LEN], blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, LatchError> {
    // A well-formed blob carries at least the nonce and the tag.
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(LatchError::Authentication);
    }
    let key = gcm_key(key)?;

    let nonce = Nonce::try_assume_unique_for_key(&blob[..NONCE_LEN])
        .map_err(|_| LatchError::Authentication)?;

    let mut in_out = blob[NONCE_LEN..].to_vec();
    let plaintext = key
        .open_in_place(nonce, Aad::from(aad), &mut in_out)
        .map_err(|_| LatchError::Authentication)?;

    Ok(plaintext.to_vec())
}

fn gcm_key(key: &[u8; KEY_LEN]) -> Result<LessSafeKey, LatchError> {
    // Cannot fail for a 32-byte key; Internal rather than Authentication so
    // a primitive fault is never mistaken for a wrong password.
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| LatchError::Internal("failed to create AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(fill: u8) -> [u8; KEY_LEN] {
        [fill; KEY_LEN]
    }

    #[test]
    fn seal_open_roundtrip_with_aad() {
        let key = test_key(7);
        let blob = seal(&key, b"secret payload", b"github").unwrap();
        let plaintext = open(&key, &blob, b"github").unwrap();
        assert_eq!(plaintext, b"secret payload");
    }

    #[test]
    fn seal_open_roundtrip_empty_aad() {
        let key = test_key(7);
        let blob = seal(&key, b"vault-ok", b"").unwrap();
        assert_eq!(open(&key, &blob, b"").unwrap(), b"vault-ok");
    }

    #[test]
    fn seal_open_roundtrip_empty_plaintext() {
        let key = test_key(9);
        let blob = seal(&key, b"", b"label").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + TAG_LEN);
        assert_eq!(open(&key, &blob, b"label").unwrap(), b"");
    }

    #[test]
    fn nonce_is_fresh_per_call() {
        let key = test_key(1);
        let blob1 = seal(&key, b"same input twice", b"aad").unwrap();
        let blob2 = seal(&key, b"same input twice", b"aad").unwrap();
        assert_ne!(&blob1[..NONCE_LEN], &blob2[..NONCE_LEN]);
        assert_ne!(blob1, blob2);
    }

    #[test]
    fn blob_layout_is_nonce_ciphertext_tag() {
        let key = test_key(3);
        let blob = seal(&key, b"hello", b"").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + 5 + TAG_LEN);
    }

    #[test]
    fn wrong_key_fails_as_authentication() {
        let blob = seal(&test_key(1), b"secret", b"aad").unwrap();
        let result = open(&test_key(2), &blob, b"aad");
        assert!(matches!(result, Err(LatchError::Authentication)));
    }

    #[test]
    fn mismatched_aad_fails_as_authentication() {
        let key = test_key(5);
        let blob = seal(&key, b"secret", b"github").unwrap();
        let result = open(&key, &blob, b"gitlab");
        assert!(matches!(result, Err(LatchError::Authentication)));
    }

    #[test]
    fn any_single_bit_flip_fails() {
        let key = test_key(5);
        let blob = seal(&key, b"do not tamper", b"aad").unwrap();

        // Flip one bit in each region: nonce, ciphertext body, tag.
        for index in [0, NONCE_LEN, blob.len() - 1] {
            let mut tampered = blob.clone();
            tampered[index] ^= 0x01;
            let result = open(&key, &tampered, b"aad");
            assert!(
                matches!(result, Err(LatchError::Authentication)),
                "bit flip at byte {index} must fail authentication"
            );
        }
    }

    #[test]
    fn truncated_blob_fails_as_authentication() {
        let key = test_key(5);
        let blob = seal(&key, b"secret", b"aad").unwrap();
        for len in [0, NONCE_LEN, NONCE_LEN + TAG_LEN - 1] {
            let result = open(&key, &blob[..len], b"aad");
            assert!(matches!(result, Err(LatchError::Authentication)));
        }
    }
}
